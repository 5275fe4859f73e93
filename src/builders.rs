// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Builders for the objects the assertions create

use crate::constants::gateway::{ALL_NAMESPACES, DEFAULT_PORT, ECHO_PORT};
use crate::types::gateway::{
    AllowedRoutes, Gateway, GatewayClass, GatewayClassSpec, GatewaySpec, HTTPRoute,
    HttpBackendRef, HttpRouteRule, HttpRouteSpec, Listener, ParentReference, RouteNamespaces,
};
use k8s_openapi::api::core::v1::{
    Capabilities, Container, ContainerPort, Pod, PodSpec, SeccompProfile, SecurityContext,
    Service, ServicePort, ServiceSpec,
};
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, RoleRef, Subject};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

pub fn build_gateway_class(name: &str, controller_name: &str) -> GatewayClass {
    GatewayClass::new(
        name,
        GatewayClassSpec {
            controller_name: controller_name.to_string(),
            description: None,
        },
    )
}

/// A Gateway with one HTTP listener on port 80 for `*.{domain}`, admitting
/// routes from the namespaces selected by `from_namespaces`
pub fn build_gateway(
    name: &str,
    namespace: &str,
    gateway_class: &str,
    from_namespaces: &str,
    domain: &str,
) -> Gateway {
    let listener = Listener {
        name: "http".to_string(),
        hostname: Some(format!("*.{}", domain)),
        port: DEFAULT_PORT,
        protocol: "HTTP".to_string(),
        allowed_routes: Some(AllowedRoutes {
            namespaces: Some(RouteNamespaces {
                from: Some(from_namespaces.to_string()),
            }),
        }),
    };

    let mut gateway = Gateway::new(
        name,
        GatewaySpec {
            gateway_class_name: gateway_class.to_string(),
            listeners: vec![listener],
        },
    );
    gateway.metadata.namespace = Some(namespace.to_string());
    gateway
}

/// Same as [`build_gateway`] admitting routes from every namespace
pub fn build_open_gateway(name: &str, namespace: &str, gateway_class: &str, domain: &str) -> Gateway {
    build_gateway(name, namespace, gateway_class, ALL_NAMESPACES, domain)
}

/// An HTTPRoute attached to `parent_gateway` forwarding `hostname` to port 80
/// of the `backend` service
pub fn build_http_route(
    name: &str,
    namespace: &str,
    parent_gateway: &str,
    parent_namespace: &str,
    hostname: &str,
    backend: &str,
) -> HTTPRoute {
    let mut route = HTTPRoute::new(
        name,
        HttpRouteSpec {
            parent_refs: vec![ParentReference {
                name: parent_gateway.to_string(),
                namespace: Some(parent_namespace.to_string()),
                ..Default::default()
            }],
            hostnames: vec![hostname.to_string()],
            rules: vec![HttpRouteRule {
                backend_refs: vec![HttpBackendRef {
                    name: backend.to_string(),
                    port: Some(DEFAULT_PORT),
                }],
            }],
        },
    );
    route.metadata.namespace = Some(namespace.to_string());
    route
}

fn echo_labels(name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("app".to_string(), name.to_string())])
}

/// A pod answering every HTTP request on port 8080 with `200 OK`
pub fn build_echo_pod(name: &str, namespace: &str, image: &str) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(echo_labels(name)),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name: "echo".to_string(),
                image: Some(image.to_string()),
                command: Some(vec!["/bin/socat".to_string()]),
                args: Some(vec![
                    format!("TCP4-LISTEN:{},reuseaddr,fork", ECHO_PORT),
                    r#"EXEC:'/bin/bash -c "printf \"HTTP/1.0 200 OK\r\n\r\n\"; sed -e \"/^\r/q\""'"#
                        .to_string(),
                ]),
                ports: Some(vec![ContainerPort {
                    container_port: ECHO_PORT,
                    protocol: Some("TCP".to_string()),
                    ..Default::default()
                }]),
                security_context: Some(SecurityContext {
                    allow_privilege_escalation: Some(false),
                    capabilities: Some(Capabilities {
                        drop: Some(vec!["ALL".to_string()]),
                        ..Default::default()
                    }),
                    run_as_non_root: Some(true),
                    seccomp_profile: Some(SeccompProfile {
                        type_: "RuntimeDefault".to_string(),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// A service exposing the echo pod's port 8080 as port 80
pub fn build_echo_service(name: &str, namespace: &str, selector: BTreeMap<String, String>) -> Service {
    Service {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(selector.clone()),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(selector),
            ports: Some(vec![ServicePort {
                name: Some("http".to_string()),
                port: DEFAULT_PORT,
                protocol: Some("TCP".to_string()),
                target_port: Some(IntOrString::Int(ECHO_PORT)),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Binds `cluster_role` to a service account cluster-wide
pub fn build_cluster_role_binding(
    name: &str,
    cluster_role: &str,
    service_account: &str,
    service_account_namespace: &str,
) -> ClusterRoleBinding {
    ClusterRoleBinding {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        role_ref: RoleRef {
            api_group: "rbac.authorization.k8s.io".to_string(),
            kind: "ClusterRole".to_string(),
            name: cluster_role.to_string(),
        },
        subjects: Some(vec![Subject {
            kind: "ServiceAccount".to_string(),
            name: service_account.to_string(),
            namespace: Some(service_account_namespace.to_string()),
            ..Default::default()
        }]),
    }
}
