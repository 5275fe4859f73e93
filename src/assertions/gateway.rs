// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Gateway API assertions: create GatewayClass, Gateway and HTTPRoute objects
//! and wait for the gateway controller to accept them.

use crate::builders::{
    build_echo_pod, build_echo_service, build_gateway_class, build_http_route, build_open_gateway,
};
use crate::constants::{
    gateway::{ACCEPTED, RESOLVED_REFS},
    poll,
};
use crate::error::{E2eError, Result};
use crate::kubernetes::conditions::{find_condition, unmet_condition};
use crate::kubernetes::{create_or_get, poll_object, HasConditions, Readiness};
use crate::types::gateway::{Gateway, GatewayClass, HTTPRoute, RouteParentStatus};
use k8s_openapi::api::core::v1::{Pod, Service};
use kube::{Api, Client, ResourceExt};
use tracing::{info, instrument};

fn accepted<K: HasConditions>(obj: &K) -> Readiness<()> {
    match unmet_condition(obj.conditions(), ACCEPTED) {
        None => Readiness::Ready(()),
        Some(message) => Readiness::Pending(message),
    }
}

/// Name and namespace of a gateway handed in by the caller
fn gateway_ref(gateway: &Gateway) -> Result<(String, String)> {
    match (gateway.metadata.name.as_ref(), gateway.metadata.namespace.as_ref()) {
        (Some(name), Some(namespace)) => Ok((name.clone(), namespace.clone())),
        _ => Err(E2eError::Precondition(
            "gateway has no name or namespace".to_string(),
        )),
    }
}

/// Create a GatewayClass for `controller_name`, or return the existing one
#[instrument(skip(client))]
pub async fn create_gateway_class(
    client: &Client,
    name: &str,
    controller_name: &str,
) -> Result<GatewayClass> {
    let classes: Api<GatewayClass> = Api::all(client.clone());
    create_or_get(&classes, &build_gateway_class(name, controller_name)).await
}

/// Create a Gateway of `gateway_class` listening on `*.{domain}`, or return
/// the existing one
#[instrument(skip(client, gateway_class))]
pub async fn create_gateway(
    client: &Client,
    gateway_class: &GatewayClass,
    name: &str,
    namespace: &str,
    domain: &str,
) -> Result<Gateway> {
    let gateways: Api<Gateway> = Api::namespaced(client.clone(), namespace);
    let gateway = build_open_gateway(name, namespace, &gateway_class.name_any(), domain);
    create_or_get(&gateways, &gateway).await
}

/// Create an HTTPRoute attached to `gateway` for `hostname`, together with an
/// echo Pod and Service named `backend` that the route forwards to.
#[instrument(skip(client, gateway))]
pub async fn create_http_route(
    client: &Client,
    namespace: &str,
    route_name: &str,
    hostname: &str,
    backend: &str,
    gateway: &Gateway,
    echo_image: &str,
) -> Result<HTTPRoute> {
    let (gateway_name, gateway_namespace) = gateway_ref(gateway)?;

    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let pod = create_or_get(&pods, &build_echo_pod(backend, namespace, echo_image)).await?;

    let services: Api<Service> = Api::namespaced(client.clone(), namespace);
    create_or_get(
        &services,
        &build_echo_service(backend, namespace, pod.labels().clone()),
    )
    .await?;

    let routes: Api<HTTPRoute> = Api::namespaced(client.clone(), namespace);
    let route = build_http_route(
        route_name,
        namespace,
        &gateway_name,
        &gateway_namespace,
        hostname,
        backend,
    );
    create_or_get(&routes, &route).await
}

/// Wait for the GatewayClass to be Accepted
#[instrument(skip(client))]
pub async fn assert_gateway_class_successful(client: &Client, name: &str) -> Result<GatewayClass> {
    let classes: Api<GatewayClass> = Api::all(client.clone());
    let class = poll_object(
        &classes,
        name,
        poll::GATEWAY_CLASS_ACCEPTED,
        accepted::<GatewayClass>,
    )
    .await?;

    info!("Found gatewayClass {} {}", name, ACCEPTED);
    Ok(class)
}

/// Wait for the Gateway to be Accepted
#[instrument(skip(client))]
pub async fn assert_gateway_successful(client: &Client, namespace: &str, name: &str) -> Result<Gateway> {
    let gateways: Api<Gateway> = Api::namespaced(client.clone(), namespace);
    let gateway = poll_object(&gateways, name, poll::GATEWAY_ACCEPTED, accepted::<Gateway>).await?;

    info!("Found gateway {}/{} {}", namespace, name, ACCEPTED);
    Ok(gateway)
}

fn last_message<'a>(parent: &'a RouteParentStatus, condition_type: &str) -> &'a str {
    match find_condition(&parent.conditions, condition_type) {
        Some(c) => c.message_or_empty(),
        None if condition_type == ACCEPTED => "no accepted parent conditions",
        None => "no resolved ref parent conditions",
    }
}

fn parent_failure(route: &HTTPRoute, parent: &RouteParentStatus) -> Option<String> {
    let message = |condition_type| last_message(parent, condition_type);
    let prefix = format!(
        "httpRoute {}/{}, parent {}",
        route.namespace().unwrap_or_default(),
        route.name_any(),
        parent.parent_ref
    );

    let accepted = unmet_condition(&parent.conditions, ACCEPTED).is_none();
    let resolved = unmet_condition(&parent.conditions, RESOLVED_REFS).is_none();

    match (accepted, resolved) {
        (true, true) => None,
        (false, false) => Some(format!(
            "{} neither {} nor {}, last recorded status messages: {}; {}",
            prefix,
            ACCEPTED,
            RESOLVED_REFS,
            message(ACCEPTED),
            message(RESOLVED_REFS)
        )),
        (false, true) => Some(format!(
            "{} not {}, last recorded status message: {}",
            prefix,
            ACCEPTED,
            message(ACCEPTED)
        )),
        (true, false) => Some(format!(
            "{} not {}, last recorded status message: {}",
            prefix,
            RESOLVED_REFS,
            message(RESOLVED_REFS)
        )),
    }
}

/// Why the route is not yet accepted by all of its parents, or `None` when
/// every parent reports both Accepted and ResolvedRefs
pub fn route_parent_failure(route: &HTTPRoute) -> Option<String> {
    let parents = route.parent_statuses();
    if parents.is_empty() {
        return Some(format!(
            "httpRoute {}/{} has no parent conditions",
            route.namespace().unwrap_or_default(),
            route.name_any()
        ));
    }

    parents.iter().find_map(|parent| parent_failure(route, parent))
}

/// Wait until every parent of the HTTPRoute reports Accepted and ResolvedRefs
#[instrument(skip(client, gateway))]
pub async fn assert_http_route_successful(
    client: &Client,
    namespace: &str,
    name: &str,
    gateway: &Gateway,
) -> Result<HTTPRoute> {
    let (gateway_name, gateway_namespace) = gateway_ref(gateway)?;

    let routes: Api<HTTPRoute> = Api::namespaced(client.clone(), namespace);
    let route = poll_object(&routes, name, poll::HTTP_ROUTE_ACCEPTED, |route: &HTTPRoute| {
        match route_parent_failure(route) {
            None => Readiness::Ready(()),
            Some(message) => Readiness::Pending(message),
        }
    })
    .await?;

    info!(
        "Found httpRoute {}/{} {} and {} on gateway {}/{}",
        namespace, name, ACCEPTED, RESOLVED_REFS, gateway_namespace, gateway_name
    );
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kubernetes::{Condition, ConditionStatus};
    use crate::test_utils::{already_exists_json, not_found_json, object_json, MockService};
    use crate::types::gateway::{
        GatewayClassStatus, GatewayStatus, HttpRouteStatus, ParentReference,
    };

    const GC_PATH: &str = "/apis/gateway.networking.k8s.io/v1/gatewayclasses/gc";
    const GC_COLLECTION: &str = "/apis/gateway.networking.k8s.io/v1/gatewayclasses";
    const GW_PATH: &str = "/apis/gateway.networking.k8s.io/v1/namespaces/ns1/gateways/g1";
    const GW_COLLECTION: &str = "/apis/gateway.networking.k8s.io/v1/namespaces/ns1/gateways";
    const ROUTE_PATH: &str = "/apis/gateway.networking.k8s.io/v1/namespaces/ns1/httproutes/r1";
    const ROUTE_COLLECTION: &str = "/apis/gateway.networking.k8s.io/v1/namespaces/ns1/httproutes";
    const POD_COLLECTION: &str = "/api/v1/namespaces/ns1/pods";
    const POD_PATH: &str = "/api/v1/namespaces/ns1/pods/echo";
    const SVC_COLLECTION: &str = "/api/v1/namespaces/ns1/services";

    fn condition(condition_type: &str, status: ConditionStatus, message: &str) -> Condition {
        Condition::new(condition_type, status, message)
    }

    fn make_gateway() -> Gateway {
        let mut gw = build_open_gateway("g1", "ns1", "gc", "example.com");
        gw.metadata.uid = Some("gw-uid".to_string());
        gw
    }

    fn parent(name: &str, namespace: &str, conditions: Vec<Condition>) -> RouteParentStatus {
        RouteParentStatus {
            parent_ref: ParentReference {
                name: name.to_string(),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            controller_name: "openshift.io/gateway-controller".to_string(),
            conditions,
        }
    }

    fn make_route(parents: Vec<RouteParentStatus>) -> HTTPRoute {
        let mut route = build_http_route("r1", "ns1", "g1", "ns1", "svc.example.com", "echo");
        route.metadata.uid = Some("route-uid".to_string());
        route.status = Some(HttpRouteStatus { parents });
        route
    }

    fn accepted_only() -> Vec<Condition> {
        vec![
            condition(ACCEPTED, ConditionStatus::True, "Route was valid"),
            condition(RESOLVED_REFS, ConditionStatus::False, "Service ns1/echo not found"),
        ]
    }

    fn all_true() -> Vec<Condition> {
        vec![
            condition(ACCEPTED, ConditionStatus::True, "Route was valid"),
            condition(RESOLVED_REFS, ConditionStatus::True, "All references resolved"),
        ]
    }

    #[test]
    fn test_route_parent_failure_names_parent_and_condition() {
        let route = make_route(vec![parent("g1", "ns1", accepted_only())]);

        let failure = route_parent_failure(&route).unwrap();

        assert_eq!(
            failure,
            "httpRoute ns1/r1, parent ns1/g1 not ResolvedRefs, last recorded status message: Service ns1/echo not found"
        );
    }

    #[test]
    fn test_route_parent_failure_neither_condition() {
        let route = make_route(vec![parent(
            "g1",
            "ns1",
            vec![condition(ACCEPTED, ConditionStatus::False, "NotAllowedByListeners")],
        )]);

        let failure = route_parent_failure(&route).unwrap();

        assert!(failure.contains("neither Accepted nor ResolvedRefs"), "{}", failure);
        assert!(failure.contains("NotAllowedByListeners"), "{}", failure);
    }

    #[test]
    fn test_route_parent_failure_without_conditions() {
        let route = make_route(vec![parent(
            "g1",
            "ns1",
            vec![condition(ACCEPTED, ConditionStatus::True, "Route was valid")],
        )]);

        assert_eq!(
            route_parent_failure(&route).as_deref(),
            Some("httpRoute ns1/r1, parent ns1/g1 not ResolvedRefs, last recorded status message: no resolved ref parent conditions")
        );

        let route = make_route(vec![parent("g1", "ns1", vec![])]);
        let failure = route_parent_failure(&route).unwrap();
        assert!(
            failure.ends_with("no accepted parent conditions; no resolved ref parent conditions"),
            "{}",
            failure
        );
    }

    #[test]
    fn test_route_parent_failure_without_parents() {
        let route = make_route(vec![]);
        assert_eq!(
            route_parent_failure(&route).as_deref(),
            Some("httpRoute ns1/r1 has no parent conditions")
        );
    }

    #[test]
    fn test_route_parent_failure_checks_every_parent() {
        let route = make_route(vec![
            parent("g1", "ns1", all_true()),
            parent("g2", "ns2", accepted_only()),
        ]);

        let failure = route_parent_failure(&route).unwrap();

        assert!(failure.contains("parent ns2/g2 not ResolvedRefs"), "{}", failure);
        assert_eq!(
            route_parent_failure(&make_route(vec![
                parent("g1", "ns1", all_true()),
                parent("g2", "ns2", all_true()),
            ])),
            None
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_assert_http_route_successful_once_resolved() {
        let mock = MockService::new()
            .on_get(ROUTE_PATH, 404, &not_found_json("httproutes", "r1"))
            .on_get(ROUTE_PATH, 200, &object_json(&make_route(vec![parent("g1", "ns1", accepted_only())])))
            .on_get(ROUTE_PATH, 200, &object_json(&make_route(vec![parent("g1", "ns1", all_true())])));

        let route = assert_http_route_successful(&mock.clone().into_client(), "ns1", "r1", &make_gateway())
            .await
            .unwrap();

        assert_eq!(route.parent_statuses().len(), 1);
        assert_eq!(mock.request_count("GET", ROUTE_PATH), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_assert_http_route_successful_reports_unresolved_parent() {
        let mock = MockService::new().on_get(
            ROUTE_PATH,
            200,
            &object_json(&make_route(vec![parent("g1", "ns1", accepted_only())])),
        );

        let err = assert_http_route_successful(&mock.into_client(), "ns1", "r1", &make_gateway())
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(matches!(err, E2eError::Timeout { .. }));
        assert!(message.contains("ns1/g1"), "{}", message);
        assert!(message.contains("ResolvedRefs"), "{}", message);
    }

    #[tokio::test]
    async fn test_assert_http_route_requires_named_gateway() {
        let mock = MockService::new();
        let mut gateway = make_gateway();
        gateway.metadata.namespace = None;

        let err = assert_http_route_successful(&mock.clone().into_client(), "ns1", "r1", &gateway)
            .await
            .unwrap_err();

        assert!(matches!(err, E2eError::Precondition(_)));
        assert_eq!(mock.request_count("GET", ROUTE_PATH), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_assert_gateway_class_successful() {
        let mut pending = build_gateway_class("gc", "openshift.io/gateway-controller");
        pending.status = Some(GatewayClassStatus {
            conditions: vec![condition(ACCEPTED, ConditionStatus::Unknown, "Waiting for controller")],
        });
        let mut ready = pending.clone();
        ready.status = Some(GatewayClassStatus {
            conditions: vec![condition(ACCEPTED, ConditionStatus::True, "Handled by controller")],
        });
        let mock = MockService::new()
            .on_get(GC_PATH, 200, &object_json(&pending))
            .on_get(GC_PATH, 200, &object_json(&ready));

        let class = assert_gateway_class_successful(&mock.clone().into_client(), "gc")
            .await
            .unwrap();

        assert!(class.find_condition(ACCEPTED).unwrap().is_true());
        assert_eq!(mock.request_count("GET", GC_PATH), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_assert_gateway_successful_times_out_with_condition_message() {
        let mut gw = make_gateway();
        gw.status = Some(GatewayStatus {
            conditions: vec![condition(ACCEPTED, ConditionStatus::False, "Invalid listener")],
        });
        let mock = MockService::new().on_get(GW_PATH, 200, &object_json(&gw));

        let err = assert_gateway_successful(&mock.into_client(), "ns1", "g1")
            .await
            .unwrap_err();

        match err {
            E2eError::Timeout { last_observed, .. } => assert_eq!(
                last_observed,
                "Accepted is False, last recorded status message: Invalid listener"
            ),
            other => panic!("expected Timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_gateway_class_and_gateway() {
        let mut class = build_gateway_class("gc", "openshift.io/gateway-controller");
        class.metadata.uid = Some("gc-uid".to_string());
        let mock = MockService::new()
            .on_post(GC_COLLECTION, 201, &object_json(&class))
            .on_post(GW_COLLECTION, 201, &object_json(&make_gateway()));
        let client = mock.clone().into_client();

        let class = create_gateway_class(&client, "gc", "openshift.io/gateway-controller")
            .await
            .unwrap();
        let gateway = create_gateway(&client, &class, "g1", "ns1", "example.com")
            .await
            .unwrap();

        assert_eq!(gateway.spec.gateway_class_name, "gc");
        assert_eq!(gateway.first_listener_hostname(), Some("*.example.com"));
        assert_eq!(mock.request_count("POST", GC_COLLECTION), 1);
        assert_eq!(mock.request_count("POST", GW_COLLECTION), 1);
    }

    #[tokio::test]
    async fn test_create_gateway_returns_existing() {
        let mock = MockService::new()
            .on_post(GW_COLLECTION, 409, &already_exists_json("gateways", "g1"))
            .on_get(GW_PATH, 200, &object_json(&make_gateway()));
        let class = build_gateway_class("gc", "openshift.io/gateway-controller");

        let gateway = create_gateway(&mock.clone().into_client(), &class, "g1", "ns1", "example.com")
            .await
            .unwrap();

        assert_eq!(gateway.uid().as_deref(), Some("gw-uid"));
        assert_eq!(mock.request_count("GET", GW_PATH), 1);
    }

    #[tokio::test]
    async fn test_create_http_route_creates_echo_backend() {
        let pod = build_echo_pod("echo", "ns1", "tools:latest");
        let service = build_echo_service("echo", "ns1", pod.labels().clone());
        let mock = MockService::new()
            .on_post(POD_COLLECTION, 201, &object_json(&pod))
            .on_post(SVC_COLLECTION, 201, &object_json(&service))
            .on_post(ROUTE_COLLECTION, 201, &object_json(&make_route(vec![])));

        let route = create_http_route(
            &mock.clone().into_client(),
            "ns1",
            "r1",
            "svc.example.com",
            "echo",
            &make_gateway(),
            "tools:latest",
        )
        .await
        .unwrap();

        assert_eq!(route.spec.parent_refs[0].to_string(), "ns1/g1");
        assert_eq!(mock.request_count("POST", POD_COLLECTION), 1);
        assert_eq!(mock.request_count("POST", SVC_COLLECTION), 1);
        assert_eq!(mock.request_count("POST", ROUTE_COLLECTION), 1);
    }

    #[tokio::test]
    async fn test_create_http_route_reuses_existing_echo_pod() {
        let pod = build_echo_pod("echo", "ns1", "tools:latest");
        let service = build_echo_service("echo", "ns1", pod.labels().clone());
        let mock = MockService::new()
            .on_post(POD_COLLECTION, 409, &already_exists_json("pods", "echo"))
            .on_get(POD_PATH, 200, &object_json(&pod))
            .on_post(SVC_COLLECTION, 201, &object_json(&service))
            .on_post(ROUTE_COLLECTION, 201, &object_json(&make_route(vec![])));

        create_http_route(
            &mock.clone().into_client(),
            "ns1",
            "r1",
            "svc.example.com",
            "echo",
            &make_gateway(),
            "tools:latest",
        )
        .await
        .unwrap();

        assert_eq!(mock.request_count("GET", POD_PATH), 1);
        assert_eq!(mock.request_count("POST", ROUTE_COLLECTION), 1);
    }

    #[tokio::test]
    async fn test_create_http_route_requires_named_gateway() {
        let mock = MockService::new();
        let mut gateway = make_gateway();
        gateway.metadata.name = None;

        let err = create_http_route(
            &mock.clone().into_client(),
            "ns1",
            "r1",
            "svc.example.com",
            "echo",
            &gateway,
            "tools:latest",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, E2eError::Precondition(_)));
        assert_eq!(mock.request_count("POST", POD_COLLECTION), 0);
    }
}
