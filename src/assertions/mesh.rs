// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OpenShift Service Mesh assertions: the Istio operator, istiod and the
//! ServiceMeshControlPlane the ingress operator installs for Gateway API.

use crate::constants::{names, namespaces, poll, status::POD_RUNNING};
use crate::error::{E2eError, Result};
use crate::kubernetes::{delete_and_confirm, poll_object, wait_for_object, PollSettings, Readiness};
use crate::types::maistra::ServiceMeshControlPlane;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Pod;
use kube::{api::ListParams, Api, Client, ResourceExt};
use tracing::{info, instrument};

/// Wait for the OSSM Istio operator deployment and check its pod is running
#[instrument(skip(client))]
pub async fn assert_ossm_operator(client: &Client) -> Result<Pod> {
    assert_deployment_pod_running(
        client,
        namespaces::OPENSHIFT_OPERATORS,
        names::ISTIO_OPERATOR_DEPLOYMENT,
        poll::EXISTENCE,
    )
    .await
}

/// Wait for the istiod deployment and check its pod is running
#[instrument(skip(client))]
pub async fn assert_istiod_control_plane(client: &Client) -> Result<Pod> {
    assert_deployment_pod_running(
        client,
        namespaces::INGRESS_OPERAND,
        names::ISTIOD_DEPLOYMENT,
        poll::ISTIOD_DEPLOYMENT,
    )
    .await
}

async fn assert_deployment_pod_running(
    client: &Client,
    namespace: &str,
    name: &str,
    settings: PollSettings,
) -> Result<Pod> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let deployment = wait_for_object(&deployments, name, settings).await?;
    let pod = assert_single_running_pod(client, &deployment).await?;

    info!(
        "Found pod {}/{} of deployment {} to be {}",
        namespace,
        pod.name_any(),
        name,
        POD_RUNNING
    );
    Ok(pod)
}

/// Label selector built from the deployment's `spec.selector.matchLabels`
pub fn deployment_selector(deployment: &Deployment) -> Option<String> {
    let labels = deployment
        .spec
        .as_ref()
        .and_then(|s| s.selector.match_labels.as_ref())
        .filter(|l| !l.is_empty())?;

    Some(
        labels
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Check the deployment has exactly one pod and that it is Running
pub async fn assert_single_running_pod(client: &Client, deployment: &Deployment) -> Result<Pod> {
    let namespace = deployment.namespace().unwrap_or_default();
    let name = deployment.name_any();
    let Some(selector) = deployment_selector(deployment) else {
        return Err(E2eError::Precondition(format!(
            "deployment {}/{} has no matchLabels selector",
            namespace, name
        )));
    };

    let pods: Api<Pod> = Api::namespaced(client.clone(), &namespace);
    let mut list = pods.list(&ListParams::default().labels(&selector)).await?;

    if list.items.len() != 1 {
        return Err(E2eError::NotReady(format!(
            "expected exactly one pod for deployment {}/{}, found {}",
            namespace,
            name,
            list.items.len()
        )));
    }
    let pod = list.items.remove(0);

    let phase = pod
        .status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .unwrap_or("Unknown");
    if phase != POD_RUNNING {
        return Err(E2eError::NotReady(format!(
            "pod {}/{} of deployment {} is not running, it is {}",
            namespace,
            pod.name_any(),
            name,
            phase
        )));
    }

    Ok(pod)
}

fn smcp_ready(smcp: &ServiceMeshControlPlane) -> Readiness<()> {
    if !smcp.has_readiness() {
        return Readiness::pending("could not determine its readiness");
    }

    let pending = smcp.components("pending");
    let unready = smcp.components("unready");
    if !pending.is_empty() || !unready.is_empty() {
        return Readiness::pending(format!(
            "not ready, pending: {:?}, unready: {:?}",
            pending, unready
        ));
    }

    if smcp.components("ready").is_empty() {
        return Readiness::pending("no ready components reported");
    }

    Readiness::Ready(())
}

/// Wait for the gateway ServiceMeshControlPlane to report only ready components
#[instrument(skip(client))]
pub async fn assert_smcp(client: &Client) -> Result<ServiceMeshControlPlane> {
    let smcps: Api<ServiceMeshControlPlane> =
        Api::namespaced(client.clone(), namespaces::INGRESS_OPERAND);
    let smcp = poll_object(&smcps, names::SMCP, poll::SMCP_READY, smcp_ready).await?;

    info!(
        "Found ServiceMeshControlPlane {}/{} with ready components: {:?}",
        namespaces::INGRESS_OPERAND,
        names::SMCP,
        smcp.components("ready")
    );
    Ok(smcp)
}

/// Delete the gateway ServiceMeshControlPlane and wait until it is gone
#[instrument(skip(client))]
pub async fn delete_existing_smcp(client: &Client) -> Result<()> {
    let smcps: Api<ServiceMeshControlPlane> =
        Api::namespaced(client.clone(), namespaces::INGRESS_OPERAND);
    delete_and_confirm(&smcps, names::SMCP, poll::EXISTENCE, poll::DELETION).await
}
