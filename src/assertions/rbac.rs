// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Temporarily elevate the ingress operator's service account.

use crate::builders::build_cluster_role_binding;
use crate::constants::{names, namespaces, poll};
use crate::error::Result;
use crate::kubernetes::{create_or_get, delete_and_confirm};
use k8s_openapi::api::rbac::v1::ClusterRoleBinding;
use kube::{Api, Client};
use tracing::{info, instrument};

/// Bind `cluster-admin` to the ingress operator's service account
#[instrument(skip(client))]
pub async fn grant_cluster_admin(client: &Client) -> Result<ClusterRoleBinding> {
    let bindings: Api<ClusterRoleBinding> = Api::all(client.clone());
    let binding = build_cluster_role_binding(
        names::CLUSTER_ADMIN_BINDING,
        names::CLUSTER_ADMIN_ROLE,
        names::INGRESS_OPERATOR_SERVICE_ACCOUNT,
        namespaces::INGRESS_OPERATOR,
    );
    let binding = create_or_get(&bindings, &binding).await?;

    info!(
        "Granted {} to {}/{}",
        names::CLUSTER_ADMIN_ROLE,
        namespaces::INGRESS_OPERATOR,
        names::INGRESS_OPERATOR_SERVICE_ACCOUNT
    );
    Ok(binding)
}

/// Remove the binding created by [`grant_cluster_admin`]
#[instrument(skip(client))]
pub async fn revoke_cluster_admin(client: &Client) -> Result<()> {
    let bindings: Api<ClusterRoleBinding> = Api::all(client.clone());
    delete_and_confirm(&bindings, names::CLUSTER_ADMIN_BINDING, poll::EXISTENCE, poll::DELETION).await
}
