// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CustomResourceDefinition assertions

use crate::constants::{poll, status::CRD_ESTABLISHED};
use crate::error::Result;
use crate::kubernetes::conditions::ConditionStatus;
use crate::kubernetes::{delete_and_confirm, poll_object, Readiness};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{Api, Client};
use tracing::{info, instrument};

fn established(crd: &CustomResourceDefinition) -> Readiness<()> {
    let condition = crd
        .status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .and_then(|conditions| conditions.iter().find(|c| c.type_ == CRD_ESTABLISHED));

    match condition {
        Some(c) if ConditionStatus::from(c.status.as_str()) == ConditionStatus::True => {
            Readiness::Ready(())
        }
        Some(c) => Readiness::pending(format!(
            "{} is {}, last recorded status message: {}",
            CRD_ESTABLISHED,
            ConditionStatus::from(c.status.as_str()),
            c.message.as_deref().unwrap_or_default()
        )),
        None => Readiness::pending(format!("no {} condition reported", CRD_ESTABLISHED)),
    }
}

/// The last version the CRD serves, if any
pub fn served_version(crd: &CustomResourceDefinition) -> Option<String> {
    crd.spec
        .versions
        .iter()
        .rev()
        .find(|v| v.served)
        .map(|v| v.name.clone())
}

/// Wait for the named CRD to be Established and return its served version
#[instrument(skip(client))]
pub async fn assert_crd_exists(client: &Client, name: &str) -> Result<Option<String>> {
    let crds: Api<CustomResourceDefinition> = Api::all(client.clone());
    let crd = poll_object(&crds, name, poll::CRD_ESTABLISHED, established).await?;
    let version = served_version(&crd);

    info!(
        "CRD {} is Established, served version {}",
        name,
        version.as_deref().unwrap_or("<none>")
    );
    Ok(version)
}

/// Delete the named CRD and wait until it is gone (or recreated)
#[instrument(skip(client))]
pub async fn delete_existing_crd(client: &Client, name: &str) -> Result<()> {
    let crds: Api<CustomResourceDefinition> = Api::all(client.clone());
    delete_and_confirm(&crds, name, poll::EXISTENCE, poll::DELETION).await
}
