// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Operator Lifecycle Manager assertions

use crate::constants::{poll, status::CATALOG_SOURCE_READY};
use crate::error::Result;
use crate::kubernetes::{delete_and_confirm, poll_object, wait_for_object, Readiness};
use crate::types::olm::{CatalogSource, Subscription};
use kube::{Api, Client, ResourceExt};
use tracing::{info, instrument};

/// Wait for the Subscription to exist
#[instrument(skip(client))]
pub async fn assert_subscription(client: &Client, namespace: &str, name: &str) -> Result<Subscription> {
    let subscriptions: Api<Subscription> = Api::namespaced(client.clone(), namespace);
    let subscription = wait_for_object(&subscriptions, name, poll::EXISTENCE).await?;

    info!(
        "Found subscription {} at installed version {}",
        subscription.name_any(),
        subscription.installed_csv().unwrap_or("<none>")
    );
    Ok(subscription)
}

/// Delete the Subscription and wait until it is gone (or recreated)
#[instrument(skip(client))]
pub async fn delete_existing_subscription(client: &Client, namespace: &str, name: &str) -> Result<()> {
    let subscriptions: Api<Subscription> = Api::namespaced(client.clone(), namespace);
    delete_and_confirm(&subscriptions, name, poll::EXISTENCE, poll::DELETION).await
}

fn catalog_ready(catalog: &CatalogSource) -> Readiness<()> {
    match catalog.last_observed_state() {
        Some(CATALOG_SOURCE_READY) => Readiness::Ready(()),
        Some(state) => Readiness::pending(format!("last observed state is {}", state)),
        None => Readiness::pending("could not determine last observed state"),
    }
}

/// Wait for the CatalogSource's gRPC connection to be READY
#[instrument(skip(client))]
pub async fn assert_catalog_source(client: &Client, namespace: &str, name: &str) -> Result<CatalogSource> {
    let catalogs: Api<CatalogSource> = Api::namespaced(client.clone(), namespace);
    let catalog = poll_object(&catalogs, name, poll::EXISTENCE, catalog_ready).await?;

    info!(
        "Found catalogSource {} with last observed state {}",
        catalog.name_any(),
        CATALOG_SOURCE_READY
    );
    Ok(catalog)
}
