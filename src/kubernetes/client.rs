// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation for the cluster under test

use crate::config::Config;
use crate::error::{E2eError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use tracing::{info, instrument};

/// Create a client from the configured kubeconfig, or infer one from the
/// environment (KUBECONFIG, in-cluster service account) when none is set
#[instrument(skip(config))]
pub async fn create_client(config: &Config) -> Result<Client> {
    match config.kubeconfig.as_deref() {
        Some(path) => {
            let kubeconfig = tokio::fs::read_to_string(path).await.map_err(|e| {
                E2eError::Kubeconfig(format!("Failed to read kubeconfig {}: {}", path, e))
            })?;
            info!("Using kubeconfig {}", path);
            create_client_from_kubeconfig(&kubeconfig).await
        }
        None => Client::try_default()
            .await
            .map_err(|e| E2eError::Kubeconfig(format!("Failed to infer config: {}", e))),
    }
}

/// Create a Kubernetes client from a kubeconfig string
pub async fn create_client_from_kubeconfig(kubeconfig: &str) -> Result<Client> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| E2eError::Kubeconfig(format!("Failed to parse kubeconfig: {}", e)))?;

    let client_config =
        kube::Config::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
            .await
            .map_err(|e| E2eError::Kubeconfig(format!("Failed to create config: {}", e)))?;

    Client::try_from(client_config)
        .map_err(|e| E2eError::Kubeconfig(format!("Failed to create client: {}", e)))
}
