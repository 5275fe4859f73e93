// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;

const DEFAULT_GATEWAY_CLASS: &str = "openshift-default";
const DEFAULT_GATEWAY_CONTROLLER: &str = "openshift.io/gateway-controller";
const DEFAULT_NAMESPACE: &str = "gateway-e2e";
const DEFAULT_ECHO_IMAGE: &str = "image-registry.openshift-image-registry.svc:5000/openshift/tools:latest";

/// Live-cluster suite configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base domain for gateway listeners, e.g. `gws.apps.example.com`
    pub gateway_domain: String,
    /// Explicit kubeconfig path; the ambient config is inferred when unset
    pub kubeconfig: Option<String>,
    pub gateway_class: String,
    pub gateway_controller: String,
    /// Namespace the suite creates its gateways and routes in
    pub namespace: String,
    pub echo_image: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let gateway_domain = env::var("E2E_GATEWAY_DOMAIN")
            .context("E2E_GATEWAY_DOMAIN environment variable not set")?;
        let kubeconfig = env::var("E2E_KUBECONFIG").ok().filter(|p| !p.is_empty());

        Ok(Config {
            gateway_domain,
            kubeconfig,
            gateway_class: var_or("E2E_GATEWAY_CLASS", DEFAULT_GATEWAY_CLASS),
            gateway_controller: var_or("E2E_GATEWAY_CONTROLLER", DEFAULT_GATEWAY_CONTROLLER),
            namespace: var_or("E2E_NAMESPACE", DEFAULT_NAMESPACE),
            echo_image: var_or("E2E_ECHO_IMAGE", DEFAULT_ECHO_IMAGE),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
