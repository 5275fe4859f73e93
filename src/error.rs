// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    Kubeconfig(String),

    #[error("Timed out after {timeout:?} ({attempts} attempts) waiting for {what}, last observed: {last_observed}")]
    Timeout {
        what: String,
        timeout: Duration,
        attempts: u32,
        last_observed: String,
    },

    #[error("Failed to fetch {what}: {source}")]
    Fetch {
        what: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to create {kind} {name}: {source}")]
    Create {
        kind: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Not ready: {0}")]
    NotReady(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, E2eError>;
