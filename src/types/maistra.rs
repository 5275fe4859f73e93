// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "maistra.io", version = "v2", kind = "ServiceMeshControlPlane")]
#[kube(namespaced)]
#[kube(status = "ServiceMeshControlPlaneStatus")]
#[serde(rename_all = "camelCase")]
pub struct ServiceMeshControlPlaneSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMeshControlPlaneStatus {
    #[serde(default)]
    pub readiness: ReadinessStatus,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessStatus {
    /// Component names keyed by `ready`, `pending` and `unready`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<BTreeMap<String, Vec<String>>>,
}

impl ServiceMeshControlPlane {
    /// Components listed under `key`; empty when the key or status is absent
    pub fn components(&self, key: &str) -> &[String] {
        self.status
            .as_ref()
            .and_then(|s| s.readiness.components.as_ref())
            .and_then(|c| c.get(key))
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    pub fn has_readiness(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.readiness.components.is_some())
    }
}
