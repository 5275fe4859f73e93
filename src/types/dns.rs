// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The ingress operator's `DNSRecord` resource

use crate::kubernetes::conditions::Condition;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "ingress.operator.openshift.io", version = "v1", kind = "DNSRecord")]
#[kube(namespaced)]
#[kube(status = "DnsRecordStatus")]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordSpec {
    #[serde(default)]
    pub dns_name: String,
    #[serde(default)]
    pub record_type: String,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default, rename = "recordTTL")]
    pub record_ttl: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordStatus {
    #[serde(default)]
    pub zones: Vec<DnsZoneStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DnsZoneStatus {
    #[serde(default)]
    pub dns_zone: DnsZone,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DnsZone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl DNSRecord {
    pub fn zones(&self) -> &[DnsZoneStatus] {
        self.status
            .as_ref()
            .map(|s| s.zones.as_slice())
            .unwrap_or_default()
    }
}
