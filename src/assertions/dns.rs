// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! DNSRecord lookup for a Gateway's wildcard listener.
//!
//! The ingress operator names the record it publishes for a gateway
//! `{gateway}-{hash}-wildcard`, where `hash` is the 32-bit FNV-1a hash of the
//! listener domain printed in decimal and re-encoded into a vowel-free
//! alphabet.

use crate::constants::{poll, status::DNS_RECORD_PUBLISHED};
use crate::error::{E2eError, Result};
use crate::kubernetes::conditions::unmet_condition;
use crate::kubernetes::{poll_object, PollSettings, Readiness};
use crate::types::dns::DNSRecord;
use crate::types::gateway::Gateway;
use kube::{Api, Client};
use tracing::{info, instrument};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Characters that cannot spell words in generated names
const ALPHANUMS: &[u8] = b"bcdfghjklmnpqrstvwxz2456789";

fn fnv1a32(data: &[u8]) -> u32 {
    data.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

fn safe_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| char::from(ALPHANUMS[usize::from(b) % ALPHANUMS.len()]))
        .collect()
}

/// Hash segment of the DNSRecord name for `domain`
pub fn dns_record_hash(domain: &str) -> String {
    safe_encode(&fnv1a32(domain.as_bytes()).to_string())
}

/// Domain of the gateway's first listener as the operator writes it: fully
/// qualified with a trailing dot, or empty when the listener has no hostname
pub fn gateway_listener_domain(gateway: &Gateway) -> String {
    gateway
        .first_listener_hostname()
        .map(|h| {
            if h.ends_with('.') {
                h.to_string()
            } else {
                format!("{}.", h)
            }
        })
        .unwrap_or_default()
}

/// Namespace and name of the DNSRecord published for `gateway`'s listener
pub fn gateway_dns_record_name(gateway: &Gateway) -> Result<(String, String)> {
    let (Some(name), Some(namespace)) = (
        gateway.metadata.name.as_ref(),
        gateway.metadata.namespace.as_ref(),
    ) else {
        return Err(E2eError::Precondition(
            "gateway has no name or namespace".to_string(),
        ));
    };

    let domain = gateway_listener_domain(gateway);
    Ok((
        namespace.clone(),
        format!("{}-{}-wildcard", name, dns_record_hash(&domain)),
    ))
}

fn published(record: &DNSRecord) -> Readiness<()> {
    let zones = record.zones();
    if zones.is_empty() {
        return Readiness::pending("no zones reported");
    }

    let mut last = String::new();
    for zone in zones {
        match unmet_condition(&zone.conditions, DNS_RECORD_PUBLISHED) {
            None => return Readiness::Ready(()),
            Some(message) => last = message,
        }
    }
    Readiness::Pending(last)
}

/// Wait for the DNSRecord to be Published in at least one zone
pub async fn assert_dns_record(client: &Client, namespace: &str, name: &str) -> Result<DNSRecord> {
    assert_dns_record_with(client, namespace, name, poll::DNS_RECORD_PUBLISHED).await
}

#[instrument(skip(client))]
pub async fn assert_dns_record_with(
    client: &Client,
    namespace: &str,
    name: &str,
    settings: PollSettings,
) -> Result<DNSRecord> {
    let records: Api<DNSRecord> = Api::namespaced(client.clone(), namespace);
    let record = poll_object(&records, name, settings, published).await?;

    info!(
        "Found DNSRecord {}/{} {} for {}",
        namespace, name, DNS_RECORD_PUBLISHED, record.spec.dns_name
    );
    Ok(record)
}
