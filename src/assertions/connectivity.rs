// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! External connectivity probe for a route exposed through a Gateway.
//!
//! The probe walks the path a client would take: the operator publishes the
//! gateway's wildcard DNSRecord, the route's hostname resolves, and finally a
//! plain HTTP GET against it answers `200 OK`.

use crate::assertions::dns::{assert_dns_record_with, gateway_dns_record_name};
use crate::constants::poll;
use crate::error::{E2eError, Result};
use crate::kubernetes::{poll_until_ready, PollSettings, Readiness};
use crate::types::gateway::Gateway;
use http::StatusCode;
use kube::Client;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::lookup_host;
use tracing::{debug, info, instrument};
use url::{Host, Url};

/// Poll budgets of the connectivity probe
#[derive(Debug, Clone, Copy)]
pub struct ConnectivitySettings {
    pub dns_record: PollSettings,
    pub resolve: PollSettings,
    pub http: PollSettings,
    /// Timeout of a single HTTP request
    pub request_timeout: Duration,
}

impl Default for ConnectivitySettings {
    fn default() -> Self {
        Self {
            dns_record: poll::DNS_RECORD_PUBLISHED,
            resolve: poll::HOST_RESOLVES,
            http: poll::HTTP_OK,
            request_timeout: poll::HTTP_REQUEST_TIMEOUT,
        }
    }
}

/// Check that `hostname` is reachable through `gateway` from outside the cluster
pub async fn assert_http_route_connection(
    client: &Client,
    hostname: &str,
    gateway: &Gateway,
) -> Result<()> {
    assert_http_route_connection_with(client, hostname, gateway, &ConnectivitySettings::default())
        .await
}

#[instrument(skip(client, gateway, settings))]
pub async fn assert_http_route_connection_with(
    client: &Client,
    hostname: &str,
    gateway: &Gateway,
    settings: &ConnectivitySettings,
) -> Result<()> {
    let (namespace, name) = gateway_dns_record_name(gateway)?;
    assert_dns_record_with(client, &namespace, &name, settings.dns_record).await?;

    let url = route_url(hostname)?;
    let port = url.port_or_known_default().unwrap_or(80);

    match url.host() {
        Some(Host::Domain(domain)) => {
            let addr = wait_for_host(domain, port, settings.resolve).await?;
            info!("Resolved {} to {}", domain, addr);
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {
            debug!("{} is an IP address, skipping resolution", hostname);
        }
        None => {
            return Err(E2eError::Precondition(format!(
                "hostname {} has no host part",
                hostname
            )))
        }
    }

    wait_for_http_ok(&url, settings).await?;
    info!("Got {} from {}", StatusCode::OK, url);
    Ok(())
}

/// `http://` URL of the route; bare IPv6 literals are bracketed
fn route_url(hostname: &str) -> Result<Url> {
    let url = match hostname.parse::<IpAddr>() {
        Ok(IpAddr::V6(ip)) => format!("http://[{}]", ip),
        _ => format!("http://{}", hostname),
    };
    Url::parse(&url)
        .map_err(|e| E2eError::Precondition(format!("invalid hostname {}: {}", hostname, e)))
}

async fn wait_for_host(domain: &str, port: u16, settings: PollSettings) -> Result<SocketAddr> {
    poll_until_ready(&format!("{} to resolve", domain), settings, move || async move {
        Ok(match lookup_host((domain, port)).await {
            Ok(mut addrs) => match addrs.next() {
                Some(addr) => Readiness::Ready(addr),
                None => Readiness::pending(format!("{} resolved to no addresses", domain)),
            },
            Err(e) => Readiness::pending(format!("failed to resolve {}: {}", domain, e)),
        })
    })
    .await
}

async fn wait_for_http_ok(url: &Url, settings: &ConnectivitySettings) -> Result<()> {
    // Routes are probed directly; certificates of the wildcard listener are not trusted
    let http = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .no_proxy()
        .timeout(settings.request_timeout)
        .build()?;
    let http = &http;

    poll_until_ready(&format!("{} to answer", url), settings.http, move || async move {
        Ok(match http.get(url.clone()).send().await {
            Ok(response) if response.status() == StatusCode::OK => Readiness::Ready(()),
            Ok(response) => Readiness::pending(format!("got status {}", response.status())),
            Err(e) => Readiness::pending(format!("request failed: {}", e)),
        })
    })
    .await
}
