// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Well-known namespaces on the cluster under test
pub mod namespaces {
    /// Holds the OSSM subscription and the Istio operator pod
    pub const OPENSHIFT_OPERATORS: &str = "openshift-operators";
    /// Where the ingress operator itself runs
    pub const INGRESS_OPERATOR: &str = "openshift-ingress-operator";
    /// Where the ingress operator places its operands (istiod, SMCP, DNSRecords)
    pub const INGRESS_OPERAND: &str = "openshift-ingress";
}

/// Names of objects the ingress operator is expected to install
pub mod names {
    pub const ISTIO_OPERATOR_DEPLOYMENT: &str = "istio-operator";
    pub const ISTIOD_DEPLOYMENT: &str = "istiod-openshift-gateway";
    pub const SMCP: &str = "openshift-gateway";
    pub const INGRESS_OPERATOR_SERVICE_ACCOUNT: &str = "ingress-operator";
    pub const CLUSTER_ADMIN_ROLE: &str = "cluster-admin";
    pub const CLUSTER_ADMIN_BINDING: &str = "cluster-admin-e2e";
}

/// Gateway API defaults used by the builders
pub mod gateway {
    /// Listener `allowedRoutes.namespaces.from` value admitting every namespace
    pub const ALL_NAMESPACES: &str = "All";
    pub const DEFAULT_PORT: i32 = 80;
    pub const ECHO_PORT: i32 = 8080;
    pub const ACCEPTED: &str = "Accepted";
    pub const RESOLVED_REFS: &str = "ResolvedRefs";
}

/// Status values observed on non-Gateway resources
pub mod status {
    pub const CRD_ESTABLISHED: &str = "Established";
    pub const DNS_RECORD_PUBLISHED: &str = "Published";
    pub const CATALOG_SOURCE_READY: &str = "READY";
    pub const POD_RUNNING: &str = "Running";
}

/// Poll budgets per call site
pub mod poll {
    use crate::kubernetes::poll::PollSettings;
    use std::time::Duration;

    const fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    /// Simple existence checks
    pub const EXISTENCE: PollSettings = PollSettings::new(secs(1), secs(30));
    /// Waiting for a deleted object to disappear
    pub const DELETION: PollSettings = PollSettings::new(secs(1), secs(60));
    pub const CRD_ESTABLISHED: PollSettings = PollSettings::new(secs(1), secs(30));
    pub const ISTIOD_DEPLOYMENT: PollSettings = PollSettings::new(secs(1), secs(60));
    pub const SMCP_READY: PollSettings = PollSettings::new(secs(1), secs(180));
    pub const GATEWAY_CLASS_ACCEPTED: PollSettings = PollSettings::new(secs(2), secs(120));
    pub const GATEWAY_ACCEPTED: PollSettings = PollSettings::new(secs(1), secs(60));
    pub const HTTP_ROUTE_ACCEPTED: PollSettings = PollSettings::new(secs(1), secs(60));
    pub const DNS_RECORD_PUBLISHED: PollSettings = PollSettings::new(secs(1), secs(60));
    pub const HOST_RESOLVES: PollSettings = PollSettings::new(secs(10), secs(300));
    pub const HTTP_OK: PollSettings = PollSettings::new(secs(5), secs(300));
    /// Per-request timeout of the connectivity probe
    pub const HTTP_REQUEST_TIMEOUT: Duration = secs(10);
}
