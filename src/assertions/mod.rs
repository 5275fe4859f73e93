// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Assertions against a live cluster, one module per area. Every helper
//! returns once its condition holds or fails with the last observed state.

pub mod connectivity;
pub mod crd;
pub mod dns;
pub mod gateway;
pub mod mesh;
pub mod olm;
pub mod rbac;

pub use connectivity::{
    assert_http_route_connection, assert_http_route_connection_with, ConnectivitySettings,
};
pub use crd::{assert_crd_exists, delete_existing_crd};
pub use dns::{assert_dns_record, gateway_dns_record_name};
pub use gateway::{
    assert_gateway_class_successful, assert_gateway_successful, assert_http_route_successful,
    create_gateway, create_gateway_class, create_http_route,
};
pub use mesh::{
    assert_istiod_control_plane, assert_ossm_operator, assert_single_running_pod, assert_smcp,
    delete_existing_smcp,
};
pub use olm::{assert_catalog_source, assert_subscription, delete_existing_subscription};
pub use rbac::{grant_cluster_admin, revoke_cluster_admin};
