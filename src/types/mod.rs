// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed custom resources the assertions read and create.

pub mod dns;
pub mod gateway;
pub mod maistra;
pub mod olm;

pub use dns::DNSRecord;
pub use gateway::{Gateway, GatewayClass, HTTPRoute};
pub use maistra::ServiceMeshControlPlane;
pub use olm::{CatalogSource, Subscription};
