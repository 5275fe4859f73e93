// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes plumbing: client creation, the condition poller and generic
//! create/wait/delete helpers.

pub mod client;
pub mod conditions;
pub mod objects;
pub mod poll;

pub use client::create_client;
pub use conditions::{Condition, ConditionStatus, HasConditions};
pub use objects::{create_or_get, delete_and_confirm, wait_for_object};
pub use poll::{poll_object, poll_until_ready, PollSettings, Readiness};
