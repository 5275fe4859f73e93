// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Status conditions shared by the custom resources in [`crate::types`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state condition status. Unrecognised wire values map to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl From<&str> for ConditionStatus {
    fn from(value: &str) -> Self {
        match value {
            "True" => ConditionStatus::True,
            "False" => ConditionStatus::False,
            _ => ConditionStatus::Unknown,
        }
    }
}

impl From<String> for ConditionStatus {
    fn from(value: String) -> Self {
        ConditionStatus::from(value.as_str())
    }
}

impl From<ConditionStatus> for String {
    fn from(value: ConditionStatus) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    #[schemars(with = "String")]
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

impl Condition {
    pub fn new(condition_type: &str, status: ConditionStatus, message: &str) -> Self {
        Self {
            condition_type: condition_type.to_string(),
            status,
            reason: None,
            message: Some(message.to_string()),
            last_transition_time: None,
            observed_generation: None,
        }
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }

    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// Resources exposing a flat `status.conditions` list
pub trait HasConditions {
    fn conditions(&self) -> &[Condition];

    fn find_condition(&self, condition_type: &str) -> Option<&Condition> {
        find_condition(self.conditions(), condition_type)
    }
}

pub fn find_condition<'a>(conditions: &'a [Condition], condition_type: &str) -> Option<&'a Condition> {
    conditions
        .iter()
        .find(|c| c.condition_type == condition_type)
}

/// Describe why `condition_type` is not true, or `None` when it is
pub fn unmet_condition(conditions: &[Condition], condition_type: &str) -> Option<String> {
    match find_condition(conditions, condition_type) {
        Some(c) if c.is_true() => None,
        Some(c) => Some(format!(
            "{} is {}, last recorded status message: {}",
            condition_type,
            c.status,
            c.message_or_empty()
        )),
        None => Some(format!("no {} condition reported", condition_type)),
    }
}
