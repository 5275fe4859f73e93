// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kind-agnostic create, existence and deletion helpers

use crate::error::{E2eError, Result};
use crate::kubernetes::poll::{poll_object, poll_until_ready, PollSettings, Readiness};
use kube::{
    api::{DeleteParams, PostParams},
    Api, Resource, ResourceExt,
};
use kube_runtime::wait::{conditions::is_deleted, Condition};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{debug, info};

/// Human readable `Kind name` label for logs and errors
pub fn describe<K>(name: &str) -> String
where
    K: Resource,
    K::DynamicType: Default,
{
    format!("{} {}", K::kind(&K::DynamicType::default()), name)
}

pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

pub fn is_already_exists(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 409 && resp.reason == "AlreadyExists")
}

/// Requests the API server rejected as invalid; retrying them cannot help
pub fn is_malformed_request(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 400 || resp.code == 422)
}

/// Create `obj`, or return the object already stored under its name.
pub async fn create_or_get<K>(api: &Api<K>, obj: &K) -> Result<K>
where
    K: Resource + Clone + Serialize + DeserializeOwned + Debug,
    K::DynamicType: Default,
{
    let kind = K::kind(&K::DynamicType::default()).to_string();
    let Some(name) = obj.meta().name.clone() else {
        return Err(E2eError::Precondition(format!("{} has no name", kind)));
    };

    match api.create(&PostParams::default(), obj).await {
        Ok(created) => {
            info!("Created {} {}", kind, name);
            Ok(created)
        }
        Err(e) if is_already_exists(&e) => {
            debug!("{} {} already exists, fetching it", kind, name);
            api.get(&name)
                .await
                .map_err(|source| E2eError::Create { kind, name, source })
        }
        Err(source) => Err(E2eError::Create { kind, name, source }),
    }
}

/// Wait until `name` can be fetched
pub async fn wait_for_object<K>(api: &Api<K>, name: &str, settings: PollSettings) -> Result<K>
where
    K: Resource + Clone + DeserializeOwned + Debug,
    K::DynamicType: Default,
{
    poll_object(api, name, settings, |_| Readiness::Ready(())).await
}

/// Delete an existing object and wait until it is gone.
///
/// The object must show up within `find`. Deletion is confirmed once the name
/// is not found, or once it resolves to an object with a different UID (it was
/// recreated by a controller in the meantime).
pub async fn delete_and_confirm<K>(
    api: &Api<K>,
    name: &str,
    find: PollSettings,
    confirm: PollSettings,
) -> Result<()>
where
    K: Resource + Clone + DeserializeOwned + Debug,
    K::DynamicType: Default,
{
    let label = describe::<K>(name);
    let existing = wait_for_object(api, name, find).await?;
    let Some(uid) = existing.uid() else {
        return Err(E2eError::Precondition(format!("{} has no uid", label)));
    };

    match api.delete(name, &DeleteParams::default()).await {
        Ok(_) => debug!("Delete request for {} accepted", label),
        Err(e) if is_not_found(&e) => {
            info!("{} was already gone", label);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let gone = is_deleted::<K>(&uid);
    let gone = &gone;
    let label_ref = &label;
    poll_until_ready(&format!("{} to be deleted", label), confirm, move || async move {
        match api.get_opt(name).await {
            Ok(current) if gone.matches_object(current.as_ref()) => Ok(Readiness::Ready(())),
            Ok(_) => Ok(Readiness::pending(format!("{} still exists", label_ref))),
            Err(e) => Ok(Readiness::pending(format!(
                "failed to get {}: {}",
                label_ref, e
            ))),
        }
    })
    .await?;

    info!("Deleted {}", label);
    Ok(())
}
