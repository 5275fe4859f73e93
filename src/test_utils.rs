// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

type Route = (String, String);

#[derive(Default)]
struct Script {
    responses: HashMap<Route, VecDeque<(u16, String)>>,
    calls: HashMap<Route, usize>,
}

/// A mock HTTP service replaying scripted responses per method and exact path.
///
/// Responses registered for the same route are returned in order; the last
/// one repeats forever. Unscripted routes answer 404 NotFound.
#[derive(Clone, Default)]
pub struct MockService {
    script: Arc<Mutex<Script>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .responses
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Queue a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Queue a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Queue a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Number of requests served for a method and path
    pub fn request_count(&self, method: &str, path: &str) -> usize {
        self.script
            .lock()
            .unwrap()
            .calls
            .get(&(method.to_string(), path.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut script = self.script.lock().unwrap();
        let route = (method.to_string(), path.to_string());
        *script.calls.entry(route.clone()).or_default() += 1;

        let queue = script.responses.get_mut(&route)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let (status, body) = self
            .next_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("resource", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Serialize any API object as a response body
pub fn object_json<K: Serialize>(obj: &K) -> String {
    serde_json::to_string(obj).unwrap()
}

/// A Status failure body
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(
        404,
        "NotFound",
        &format!("{} \"{}\" not found", resource, name),
    )
}

/// Create a 409 already exists response
pub fn already_exists_json(resource: &str, name: &str) -> String {
    status_json(
        409,
        "AlreadyExists",
        &format!("{} \"{}\" already exists", resource, name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_responses_replay_in_order_and_repeat_last() {
        let mock = MockService::new()
            .on_get("/a", 404, "first")
            .on_get("/a", 200, "second");

        assert_eq!(mock.next_response("GET", "/a").unwrap().1, "first");
        assert_eq!(mock.next_response("GET", "/a").unwrap().1, "second");
        assert_eq!(mock.next_response("GET", "/a").unwrap().1, "second");
        assert!(mock.next_response("GET", "/b").is_none());
        assert_eq!(mock.request_count("GET", "/a"), 3);
        assert_eq!(mock.request_count("GET", "/b"), 1);
    }
}
