//! Shared fixtures for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use ocmdash::{FetchError, HttpResponse, HttpTransport, OcmClient};
use reqwest::header::HeaderMap;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

pub const BASE: &str = "http://hub.test";

mock! {
    pub Transport {}

    #[async_trait]
    impl HttpTransport for Transport {
        async fn get(&self, url: &str, headers: &HeaderMap) -> Result<HttpResponse, FetchError>;
    }
}

pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

pub fn client(transport: MockTransport) -> OcmClient {
    OcmClient::anonymous(Url::parse(BASE).unwrap(), Arc::new(transport))
}

/// Transport answering from a path table; unknown paths get a 404
pub fn routes(routes: Vec<(&str, HttpResponse)>) -> MockTransport {
    let table: HashMap<String, HttpResponse> = routes
        .into_iter()
        .map(|(path, resp)| (url(path), resp))
        .collect();

    let mut transport = MockTransport::new();
    transport.expect_get().returning(move |url, _| {
        Ok(table
            .get(url)
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(404, "not found")))
    });
    transport
}

/// Transport answering every request with `status`
pub fn always(status: u16) -> MockTransport {
    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .returning(move |_, _| Ok(HttpResponse::new(status, "{\"message\":\"boom\"}")));
    transport
}

pub fn condition(type_: &str, status: &str) -> Value {
    json!({
        "type": type_,
        "status": status,
        "reason": "Test",
        "message": "",
    })
}

pub fn cluster_json(name: &str, available: bool) -> Value {
    json!({
        "id": name,
        "name": name,
        "labels": {},
        "conditions": [
            condition(
                "ManagedClusterConditionAvailable",
                if available { "True" } else { "Unknown" }
            )
        ],
    })
}

pub fn addon_json(cluster: &str, name: &str) -> Value {
    json!({
        "name": name,
        "namespace": cluster,
        "installNamespace": "open-cluster-management-agent-addon",
        "conditions": [condition("Available", "True")],
    })
}
