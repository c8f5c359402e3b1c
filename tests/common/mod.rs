#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::{Method, Request, Response};
use std::sync::{Arc, Mutex};
use upbank::{Client, Transport, TransportError};

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
struct Route {
    pattern: &'static str,
    status: u16,
    body: String,
}

/// Serves fixtures by URL substring; the first matching route wins.
#[derive(Debug, Default, Clone)]
pub struct FixtureTransport {
    routes: Vec<Route>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &'static str, status: u16, fixture: &str) -> Self {
        self.routes.push(Route {
            pattern,
            status,
            body: load_fixture(fixture),
        });
        self
    }

    /// Respond with `status` and no body.
    pub fn empty(mut self, pattern: &'static str, status: u16) -> Self {
        self.routes.push(Route {
            pattern,
            status,
            body: String::new(),
        });
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn client(&self) -> Client {
        Client::builder("up:yeah:test-token")
            .transport(self.clone())
            .build()
            .unwrap()
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let url = request.url().to_string();
        self.requests.lock().unwrap().push(Recorded {
            method: request.method().clone(),
            url: url.clone(),
            body: request
                .body()
                .and_then(|b| b.as_bytes())
                .map(|b| String::from_utf8_lossy(b).into_owned()),
        });
        let route = self
            .routes
            .iter()
            .find(|r| url.contains(r.pattern))
            .ok_or_else(|| format!("no fixture for {url}"))?;
        Ok(http::Response::builder()
            .status(route.status)
            .body(route.body.clone())
            .unwrap()
            .into())
    }
}
