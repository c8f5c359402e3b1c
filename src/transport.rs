//! The HTTP round-tripper the client sends every request through.

use async_trait::async_trait;
use reqwest::{Request, Response};
use std::fmt;

pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Executes one fully built request. The client never talks to the network
/// except through this trait, so tests can hand it a deterministic fake.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        Ok(reqwest::Client::execute(self, request).await?)
    }
}
