//! The single request primitive everything else is built on.

use async_trait::async_trait;
use oti_core::{Operation, Result};
use serde_json::Value;
use std::sync::Arc;

use crate::OtiClient;

/// Sends one named operation to the service.
///
/// Implementations fail closed: a transport failure, a non-2xx status or a
/// body that is not a JSON object is an `Err`, never a partial value. A
/// served response is returned as-is whatever its `errorNo`; interpreting
/// the code is the caller's job.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// POST `operation` with `payload`. The API key is added by the gateway.
    async fn request(&self, operation: Operation, payload: &[(&str, &str)]) -> Result<Value>;
}

#[async_trait]
impl Gateway for OtiClient {
    async fn request(&self, operation: Operation, payload: &[(&str, &str)]) -> Result<Value> {
        self.post_form(operation, payload).await
    }
}

#[async_trait]
impl<G: Gateway + ?Sized> Gateway for Arc<G> {
    async fn request(&self, operation: Operation, payload: &[(&str, &str)]) -> Result<Value> {
        (**self).request(operation, payload).await
    }
}
