//! Network calls raced against a timer.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::error::ApiErrorBody;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            body: None,
        }
    }

    pub fn post_json<B: Serialize>(url: Url, body: &B) -> Result<Self> {
        Ok(Self {
            method: Method::POST,
            url,
            body: Some(serde_json::to_value(body)?),
        })
    }
}

/// Sends `request` on its own task and races it against `timeout`.
///
/// When the timer wins the call fails with [`ClientError::Timeout`]. The
/// request task is detached rather than aborted, so the transport call may
/// still complete; its result is dropped.
pub async fn fetch_with_timeout<T: DeserializeOwned>(
    http: &Client,
    request: ApiRequest,
    timeout: Duration,
) -> Result<T> {
    let method = request.method.clone();
    let path = request.url.path().to_string();
    let call = tokio::spawn(send(http.clone(), request));

    tokio::select! {
        joined = call => {
            let body = joined??;
            debug!(%method, %path, "fetch: response received");
            Ok(serde_json::from_value(body)?)
        }
        () = tokio::time::sleep(timeout) => {
            warn!(%method, %path, timeout_secs = timeout.as_secs_f64(), "fetch: timed out");
            Err(ClientError::Timeout { timeout })
        }
    }
}

async fn send(http: Client, request: ApiRequest) -> Result<Value> {
    let mut builder = http.request(request.method, request.url);
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let err = http_error(status, &bytes);
        warn!(status = status.as_u16(), error = %err, "fetch: request rejected");
        return Err(err);
    }

    Ok(serde_json::from_slice(&bytes)?)
}

fn http_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .map(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    ClientError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
