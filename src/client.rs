// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! HTTP client for the Ficsit Remote Monitoring API.
//!
//! Every endpoint answers `GET {base}{route}` with either a JSON array of
//! entity objects or, when there is nothing to report, a single empty JSON
//! object. The empty object is the API's documented "no data" shape and
//! decodes to a zero-length, successful result; anything else that is not an
//! array is a hard decode error.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FrmError, Result};

/// Network timeout for a single poll request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one FRM webserver, shared by all collectors.
#[derive(Debug, Clone)]
pub struct FrmClient {
    http: reqwest::Client,
    base: String,
}

impl FrmClient {
    /// Create a client against the given base address, e.g.
    /// `http://localhost:8080`.
    pub fn new(base: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|source| FrmError::Fetch {
                url: String::from("<client setup>"),
                source,
            })?;
        Ok(Self {
            http,
            base: base.into(),
        })
    }

    /// Fetch one endpoint and decode its payload into typed entity records.
    ///
    /// Timeouts and transport failures surface as [`FrmError::Fetch`]; shape
    /// errors as [`FrmError::Decode`]. The caller skips emission for this
    /// entity kind on error without aborting other kinds.
    pub async fn fetch<T: DeserializeOwned>(&self, route: &str) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base, route);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| FrmError::Fetch {
                url: url.clone(),
                source,
            })?;
        let body = response.text().await.map_err(|source| FrmError::Fetch {
            url: url.clone(),
            source,
        })?;
        decode_payload(&url, &body)
    }

    /// Fetch one endpoint as raw, undecoded records for the relational cache.
    pub async fn fetch_raw(&self, route: &str) -> Result<Vec<Value>> {
        self.fetch(route).await
    }
}

/// Decode one response body into an ordered sequence of entity records.
///
/// - JSON array: typed element-wise decode; a type mismatch in a required
///   field fails the whole payload.
/// - Single empty object: zero records, success.
/// - Anything else: decode error.
pub fn decode_payload<T: DeserializeOwned>(url: &str, body: &str) -> Result<Vec<T>> {
    let value: Value = serde_json::from_str(body).map_err(|e| FrmError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(|e| FrmError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        }),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        other => Err(FrmError::Decode {
            url: url.to_string(),
            reason: format!("expected array or empty object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PowerDetails;

    #[test]
    fn test_decode_array() {
        let body = r#"[{"CircuitID": 1, "PowerConsumed": 2.5}, {"CircuitID": 2}]"#;
        let details: Vec<PowerDetails> = decode_payload("test", body).unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].power_consumed, 2.5);
        assert_eq!(details[1].power_consumed, 0.0);
    }

    #[test]
    fn test_decode_empty_object_is_zero_records() {
        let details: Vec<PowerDetails> = decode_payload("test", "{}").unwrap();
        assert!(details.is_empty());
    }

    #[test]
    fn test_decode_empty_array() {
        let details: Vec<PowerDetails> = decode_payload("test", "[]").unwrap();
        assert!(details.is_empty());
    }

    #[test]
    fn test_decode_non_empty_object_is_error() {
        let result: Result<Vec<PowerDetails>> =
            decode_payload("test", r#"{"CircuitID": 1}"#);
        assert!(matches!(result, Err(FrmError::Decode { .. })));
    }

    #[test]
    fn test_decode_malformed_json_is_error() {
        let result: Result<Vec<PowerDetails>> = decode_payload("test", "not json");
        assert!(matches!(result, Err(FrmError::Decode { .. })));
    }

    #[test]
    fn test_decode_type_mismatch_is_error() {
        let body = r#"[{"CircuitID": "not a number"}]"#;
        let result: Result<Vec<PowerDetails>> = decode_payload("test", body);
        assert!(matches!(result, Err(FrmError::Decode { .. })));
    }

    #[test]
    fn test_decode_raw_values() {
        let body = r#"[{"anything": true}, {"Name": "x"}]"#;
        let raw: Vec<Value> = decode_payload("test", body).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0]["anything"], Value::Bool(true));
    }
}
