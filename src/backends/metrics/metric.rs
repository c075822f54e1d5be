// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::errors::WorkerError;

/// A count of one kind of event for one user.
///
/// Wire format:
/// ```json
/// {"username": "ana", "count": 3, "kite_call": "login"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMetric {
    pub username: String,
    pub count: i64,
    #[serde(rename = "kite_call")]
    pub metric: String,
}

impl CountMetric {
    /// Decode a delivery body.
    pub fn from_slice(body: &[u8]) -> Result<Self, WorkerError> {
        serde_json::from_slice(body).map_err(|e| WorkerError::MalformedPayload {
            body: String::from_utf8_lossy(body).into_owned(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_table_driven() {
        let test_cases: Vec<(&str, &[u8], Option<CountMetric>)> = vec![
            (
                "valid payload",
                br#"{"username":"ana","count":12,"kite_call":"login"}"#,
                Some(CountMetric {
                    username: "ana".to_string(),
                    count: 12,
                    metric: "login".to_string(),
                }),
            ),
            ("not json", b"message 1", None),
            ("missing field", br#"{"username":"ana","count":1}"#, None),
            ("wrong type", br#"{"username":"ana","count":"many","kite_call":"x"}"#, None),
        ];

        for (name, body, expected) in test_cases {
            let result = CountMetric::from_slice(body);
            match expected {
                Some(metric) => assert_eq!(result.unwrap(), metric, "case: {}", name),
                None => assert!(
                    matches!(result, Err(WorkerError::MalformedPayload { .. })),
                    "case: {}",
                    name
                ),
            }
        }
    }

    #[test]
    fn test_serializes_metric_as_kite_call() {
        let metric = CountMetric {
            username: "bo".to_string(),
            count: 1,
            metric: "upload".to_string(),
        };
        let json = serde_json::to_string(&metric).unwrap();
        assert!(json.contains("\"kite_call\":\"upload\""));
    }
}
