//! Service `errorNo` values.
//!
//! Every OTI response carries an `errorNo`/`errorMsg` pair. Zero means the
//! request was served; a handful of other values change how a caller must
//! proceed (keep polling, stop the batch, give up on the URL).

use serde_json::Value;

/// Request served; for a URL scan the verdict is available.
pub const SUCCESS: i64 = 0;

/// URL scan accepted but still running; poll again later.
pub const PENDING: i64 = 1;

/// The submitted URL was rejected as invalid.
pub const INVALID_URL: i64 = 7026;

/// Codes meaning the subscription quota is exhausted.
pub const QUOTA_EXCEEDED: [i64; 6] = [7058, 7060, 7062, 7063, 7065, 7066];

/// Codes meaning the request can never succeed with this key (abort everything).
pub const FATAL: [i64; 5] = [7001, 7002, 7003, 7005, 7006];

/// Status string reported for a served request.
pub const SUCCESS_STATUS: &str = "Success";

/// Returns true if `code` signals quota exhaustion
#[must_use]
pub fn is_quota(code: i64) -> bool {
    QUOTA_EXCEEDED.contains(&code)
}

/// Returns true if `code` signals an authentication or account failure
#[must_use]
pub fn is_fatal(code: i64) -> bool {
    FATAL.contains(&code)
}

/// Extract `errorNo` from a raw response.
#[must_use]
pub fn error_no(response: &Value) -> Option<i64> {
    response.get("errorNo").and_then(Value::as_i64)
}

/// Extract `errorMsg` from a raw response.
#[must_use]
pub fn error_msg(response: &Value) -> Option<&str> {
    response.get("errorMsg").and_then(Value::as_str)
}

/// The status string a gateway reports for a response: `"Success"` when
/// `errorNo` is zero, the service's `errorMsg` otherwise.
#[must_use]
pub fn status_of(response: &Value) -> String {
    match error_no(response) {
        Some(SUCCESS) => SUCCESS_STATUS.to_string(),
        Some(code) => error_msg(response)
            .map_or_else(|| format!("Error code {code}"), ToString::to_string),
        None => error_msg(response).unwrap_or("Unknown response").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_sets() {
        for code in QUOTA_EXCEEDED {
            assert!(is_quota(code));
            assert!(!is_fatal(code));
        }
        for code in FATAL {
            assert!(is_fatal(code));
        }
        assert!(!is_quota(INVALID_URL));
        assert!(!is_fatal(PENDING));
    }

    #[test]
    fn test_status_of() {
        assert_eq!(status_of(&json!({"errorNo": 0, "errorMsg": "Success"})), "Success");
        assert_eq!(
            status_of(&json!({"errorNo": 7002, "errorMsg": "bad key"})),
            "bad key"
        );
        assert_eq!(status_of(&json!({"errorNo": 42})), "Error code 42");
        assert_eq!(status_of(&json!({})), "Unknown response");
    }
}
