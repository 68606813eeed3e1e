use serde_json::Value;

use crate::error::{ClientError, ErrorCode};

/// Backend responses are either a raw payload or wrapped as
/// `{ success, status, status_code, message, error, data }`.
/// Returns the payload, or the failure the envelope describes.
pub fn unwrap_envelope(status: u16, body: Value) -> Result<Value, ClientError> {
    if !(200..300).contains(&status) {
        return Err(failure_from_body(status, &body));
    }

    if !is_envelope(&body) {
        return Ok(body);
    }

    let failed = body.get("success").and_then(Value::as_bool) == Some(false)
        || body.get("status").and_then(Value::as_str) == Some("failure");
    if failed {
        return Err(failure_from_body(status, &body));
    }

    match body {
        Value::Object(mut map) => Ok(map.remove("data").unwrap_or(Value::Null)),
        other => Ok(other),
    }
}

fn is_envelope(body: &Value) -> bool {
    let Some(map) = body.as_object() else {
        return false;
    };
    map.contains_key("success") || map.contains_key("status_code") || map.contains_key("status")
}

fn failure_from_body(status: u16, body: &Value) -> ClientError {
    let code = body
        .get("status_code")
        .and_then(Value::as_str)
        .and_then(ErrorCode::from_code)
        .unwrap_or_else(|| match ErrorCode::from_http_status(status) {
            // A 2xx carrying success=false still failed
            ErrorCode::Success => ErrorCode::BasicError,
            code => code,
        });

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| code.message().to_string());

    ClientError::api(status, code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_payload_passes_through() {
        let body = json!({"menus": [{"title": "Dashboard"}]});
        assert_eq!(unwrap_envelope(200, body.clone()).unwrap(), body);
    }

    #[test]
    fn paginated_body_is_not_mistaken_for_envelope() {
        let body = json!({"data": [], "total": 0, "page": 1, "page_size": 10, "total_pages": 0});
        assert_eq!(unwrap_envelope(200, body.clone()).unwrap(), body);
    }

    #[test]
    fn success_envelope_yields_data() {
        let body = json!({"success": true, "status_code": "0000", "data": {"menus": []}});
        assert_eq!(unwrap_envelope(200, body).unwrap(), json!({"menus": []}));
    }

    #[test]
    fn failure_envelope_carries_backend_code() {
        let body = json!({"status": "failure", "status_code": "0411", "message": "token expired"});
        match unwrap_envelope(200, body) {
            Err(ClientError::Api { code, message, .. }) => {
                assert_eq!(code, ErrorCode::ExpiredToken);
                assert_eq!(message, "token expired");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn http_failure_without_body_uses_status_mapping() {
        match unwrap_envelope(404, Value::Null) {
            Err(ClientError::Api { status, code, .. }) => {
                assert_eq!(status, 404);
                assert_eq!(code, ErrorCode::NotFound);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
