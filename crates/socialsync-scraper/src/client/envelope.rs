use serde_json::Value;

/// Returns the vendor's failure message when the body carries
/// `success: false`, or `None` for anything else (including bodies with no
/// `success` field at all).
pub(super) fn vendor_failure_message(body: &Value) -> Option<String> {
    let flag = body.get("success")?;
    let failed = match flag {
        Value::Bool(b) => !b,
        Value::String(s) => s.eq_ignore_ascii_case("false"),
        _ => false,
    };
    if !failed {
        return None;
    }

    let message = ["message", "error", "detail"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Value::Object(obj) => obj
                .get("message")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_owned()),
            _ => None,
        });

    Some(message.unwrap_or_else(|| "vendor returned success: false".to_owned()))
}
