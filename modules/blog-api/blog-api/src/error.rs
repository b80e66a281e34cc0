use blog_api_sdk::ApiError;
use serde_json::Value;

/// Build an [`ApiError`] from a non-2xx answer.
///
/// The displayed message is the body's `message`, else its `error`, else the
/// raw body text, else `fallback`. A `remainingTime` field (ban period) is
/// kept on the error.
#[must_use]
pub fn error_from_body(status: u16, body: &str, fallback: &str) -> ApiError {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    };

    let raw = body.trim();
    let message = field("message")
        .or_else(|| field("error"))
        .or_else(|| (parsed.is_none() && !raw.is_empty()).then(|| raw.to_owned()))
        .unwrap_or_else(|| fallback.to_owned());
    let remaining_time = field("remainingTime");

    match status {
        401 => ApiError::Unauthorized { message },
        403 => ApiError::Forbidden {
            message,
            remaining_time,
        },
        _ => ApiError::Rejected {
            status,
            message,
            remaining_time,
        },
    }
}
