use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

/// Accepts `"42"`, `42` or `null` and yields the value as text.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrNumber::String(s) => s,
        StringOrNumber::Integer(i) => i.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
    }))
}

/// Extracts the human-readable message from an error body.
///
/// The backend is not consistent about the key, so `error`, `Message` and
/// `message` are tried in that order.
pub fn error_message(body: &serde_json::Value) -> Option<String> {
    ["error", "Message", "message"]
        .iter()
        .find_map(|key| {
            body.get(*key)
                .and_then(|v| v.as_str())
                .filter(|msg| !msg.trim().is_empty())
        })
        .map(str::to_string)
}
