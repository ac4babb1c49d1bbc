pub mod issuer;
pub mod processor;
pub mod reader;
pub mod writer;

use serde_json::Value;

/// Extracts `arguments` from an AppSync direct-resolver event.
fn resolver_arguments(event: &Value) -> Result<&Value, String> {
    let Some(object) = event.as_object() else {
        return Err("resolver event must be a JSON object".to_string());
    };

    match object.get("arguments") {
        Some(arguments @ Value::Object(_)) => Ok(arguments),
        Some(_) => Err("resolver arguments must be a JSON object".to_string()),
        None => Err("resolver event is missing arguments".to_string()),
    }
}
