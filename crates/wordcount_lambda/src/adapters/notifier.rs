use serde_json::{json, Value};
use wordcount_core::contract::ProcessingNotification;

use super::AdapterError;

pub const COMPLETE_PROCESSING_MUTATION: &str = r#"
    mutation CompleteProcessing($s3Filename: String!, $originalFilename: String!, $frequentWords: [WordCountInput!]!) {
        completeProcessing(s3Filename: $s3Filename, originalFilename: $originalFilename, frequentWords: $frequentWords) {
            s3Filename
            originalFilename
            frequentWords { word count }
        }
    }
"#;

pub trait ResultNotifier {
    fn publish(&self, notification: &ProcessingNotification) -> Result<(), AdapterError>;
}

pub fn mutation_payload(notification: &ProcessingNotification) -> Value {
    json!({
        "query": COMPLETE_PROCESSING_MUTATION,
        "variables": notification,
    })
}

/// A mutation succeeded only with HTTP 200 and no GraphQL `errors`.
pub fn check_mutation_response(status: u16, body: &str) -> Result<(), AdapterError> {
    if status != 200 {
        return Err(AdapterError::Notification(format!(
            "mutation failed with status {status}: {body}"
        )));
    }

    let response: Value = serde_json::from_str(body).map_err(|error| {
        AdapterError::Notification(format!("mutation response is not JSON: {error}"))
    })?;

    match response.get("errors") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(errors)) if errors.is_empty() => Ok(()),
        Some(errors) => Err(AdapterError::Notification(format!(
            "mutation returned errors: {errors}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use wordcount_core::contract::FrequentWords;

    use super::*;

    #[test]
    fn payload_carries_mutation_variables() {
        let words = FrequentWords::from([("cat".to_string(), 20)]);
        let notification = ProcessingNotification::new("uploads/doc1.txt", "doc1.txt", &words);

        let payload = mutation_payload(&notification);

        assert!(payload["query"]
            .as_str()
            .expect("query should be a string")
            .contains("completeProcessing"));
        assert_eq!(payload["variables"]["s3Filename"], "uploads/doc1.txt");
        assert_eq!(
            payload["variables"]["frequentWords"],
            json!([{"word": "cat", "count": 20}])
        );
    }

    #[test]
    fn accepts_clean_response() {
        let body = r#"{"data":{"completeProcessing":{"s3Filename":"x"}}}"#;
        assert!(check_mutation_response(200, body).is_ok());
        assert!(check_mutation_response(200, r#"{"data":null,"errors":[]}"#).is_ok());
    }

    #[test]
    fn rejects_non_200_status() {
        let error = check_mutation_response(401, "UnauthorizedException")
            .expect_err("non-200 should fail");
        assert!(error.to_string().contains("status 401"));
    }

    #[test]
    fn rejects_embedded_graphql_errors() {
        let body = r#"{"data":null,"errors":[{"message":"Validation error"}]}"#;
        let error = check_mutation_response(200, body).expect_err("errors should fail");
        assert!(error.to_string().contains("Validation error"));
    }
}
