use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};
use wordcount_core::contract::{
    PresignArguments, PresignResponse, METADATA_ORIGINAL_FILENAME, METADATA_USERNAME,
    PRESIGNED_URL_EXPIRY_SECS,
};

use crate::adapters::object_store::{PresignPutRequest, UploadPresigner};
use crate::handlers::resolver_arguments;

/// Issues a short-lived PUT URL for the requested key.
///
/// Never fails at the transport level: every problem is reported through
/// [`PresignResponse::Failed`].
pub fn handle_presign_event(event: &Value, presigner: &impl UploadPresigner) -> PresignResponse {
    match issue(event, presigner) {
        Ok(response) => response,
        Err(message) => {
            warn!(component = "presign_handler", event = "presign_failed", error = %message);
            PresignResponse::failed(message)
        }
    }
}

fn issue(event: &Value, presigner: &impl UploadPresigner) -> Result<PresignResponse, String> {
    let arguments = resolver_arguments(event)?;
    let arguments: PresignArguments = serde_json::from_value(arguments.clone())
        .map_err(|error| format!("invalid presign arguments: {error}"))?;
    arguments.validate().map_err(|error| error.to_string())?;

    let request = PresignPutRequest {
        key: &arguments.key,
        content_type: &arguments.content_type,
        metadata: vec![
            (METADATA_ORIGINAL_FILENAME, arguments.original_filename.as_str()),
            (METADATA_USERNAME, arguments.username.as_str()),
        ],
        expires_in: Duration::from_secs(PRESIGNED_URL_EXPIRY_SECS),
    };
    let presigned_url = presigner
        .presign_put(&request)
        .map_err(|error| error.to_string())?;

    info!(
        component = "presign_handler",
        event = "presign_issued",
        key = %arguments.key,
        expires_in_secs = PRESIGNED_URL_EXPIRY_SECS,
    );
    Ok(PresignResponse::Issued { presigned_url })
}
