use std::time::SystemTime;

use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningParams, SigningSettings};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use wordcount_core::contract::ProcessingNotification;

use crate::adapters::notifier::{check_mutation_response, mutation_payload, ResultNotifier};
use crate::adapters::AdapterError;

use super::block_on;

const SIGNING_SERVICE: &str = "appsync";

/// Publishes results through an IAM-authorized AppSync mutation, signed with
/// the Lambda's own short-lived credentials.
pub struct AppSyncNotifier {
    http: reqwest::Client,
    credentials: SharedCredentialsProvider,
    endpoint: String,
    region: String,
}

impl AppSyncNotifier {
    pub fn new(
        sdk_config: &aws_config::SdkConfig,
        endpoint: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, AdapterError> {
        let credentials = sdk_config.credentials_provider().ok_or_else(|| {
            AdapterError::Notification("no AWS credentials provider is configured".to_string())
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            credentials,
            endpoint: endpoint.into(),
            region: region.into(),
        })
    }

    async fn post_signed(&self, body: Vec<u8>) -> Result<(u16, String), AdapterError> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|error| AdapterError::Notification(format!("no credentials: {error}")))?;
        let identity = Identity::from(credentials);

        let signing_params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(SIGNING_SERVICE)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|error| AdapterError::Notification(format!("signing params: {error}")))?
            .into();

        let headers = [("content-type", "application/json")];
        let signable = SignableRequest::new(
            "POST",
            self.endpoint.as_str(),
            headers.iter().copied(),
            SignableBody::Bytes(&body),
        )
        .map_err(|error| AdapterError::Notification(format!("unsignable request: {error}")))?;
        let (instructions, _signature) = sign(signable, &signing_params)
            .map_err(|error| AdapterError::Notification(format!("signing failed: {error}")))?
            .into_parts();

        let mut request = self.http.post(&self.endpoint);
        for (name, value) in headers.iter().copied().chain(instructions.headers()) {
            request = request.header(name, value);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|error| AdapterError::Notification(format!("request failed: {error}")))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|error| AdapterError::Notification(format!("unreadable response: {error}")))?;
        Ok((status, text))
    }
}

impl ResultNotifier for AppSyncNotifier {
    fn publish(&self, notification: &ProcessingNotification) -> Result<(), AdapterError> {
        let body = serde_json::to_vec(&mutation_payload(notification)).map_err(|error| {
            AdapterError::Notification(format!("failed to encode mutation: {error}"))
        })?;

        let (status, text) = block_on(self.post_signed(body))?;
        tracing::debug!(
            component = "appsync_notifier",
            event = "mutation_response",
            status,
            body = %text,
        );
        check_mutation_response(status, &text)
    }
}
