use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use chrono::{DateTime, Utc};

use crate::adapters::object_store::{ObjectHead, PresignPutRequest, UploadPresigner, UploadStore};
use crate::adapters::AdapterError;

use super::block_on;

pub struct S3UploadStore {
    client: aws_sdk_s3::Client,
}

impl S3UploadStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl UploadStore for S3UploadStore {
    fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectHead, AdapterError> {
        let output = block_on(self.client.head_object().bucket(bucket).key(key).send())
            .map_err(|error| {
                AdapterError::ObjectStore(format!(
                    "failed to read metadata of s3://{bucket}/{key}: {}",
                    DisplayErrorContext(&error)
                ))
            })?;

        Ok(ObjectHead {
            metadata: output.metadata().cloned().unwrap_or_default(),
            last_modified: output
                .last_modified()
                .and_then(|timestamp| {
                    DateTime::<Utc>::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
                }),
        })
    }

    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, AdapterError> {
        block_on(async {
            let output = self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|error| {
                    AdapterError::ObjectStore(format!(
                        "failed to download s3://{bucket}/{key}: {}",
                        DisplayErrorContext(&error)
                    ))
                })?;
            let body = output.body.collect().await.map_err(|error| {
                AdapterError::ObjectStore(format!(
                    "failed to read body of s3://{bucket}/{key}: {error}"
                ))
            })?;
            Ok(body.into_bytes().to_vec())
        })
    }
}

pub struct S3UploadPresigner {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3UploadPresigner {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

impl UploadPresigner for S3UploadPresigner {
    fn presign_put(&self, request: &PresignPutRequest<'_>) -> Result<String, AdapterError> {
        let presigning = PresigningConfig::expires_in(request.expires_in)
            .map_err(|error| AdapterError::Presign(format!("invalid expiry: {error}")))?;

        let mut put = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(request.key)
            .content_type(request.content_type);
        for (name, value) in &request.metadata {
            put = put.metadata(*name, *value);
        }

        let presigned = block_on(put.presigned(presigning)).map_err(|error| {
            AdapterError::Presign(format!(
                "failed to presign upload of {}: {}",
                request.key,
                DisplayErrorContext(&error)
            ))
        })?;
        Ok(presigned.uri().to_string())
    }
}
