use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use url::Url;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Blob storage for employee photos.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key` and returns a URL the browser can load.
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;
}

pub fn create_s3_client(sdk_config: &SdkConfig, config: &AppConfig) -> S3Client {
    // Emulators (LocalStack, MinIO) only resolve path-style addressing.
    let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();

    S3Client::from_conf(s3_config)
}

pub struct S3ObjectStore {
    client: S3Client,
    bucket_name: String,
    region: String,
    endpoint_url: Option<Url>,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, config: &AppConfig) -> Self {
        Self {
            client,
            bucket_name: config.bucket_name.clone(),
            region: config.region.clone(),
            endpoint_url: config.endpoint_url.clone(),
        }
    }

    pub fn object_url(&self, key: &str) -> Result<String, AppError> {
        object_url(&self.bucket_name, &self.region, self.endpoint_url.as_ref(), key)
    }
}

fn object_url(
    bucket: &str,
    region: &str,
    endpoint: Option<&Url>,
    key: &str,
) -> Result<String, AppError> {
    let base = match endpoint {
        Some(endpoint) => endpoint.clone(),
        None => Url::parse(&format!("https://{}.s3.{}.amazonaws.com/", bucket, region))
            .map_err(|err| AppError::ObjectStoreFailure(format!("Invalid bucket URL: {}", err)))?,
    };

    let mut url = base;
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            AppError::ObjectStoreFailure("Endpoint URL cannot be a base".to_string())
        })?;
        segments.pop_if_empty();
        if endpoint.is_some() {
            segments.push(bucket);
        }
        segments.push(key);
    }

    Ok(url.to_string())
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|err| {
                log::error!("Error uploading {} to S3: {:?}", key, err);
                AppError::ObjectStoreFailure(format!("Failed to upload {}", key))
            })?;

        log::debug!("Uploaded {} ({} bytes) to bucket {}", key, size, self.bucket_name);
        self.object_url(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_hosted_url_by_default() {
        let url =
            object_url("staff-photos", "ap-southeast-1", None, "101_1700000000000_ab.png").unwrap();
        assert_eq!(
            url,
            "https://staff-photos.s3.ap-southeast-1.amazonaws.com/101_1700000000000_ab.png"
        );
    }

    #[test]
    fn path_style_url_with_endpoint_override() {
        let endpoint = Url::parse("http://localhost:4566").unwrap();
        let url = object_url("staff-photos", "us-east-1", Some(&endpoint), "7_1_x.gif").unwrap();
        assert_eq!(url, "http://localhost:4566/staff-photos/7_1_x.gif");
    }

    #[test]
    fn endpoint_with_prefix_path_is_kept() {
        let endpoint = Url::parse("http://minio.local:9000/storage/").unwrap();
        let url = object_url("b", "us-east-1", Some(&endpoint), "k.jpg").unwrap();
        assert_eq!(url, "http://minio.local:9000/storage/b/k.jpg");
    }
}
