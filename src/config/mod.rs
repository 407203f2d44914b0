use crate::errors::AppError;
use std::env;
use url::Url;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub region: String,
    pub credentials: Option<StaticCredentials>,
    pub endpoint_url: Option<Url>,
    pub bucket_name: String,
    pub table_name: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| first_set(&lookup, keys);
        let require = |keys: &[&str]| {
            first_set(&lookup, keys)
                .ok_or_else(|| AppError::Config(format!("{} must be set", keys[0])))
        };

        let region = require(&["AWS_REGION", "REGION"][..])?;
        let bucket_name = require(&["S3_BUCKET_NAME"][..])?;
        let table_name = require(&["DYNAMODB_TABLE_NAME"][..])?;

        let access_key_id = get(&["AWS_ACCESS_KEY_ID", "ACCESS_KEY_ID"][..]);
        let secret_access_key = get(&["AWS_SECRET_ACCESS_KEY", "SECRET_ACCESS_KEY"][..]);
        let credentials = match (access_key_id, secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
            }),
            (None, None) => None,
            _ => {
                return Err(AppError::Config(
                    "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together".to_string(),
                ))
            }
        };

        let endpoint_url = get(&["AWS_ENDPOINT_URL"][..])
            .map(|raw| {
                Url::parse(&raw)
                    .map_err(|err| AppError::Config(format!("Invalid AWS_ENDPOINT_URL: {}", err)))
            })
            .transpose()?;

        let host = get(&["HOST"][..]).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(&["PORT"][..]) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("Invalid PORT: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            region,
            credentials,
            endpoint_url,
            bucket_name,
            table_name,
            host,
            port,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// First non-empty value among `keys`.
fn first_set<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
