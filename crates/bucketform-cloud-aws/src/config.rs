//! Provider configuration
//!
//! The host passes the provider block as a JSON object. Fields left unset
//! there fall back to environment variables, and anything still unset is
//! resolved by the AWS default chain (profile, IMDS, ...).

use crate::error::{AwsError, Result};
use bucketform_cloud::StateValue;
use serde::{Deserialize, Serialize};

pub const ENV_REGION: &str = "BUCKETFORM_REGION";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_ENDPOINT_URL: &str = "BUCKETFORM_ENDPOINT_URL";
pub const ENV_FORCE_PATH_STYLE: &str = "BUCKETFORM_FORCE_PATH_STYLE";

/// S3 provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// AWS region, e.g. `eu-west-1`
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services (MinIO, Ceph, LocalStack)
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`
    #[serde(default)]
    pub force_path_style: Option<bool>,
}

impl ProviderConfig {
    /// Decode the provider block handed over by the host
    pub fn from_state(value: &StateValue) -> Result<Self> {
        let config: Self = value
            .get()
            .map_err(|e| AwsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        let region = std::env::var(ENV_REGION)
            .or_else(|_| std::env::var(ENV_AWS_REGION))
            .ok()
            .filter(|v| !v.is_empty());
        let endpoint_url = std::env::var(ENV_ENDPOINT_URL)
            .ok()
            .filter(|v| !v.is_empty());
        let force_path_style = match std::env::var(ENV_FORCE_PATH_STYLE) {
            Ok(v) if !v.is_empty() => Some(parse_bool(ENV_FORCE_PATH_STYLE, &v)?),
            _ => None,
        };

        let config = Self {
            region,
            endpoint_url,
            force_path_style,
        };
        config.validate()?;
        Ok(config)
    }

    /// Fill fields left unset with values from the environment
    pub fn merge_env(self) -> Result<Self> {
        let env = Self::from_env()?;
        Ok(Self {
            region: self.region.or(env.region),
            endpoint_url: self.endpoint_url.or(env.endpoint_url),
            force_path_style: self.force_path_style.or(env.force_path_style),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(region) = &self.region {
            if region.trim().is_empty() {
                return Err(AwsError::InvalidConfig("region must not be empty".to_string()));
            }
        }

        if let Some(endpoint) = &self.endpoint_url {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(AwsError::InvalidConfig(format!(
                    "endpoint_url must start with http:// or https://, got '{}'",
                    endpoint
                )));
            }
        }

        Ok(())
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(AwsError::InvalidConfig(format!(
            "{} must be a boolean, got '{}'",
            var, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    const ALL_VARS: [&str; 4] = [
        ENV_REGION,
        ENV_AWS_REGION,
        ENV_ENDPOINT_URL,
        ENV_FORCE_PATH_STYLE,
    ];

    fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|v| (*v, None)).collect()
    }

    #[test]
    fn test_from_state() {
        let value = StateValue::new(json!({
            "region": "eu-west-1",
            "endpoint_url": "http://localhost:9000",
            "force_path_style": true
        }));
        let config = ProviderConfig::from_state(&value).unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.force_path_style, Some(true));
    }

    #[test]
    fn test_from_state_rejects_unknown_field() {
        let value = StateValue::new(json!({ "regoin": "eu-west-1" }));
        assert!(matches!(
            ProviderConfig::from_state(&value),
            Err(AwsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_endpoint() {
        let value = StateValue::new(json!({ "endpoint_url": "localhost:9000" }));
        let err = ProviderConfig::from_state(&value).unwrap_err();
        assert!(err.to_string().contains("endpoint_url must start with"));
    }

    #[test]
    #[serial]
    fn test_from_env_prefers_own_region() {
        let mut vars = cleared();
        vars[0] = (ENV_REGION, Some("ap-northeast-1"));
        vars[1] = (ENV_AWS_REGION, Some("us-west-2"));
        temp_env::with_vars(vars, || {
            let config = ProviderConfig::from_env().unwrap();
            assert_eq!(config.region.as_deref(), Some("ap-northeast-1"));
        });
    }

    #[test]
    #[serial]
    fn test_from_env_falls_back_to_aws_region() {
        let mut vars = cleared();
        vars[1] = (ENV_AWS_REGION, Some("us-west-2"));
        temp_env::with_vars(vars, || {
            let config = ProviderConfig::from_env().unwrap();
            assert_eq!(config.region.as_deref(), Some("us-west-2"));
            assert_eq!(config.endpoint_url, None);
            assert_eq!(config.force_path_style, None);
        });
    }

    #[test]
    #[serial]
    fn test_from_env_bad_bool() {
        let mut vars = cleared();
        vars[3] = (ENV_FORCE_PATH_STYLE, Some("maybe"));
        temp_env::with_vars(vars, || {
            let err = ProviderConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("must be a boolean"));
        });
    }

    #[test]
    #[serial]
    fn test_merge_env_keeps_explicit_values() {
        let mut vars = cleared();
        vars[0] = (ENV_REGION, Some("us-west-2"));
        vars[2] = (ENV_ENDPOINT_URL, Some("http://minio:9000"));
        vars[3] = (ENV_FORCE_PATH_STYLE, Some("TRUE"));
        temp_env::with_vars(vars, || {
            let explicit = ProviderConfig {
                region: Some("eu-central-1".to_string()),
                ..Default::default()
            };
            let merged = explicit.merge_env().unwrap();
            assert_eq!(merged.region.as_deref(), Some("eu-central-1"));
            assert_eq!(merged.endpoint_url.as_deref(), Some("http://minio:9000"));
            assert_eq!(merged.force_path_style, Some(true));
        });
    }
}
