//! Configuration for the billing dashboard

/// Where the application is deployed
///
/// Hosted (cloud) deployments route billing errors to the in-app bug
/// report flow; self-hosted deployments fall back to a contact email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// Hosted cloud deployment
    Cloud,
    /// Self-hosted deployment
    SelfHosted,
}

impl std::str::FromStr for Deployment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cloud" => Ok(Self::Cloud),
            "self_hosted" | "self-hosted" | "selfhosted" => Ok(Self::SelfHosted),
            _ => Err(ConfigError::Invalid("VANTAGE_DEPLOYMENT")),
        }
    }
}

/// Billing dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Deployment mode
    pub deployment: Deployment,
    /// Contact address offered on self-hosted deployments when billing
    /// state cannot be retrieved
    pub support_email: String,
}

impl DashboardConfig {
    /// Create a configuration directly
    pub fn new(deployment: Deployment, support_email: impl Into<String>) -> Self {
        Self {
            deployment,
            support_email: support_email.into(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let deployment: Deployment = std::env::var("VANTAGE_DEPLOYMENT")
            .map_err(|_| ConfigError::Missing("VANTAGE_DEPLOYMENT"))?
            .parse()?;

        let support_email = std::env::var("VANTAGE_SUPPORT_EMAIL")
            .unwrap_or_else(|_| "sales@vantage.example.com".to_string());

        Ok(Self {
            deployment,
            support_email,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
