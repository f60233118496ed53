use std::fmt;
use std::sync::Arc;

use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://service_center.db?mode=rwc";
pub const DEFAULT_FEEDBACK_URL: &str = "https://forms.gle/service-center-feedback";

/// Infrastructure settings needed before anything else can start
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    feedback_url: String,
}

impl BootstrapSettings {
    /// Load bootstrap settings through ConfigSpec
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value(DEFAULT_DATABASE_URL)
            .min_length(1)
            .load()?
            .value;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load()?
            .value;

        let port_value = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("8000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535))
            .load()?
            .value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let feedback_url = ConfigSpec::new(env_provider)
            .env_override("FEEDBACK_URL")
            .default_value(DEFAULT_FEEDBACK_URL)
            .validator(ConfigSpec::validate_http_url)
            .load()?
            .value;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            feedback_url,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn feedback_url(&self) -> &str {
        &self.feedback_url
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("feedback_url", &self.feedback_url)
            .finish()
    }
}
