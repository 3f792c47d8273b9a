//! src/configuration.rs

use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub dashboard: DashboardSettings,
    pub websso: WebSsoSettings,
    #[serde(default)]
    pub users: Vec<UserSettings>,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub session_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub session_timeout_seconds: u64,
    #[serde(default)]
    pub secure_cookies: bool,
}

/// Flags and names consumed by the login panel.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct DashboardSettings {
    /// Only the exact value `on` disables the fake credential fields.
    #[serde(default)]
    pub password_autocomplete: Option<String>,
    pub redirect_field_name: String,
    pub forgot_password_host: String,
    #[serde(default)]
    pub multidomain_support: bool,
    pub default_domain: String,
    #[serde(default)]
    pub regions: Vec<RegionSettings>,
}

impl DashboardSettings {
    pub fn forgot_password_url(&self) -> String {
        format!("https://{}/user/forgot_password", self.forgot_password_host)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct RegionSettings {
    pub endpoint: String,
    pub name: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct WebSsoSettings {
    #[serde(default)]
    pub enabled: bool,
    pub keystone_url: String,
    pub origin: String,
    pub initial_choice: String,
    #[serde(default)]
    pub choices: Vec<SsoChoice>,
}

impl WebSsoSettings {
    pub fn is_known_choice(&self, auth_type: &str) -> bool {
        self.choices.iter().any(|c| c.id == auth_type)
    }

    /// Federation entry point of the identity service for `protocol`.
    pub fn redirect_url(&self, protocol: &str) -> String {
        format!(
            "{}/auth/OS-FEDERATION/websso/{}?origin={}",
            self.keystone_url.trim_end_matches('/'),
            urlencoding::encode(protocol),
            urlencoding::encode(&self.origin)
        )
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SsoChoice {
    pub id: String,
    pub label: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct UserSettings {
    pub username: String,
    #[serde(default)]
    pub domain: Option<String>,
    pub password_hash: Secret<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// The possible runtime environment for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_APPLICATION__PORT=5001 would set `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
