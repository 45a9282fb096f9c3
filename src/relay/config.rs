use std::fmt;

pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";
pub const UPSTREAM_URL_VAR: &str = "B2B_API_URL";
pub const ACCEPT_INVALID_CERTS_VAR: &str = "UPSTREAM_ACCEPT_INVALID_CERTS";

pub const REQUIRED_VARS: [&str; 3] = [CLIENT_ID_VAR, CLIENT_SECRET_VAR, UPSTREAM_URL_VAR];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "missing required environment variables: {}\n\
         Set them in the environment or in a .env file in the working directory:\n  \
         CLIENT_ID=your_client_id\n  \
         CLIENT_SECRET=your_client_secret\n  \
         B2B_API_URL=your_api_url",
        .missing.join(", ")
    )]
    Missing { missing: Vec<&'static str> },

    #[error("{var} must be true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

/// Credentials and target of the upstream intake API. Loaded once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub client_id: String,
    pub client_secret: String,
    pub upstream_url: String,
    /// Skip certificate verification on the upstream client only.
    pub accept_invalid_certs: bool,
}

impl RelayConfig {
    /// Reads the process environment. Callers load `.env` first; variables
    /// already set in the environment take precedence over the file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the configuration through `lookup`. Blank values count as missing,
    /// and every missing variable is reported at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .into_iter()
            .filter(|var| value(*var).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing { missing });
        }

        let accept_invalid_certs = match value(ACCEPT_INVALID_CERTS_VAR) {
            None => true,
            Some(flag) => parse_flag(&flag).ok_or(ConfigError::InvalidFlag {
                var: ACCEPT_INVALID_CERTS_VAR,
                value: flag,
            })?,
        };

        Ok(Self {
            client_id: value(CLIENT_ID_VAR).unwrap_or_default(),
            client_secret: value(CLIENT_SECRET_VAR).unwrap_or_default(),
            upstream_url: value(UPSTREAM_URL_VAR).unwrap_or_default(),
            accept_invalid_certs,
        })
    }
}

fn parse_flag(flag: &str) -> Option<bool> {
    match flag.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("upstream_url", &self.upstream_url)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| env.get(var).cloned()
    }

    #[test]
    fn loads_complete_config() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("B2B_API_URL", "https://intake.example/orders"),
        ]))
        .unwrap();
        assert_eq!(config.client_id, "id");
        assert_eq!(config.upstream_url, "https://intake.example/orders");
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn reports_every_missing_value() {
        let err = RelayConfig::from_lookup(lookup(&[("CLIENT_ID", "id"), ("CLIENT_SECRET", " ")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                missing: vec!["CLIENT_SECRET", "B2B_API_URL"]
            }
        );
        let message = err.to_string();
        assert!(message.contains(".env"), "{message}");
        for var in REQUIRED_VARS {
            assert!(message.contains(var), "{message}");
        }
    }

    #[test]
    fn certificate_check_can_be_turned_back_on() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("B2B_API_URL", "https://intake.example/orders"),
            ("UPSTREAM_ACCEPT_INVALID_CERTS", "false"),
        ]))
        .unwrap();
        assert!(!config.accept_invalid_certs);

        let err = RelayConfig::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "secret"),
            ("B2B_API_URL", "https://intake.example/orders"),
            ("UPSTREAM_ACCEPT_INVALID_CERTS", "sometimes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFlag { .. }));
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("CLIENT_ID", "id"),
            ("CLIENT_SECRET", "hunter2"),
            ("B2B_API_URL", "https://intake.example/orders"),
        ]))
        .unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
