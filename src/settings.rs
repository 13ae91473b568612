use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::CredentialError;

const ENV_PREFIX: &str = "RESUME_BUD";

/// Optional `resume_bud.toml`, then `RESUME_BUD_*` environment variables.
pub fn source() -> Result<Config, ConfigError> {
    layered(Environment::with_prefix(ENV_PREFIX))
}

// Environment values are kept as raw strings. Numeric and boolean settings
// are converted when `Settings` deserializes; credentials must stay verbatim.
fn layered(env: Environment) -> Result<Config, ConfigError> {
    Config::builder()
        .set_default("db_path", "data/resume_bud.sqlite")?
        .set_default("login_url", "https://www.linkedin.com/uas/login")?
        .set_default("scroll_seconds", 20)?
        .set_default("scroll_step_px", 1000)?
        .set_default("scroll_pause_ms", 3000)?
        .set_default("headless", false)?
        .add_source(File::with_name("resume_bud").required(false))
        .add_source(env)
        .build()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
    pub login_url: String,
    pub scroll_seconds: u64,
    pub scroll_step_px: u32,
    pub scroll_pause_ms: u64,
    pub headless: bool,
}

impl Settings {
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        cfg.clone().try_deserialize()
    }

    pub fn scroll_total(&self) -> Duration {
        Duration::from_secs(self.scroll_seconds)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }
}

/// Look up a required credential, telling "absent" apart from "blank".
pub fn get(cfg: &Config, name: &str) -> Result<String, CredentialError> {
    match cfg.get_string(name) {
        Ok(v) if v.trim().is_empty() => Err(CredentialError::Empty(name.to_string())),
        Ok(v) => Ok(v),
        Err(ConfigError::NotFound(_)) => Err(CredentialError::Missing(name.to_string())),
        Err(e) => Err(CredentialError::Invalid {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_config(cfg: &Config) -> Result<Self, CredentialError> {
        Ok(Credentials {
            username: get(cfg, "username")?,
            password: get(cfg, "password")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(pairs: &[(&str, &str)]) -> Config {
        let mut b = Config::builder();
        for (k, v) in pairs {
            b = b.set_override(*k, *v).unwrap();
        }
        b.build().unwrap()
    }

    #[test]
    fn missing_and_empty_are_distinct() {
        let c = cfg(&[("username", "  ")]);
        assert_eq!(get(&c, "username"), Err(CredentialError::Empty("username".into())));
        assert_eq!(get(&c, "password"), Err(CredentialError::Missing("password".into())));
    }

    #[test]
    fn credentials_load() {
        let c = cfg(&[("username", "jane@example.com"), ("password", "hunter2")]);
        let creds = Credentials::from_config(&c).unwrap();
        assert_eq!(creds.username, "jane@example.com");
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }

    fn env(pairs: &[(&str, &str)]) -> Environment {
        let vars = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(vars))
    }

    #[test]
    fn numeric_looking_credentials_stay_verbatim() {
        let c = layered(env(&[
            ("RESUME_BUD_USERNAME", "007"),
            ("RESUME_BUD_PASSWORD", "0123"),
        ]))
        .unwrap();
        let creds = Credentials::from_config(&c).unwrap();
        assert_eq!(creds.username, "007");
        assert_eq!(creds.password, "0123");
    }

    #[test]
    fn env_overrides_typed_settings() {
        let c = layered(env(&[
            ("RESUME_BUD_SCROLL_SECONDS", "5"),
            ("RESUME_BUD_SCROLL_STEP_PX", "250"),
            ("RESUME_BUD_HEADLESS", "true"),
        ]))
        .unwrap();
        let s = Settings::from_config(&c).unwrap();
        assert_eq!(s.scroll_total(), Duration::from_secs(5));
        assert_eq!(s.scroll_step_px, 250);
        assert!(s.headless);
        assert_eq!(s.scroll_pause(), Duration::from_millis(3000));
    }

    #[test]
    fn settings_defaults() {
        let c = Config::builder()
            .set_default("db_path", "x.sqlite")
            .unwrap()
            .set_default("login_url", "https://example.com/login")
            .unwrap()
            .set_default("scroll_seconds", 20)
            .unwrap()
            .set_default("scroll_step_px", 1000)
            .unwrap()
            .set_default("scroll_pause_ms", 3000)
            .unwrap()
            .set_default("headless", true)
            .unwrap()
            .build()
            .unwrap();
        let s = Settings::from_config(&c).unwrap();
        assert_eq!(s.scroll_total(), Duration::from_secs(20));
        assert_eq!(s.scroll_pause(), Duration::from_millis(3000));
        assert!(s.headless);
    }
}
