//! Profile configuration
//!
//! Each profile names an endpoint (explicit URL or a region), a timeout, a
//! default marketplace and extra headers. Stored as TOML under
//! `<config dir>/sp-listings/config.toml`.

use super::Result;
use crate::api::config::ClientConfig;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PROFILE: &str = "default";
pub const ACCESS_TOKEN_HEADER: &str = "x-amz-access-token";

/// Selling Partner API regions and their sandboxes
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[default]
    Na,
    Eu,
    Fe,
    NaSandbox,
    EuSandbox,
    FeSandbox,
}

impl Region {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Region::Na => "https://sellingpartnerapi-na.amazon.com",
            Region::Eu => "https://sellingpartnerapi-eu.amazon.com",
            Region::Fe => "https://sellingpartnerapi-fe.amazon.com",
            Region::NaSandbox => "https://sandbox.sellingpartnerapi-na.amazon.com",
            Region::EuSandbox => "https://sandbox.sellingpartnerapi-eu.amazon.com",
            Region::FeSandbox => "https://sandbox.sellingpartnerapi-fe.amazon.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Na => "na",
            Region::Eu => "eu",
            Region::Fe => "fe",
            Region::NaSandbox => "na-sandbox",
            Region::EuSandbox => "eu-sandbox",
            Region::FeSandbox => "fe-sandbox",
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "na" => Ok(Region::Na),
            "eu" => Ok(Region::Eu),
            "fe" => Ok(Region::Fe),
            "na-sandbox" => Ok(Region::NaSandbox),
            "eu-sandbox" => Ok(Region::EuSandbox),
            "fe-sandbox" => Ok(Region::FeSandbox),
            other => Err(format!(
                "unknown region '{}', expected na, eu, fe or a -sandbox variant",
                other
            )),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Profile {
    /// Explicit endpoint; takes priority over `region`
    pub endpoint: Option<String>,
    pub region: Option<Region>,
    pub timeout_ms: Option<u64>,
    pub marketplace_id: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl Profile {
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| self.region.unwrap_or_default().endpoint().to_string())
    }

    /// Client options for this profile, with the access token attached when given
    pub fn client_config(&self, access_token: Option<&str>) -> ClientConfig {
        let mut headers = self.headers.clone();
        if let Some(token) = access_token {
            headers.insert(ACCESS_TOKEN_HEADER.to_string(), token.to_string());
        }

        ClientConfig {
            base_url: self.endpoint(),
            timeout: self.timeout_ms,
            headers: if headers.is_empty() { None } else { Some(headers) },
        }
    }

    /// Set a field from its `config set` key
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "endpoint" => self.endpoint = Some(value.to_string()),
            "region" => self.region = Some(value.parse()?),
            "timeout_ms" => {
                let timeout = value
                    .parse::<u64>()
                    .map_err(|e| format!("timeout_ms must be an integer: {}", e))?;
                self.timeout_ms = Some(timeout);
            }
            "marketplace_id" => self.marketplace_id = Some(value.to_string()),
            other => {
                return Err(format!(
                    "unknown key '{}', expected endpoint, region, timeout_ms or marketplace_id",
                    other
                ));
            }
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to parse {}: {}", config_path.display(), e),
        })
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigSaveFailed {
            message: e.to_string(),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join("sp-listings").join("config.toml"))
    }

    /// Name of the profile to use: explicit choice, then the file default
    pub fn resolve_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_string)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn profile_mut(&mut self, name: &str) -> &mut Profile {
        self.profiles.entry(name.to_string()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_profile, None);
        assert_eq!(config.profiles.len(), 0);
        assert_eq!(config.resolve_profile_name(None), "default");
        assert_eq!(config.resolve_profile_name(Some("eu")), "eu");
    }

    #[test]
    fn test_profile_endpoint_priority() {
        let mut profile = Profile::default();
        assert_eq!(profile.endpoint(), "https://sellingpartnerapi-na.amazon.com");

        profile.region = Some(Region::FeSandbox);
        assert_eq!(
            profile.endpoint(),
            "https://sandbox.sellingpartnerapi-fe.amazon.com"
        );

        profile.endpoint = Some("http://localhost:8080".to_string());
        assert_eq!(profile.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn test_client_config_attaches_token() {
        let profile = Profile {
            region: Some(Region::Eu),
            timeout_ms: Some(5_000),
            ..Default::default()
        };

        let config = profile.client_config(Some("Atza|abc"));
        assert_eq!(config.base_url, "https://sellingpartnerapi-eu.amazon.com");
        assert_eq!(config.timeout, Some(5_000));
        assert_eq!(config.headers.unwrap()[ACCESS_TOKEN_HEADER], "Atza|abc");

        assert!(profile.client_config(None).headers.is_none());
    }

    #[test]
    fn test_profile_set() {
        let mut profile = Profile::default();
        profile.set("region", "EU").unwrap();
        profile.set("timeout_ms", "45000").unwrap();
        profile.set("marketplace_id", "A1PA6795UKMFR9").unwrap();
        assert_eq!(profile.region, Some(Region::Eu));
        assert_eq!(profile.timeout_ms, Some(45_000));
        assert_eq!(profile.marketplace_id.as_deref(), Some("A1PA6795UKMFR9"));

        assert!(profile.set("timeout_ms", "soon").is_err());
        assert!(profile.set("region", "mars").is_err());
        assert!(profile.set("color", "blue").is_err());
    }

    #[test]
    fn test_config_load_save() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.default_profile = Some("eu".to_string());
        config.profiles.insert(
            "eu".to_string(),
            Profile {
                region: Some(Region::Eu),
                marketplace_id: Some("A1PA6795UKMFR9".to_string()),
                headers: HashMap::from([("x-trace".to_string(), "1".to_string())]),
                ..Default::default()
            },
        );

        config
            .save(Some(config_path.clone()))
            .expect("Failed to save config");
        let loaded = Config::load(Some(config_path)).expect("Failed to load config");

        assert_eq!(loaded, config);
        assert_eq!(loaded.resolve_profile_name(None), "eu");
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load(Some(temp_dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_is_parse_error() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "profiles = 3").unwrap();

        let result = Config::load(Some(path));
        assert!(matches!(result, Err(StorageError::ConfigParseError { .. })));
    }
}
