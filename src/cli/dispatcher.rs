use crate::api::client::ListingsClient;
use crate::cli::main_types::{Commands, ConfigCommands, SearchArgs};
use crate::display::ListingsTable;
use crate::error::{AppError, CliError};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::{mask_token, resolve_access_token};
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    profile_name: String,
    profile_requested: bool,
    access_token: Option<String>,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        profile: Option<String>,
        access_token: Option<String>,
    ) -> Self {
        let profile_name = config.resolve_profile_name(profile.as_deref());
        log::debug!("using profile '{}'", profile_name);

        Self {
            config,
            config_path,
            profile_name,
            profile_requested: profile.is_some(),
            access_token: resolve_access_token(access_token.as_deref()),
        }
    }

    /// The active profile; an unknown default profile falls back to built-in settings
    fn profile(&self) -> Result<Profile, AppError> {
        match self.config.get_profile(&self.profile_name) {
            Some(profile) => Ok(profile.clone()),
            None if self.profile_requested => Err(CliError::ProfileNotFound {
                name: self.profile_name.clone(),
            }
            .into()),
            None => Ok(Profile::default()),
        }
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Search(args) => self.handle_search(args).await,
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    async fn handle_search(&self, args: SearchArgs) -> Result<(), AppError> {
        let profile = self.profile()?;

        if self.access_token.is_none() {
            log::warn!("no access token configured, the request will likely be rejected");
        }

        let marketplace_id = args
            .marketplace_id
            .clone()
            .or_else(|| profile.marketplace_id.clone())
            .ok_or_else(|| {
                CliError::InvalidArguments(
                    "--marketplace-id is required when the profile has no marketplace_id"
                        .to_string(),
                )
            })?;

        let client = ListingsClient::new(profile.client_config(self.access_token.as_deref()))?;
        let json = args.json;
        let params = args.into_params(marketplace_id.clone());
        let response = client.search_listings_items(&params).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            println!("{}", ListingsTable::new(marketplace_id).render(&response));
        }
        Ok(())
    }

    fn handle_config_command(&mut self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                let profile = self.profile()?;
                println!("Profile:     {}", self.profile_name);
                println!("Endpoint:    {}", profile.endpoint());
                println!(
                    "Region:      {}",
                    profile
                        .region
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "(default)".to_string())
                );
                println!(
                    "Timeout:     {}",
                    profile
                        .timeout_ms
                        .map(|t| format!("{} ms", t))
                        .unwrap_or_else(|| "(default)".to_string())
                );
                println!(
                    "Marketplace: {}",
                    profile.marketplace_id.as_deref().unwrap_or("(not set)")
                );
                let mut header_names: Vec<&String> = profile.headers.keys().collect();
                header_names.sort();
                for name in header_names {
                    println!("Header:      {}", name);
                }
                println!(
                    "Token:       {}",
                    self.access_token
                        .as_deref()
                        .map(mask_token)
                        .unwrap_or_else(|| "(not set)".to_string())
                );
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                let profile = self.config.profile_mut(&self.profile_name);
                profile
                    .set(&key, &value)
                    .map_err(CliError::InvalidArguments)?;

                if self.config.default_profile.is_none() {
                    self.config.default_profile = Some(self.profile_name.clone());
                }
                self.config.save(self.config_path.clone())?;

                println!("✅ Set {} = {} for profile '{}'", key, value, self.profile_name);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::Region;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_set_persists_profile() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.toml");

        let mut dispatcher = Dispatcher::new(
            Config::default(),
            Some(path.clone()),
            Some("eu".to_string()),
            None,
        );
        dispatcher
            .dispatch(Commands::Config {
                command: ConfigCommands::Set {
                    key: "region".to_string(),
                    value: "eu".to_string(),
                },
            })
            .await
            .unwrap();

        let saved = Config::load(Some(path)).unwrap();
        assert_eq!(saved.default_profile.as_deref(), Some("eu"));
        assert_eq!(saved.get_profile("eu").unwrap().region, Some(Region::Eu));
    }

    #[tokio::test]
    async fn test_config_set_rejects_unknown_key() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let mut dispatcher = Dispatcher::new(
            Config::default(),
            Some(temp_dir.path().join("config.toml")),
            None,
            None,
        );

        let result = dispatcher
            .dispatch(Commands::Config {
                command: ConfigCommands::Set {
                    key: "colour".to_string(),
                    value: "blue".to_string(),
                },
            })
            .await;
        assert!(matches!(result, Err(AppError::Cli(CliError::InvalidArguments(_)))));
    }

    #[tokio::test]
    async fn test_unknown_requested_profile() {
        let mut dispatcher =
            Dispatcher::new(Config::default(), None, Some("missing".to_string()), None);
        let result = dispatcher
            .dispatch(Commands::Config {
                command: ConfigCommands::Show,
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::Cli(CliError::ProfileNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_search_without_marketplace_fails_before_request() {
        let mut dispatcher = Dispatcher::new(Config::default(), None, None, None);
        let args = SearchArgs {
            seller_id: "S1".to_string(),
            ..Default::default()
        };
        let result = dispatcher.dispatch(Commands::Search(args)).await;
        assert!(matches!(result, Err(AppError::Cli(CliError::InvalidArguments(_)))));
    }
}
