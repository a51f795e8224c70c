//! Configuration management for etheroll-rs
//!
//! This crate provides functionality for managing the etheroll-rs configuration,
//! including loading, saving, updating, and deleting configuration settings.

/// Error types for the configuration module
pub mod error;

use std::path::PathBuf;

use crate::error::Error;
use alloy::primitives::Address;
use clap::Parser;
use etheroll_common::{
    constants::DEFAULT_ETHERSCAN_API_KEY,
    ether::chain::Chain,
    utils::{
        env::get_env,
        io::file::{delete_path, read_file, write_file},
    },
};
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use tracing::{debug, error, info};

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    override_usage = "etheroll config [OPTIONS]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. Every command reads
/// its defaults from it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// The chain the dice contract is queried on
    #[serde(default)]
    pub chain: Chain,

    /// The dice contract address. When empty, the chain's default deployment is used.
    #[serde(default)]
    pub contract_address: String,

    /// The API key for Etherscan services
    #[serde(default = "default_etherscan_api_key")]
    pub etherscan_api_key: String,

    /// Path to a local copy of the contract ABI
    #[serde(default)]
    pub abi_path: String,
}

fn default_etherscan_api_key() -> String {
    DEFAULT_ETHERSCAN_API_KEY.to_string()
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            chain: Chain::Mainnet,
            contract_address: "".to_string(),
            etherscan_api_key: default_etherscan_api_key(),
            abi_path: "".to_string(),
        }
    }
}

#[allow(deprecated)]
fn config_path() -> Result<PathBuf, Error> {
    let mut home = home_dir().ok_or_else(|| {
        Error::Generic(
            "failed to get home directory. does your os support `std::env::home_dir()`?"
                .to_string(),
        )
    })?;
    home.push(".etheroll");
    home.push("config.toml");
    Ok(home)
}

fn path_str(path: &std::path::Path) -> Result<&str, Error> {
    path.to_str().ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

impl Configuration {
    /// Returns the current configuration, creating the file with defaults if it does not
    /// exist yet. `ETHEROLL_CHAIN`, `ETHEROLL_CONTRACT_ADDRESS` and `ETHERSCAN_API_KEY`
    /// override the values read from disk. The overrides are never written back, see
    /// [`Configuration::update`].
    pub fn load() -> Result<Self, Error> {
        let mut config = Self::load_from_disk()?;
        config.apply_env()?;
        Ok(config)
    }

    /// Returns the configuration as stored in the config file, without environment
    /// overrides, creating the file with defaults if it does not exist yet.
    pub fn load_from_disk() -> Result<Self, Error> {
        let path = config_path()?;

        // if the config file doesn't exist, create it
        if !path.exists() {
            let config = Configuration::default();
            config.save()?;
        }

        // read the config file
        let contents = read_file(path_str(&path)?)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        // parse the config file
        toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))
    }

    /// Overrides values with the ones set in the environment.
    fn apply_env(&mut self) -> Result<(), Error> {
        if let Some(chain) = get_env("ETHEROLL_CHAIN") {
            debug!("overriding chain with ETHEROLL_CHAIN");
            self.update_value("chain", &chain)?;
        }
        if let Some(address) = get_env("ETHEROLL_CONTRACT_ADDRESS") {
            debug!("overriding contract_address with ETHEROLL_CONTRACT_ADDRESS");
            self.update_value("contract_address", &address)?;
        }
        if let Some(key) = get_env("ETHERSCAN_API_KEY") {
            debug!("overriding etherscan_api_key with ETHERSCAN_API_KEY");
            self.etherscan_api_key = key;
        }
        Ok(())
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        let path = config_path()?;

        write_file(
            path_str(&path)?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file at `$HOME/.etheroll/config.toml`.
    pub fn delete() -> Result<(), Error> {
        let path = config_path()?;

        delete_path(path_str(&path)?)
            .map_err(|e| Error::Generic(format!("failed to delete config file: {e}")))?;

        Ok(())
    }

    /// The dice contract address: the configured one, or the chain's default deployment.
    pub fn contract_address(&self) -> Result<Address, Error> {
        if self.contract_address.is_empty() {
            return self.chain.default_contract_address().ok_or_else(|| {
                Error::Generic(format!(
                    "no contract address configured and no default deployment on {}",
                    self.chain
                ))
            });
        }

        self.contract_address
            .parse::<Address>()
            .map_err(|e| Error::ParseError(format!("invalid contract address: {e}")))
    }

    /// Validates and sets a single key/value pair, without writing to disk.
    fn update_value(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "chain" => {
                self.chain = value
                    .parse::<Chain>()
                    .map_err(|e| Error::ParseError(format!("invalid chain: {e}")))?;
            }
            "contract_address" => {
                if !value.is_empty() {
                    value
                        .parse::<Address>()
                        .map_err(|e| Error::ParseError(format!("invalid contract address: {e}")))?;
                }
                self.contract_address = value.to_string();
            }
            "etherscan_api_key" => {
                self.etherscan_api_key = value.to_string();
            }
            "abi_path" => {
                self.abi_path = value.to_string();
            }
            _ => {
                return Err(Error::Generic(format!(
                    "invalid key: \'{key}\' is not a valid configuration key."
                )))
            }
        }

        Ok(())
    }

    /// Update a single key/value pair in the configuration and write it to disk.
    ///
    /// Only the stored configuration plus this change is written, so environment overrides
    /// applied by [`Configuration::load`] stay out of the config file.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let mut stored = Self::load_from_disk()?;
        stored.update_value(key, value)?;
        stored.save()?;

        self.update_value(key, value)
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            // read the config file and update the key/value pair
            let mut config = Configuration::load_from_disk()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            // key is set, but no value is set
            error!("found key but no value to set. Please specify a value to set, use `etheroll config --help` for more information.");
        }
    } else {
        // no key is set, print the config file
        println!("{:#?}", Configuration::load()?);
        info!("use `etheroll config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Test default configuration
    #[test]
    #[serial]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.chain, Chain::Mainnet);
        assert_eq!(config.contract_address, "");
        assert_eq!(config.etherscan_api_key, "YourApiKeyToken");
        assert_eq!(config.abi_path, "");
    }

    // Test loading configuration from a file
    #[test]
    #[serial]
    fn test_load_configuration() {
        // delete config file if it exists
        Configuration::delete().expect("failed to delete config file");
        let config = Configuration::load().expect("failed to load config file");

        assert_eq!(config.contract_address, "");
        assert_eq!(config.abi_path, "");
    }

    // Test saving configuration to a file
    #[test]
    #[serial]
    fn test_save_configuration() {
        Configuration::delete().expect("failed to delete config file");
        let mut config = Configuration::default();

        config.update("chain", "ropsten").expect("failed to update chain");
        config.update("abi_path", "/tmp/etheroll.json").expect("failed to update abi_path");

        // load the config file
        let loaded = Configuration::load().expect("failed to load config file");
        assert_eq!(loaded.abi_path, "/tmp/etheroll.json");
        assert_eq!(loaded.contract_address, "");

        Configuration::delete().expect("failed to delete config file");
    }

    #[test]
    #[serial]
    fn test_update_rejects_invalid_values() {
        let mut config = Configuration::default();

        assert!(config.update_value("chain", "kovan").is_err());
        assert!(config.update_value("contract_address", "0x1234").is_err());
        assert!(config.update_value("rpc_url", "http://localhost:8545").is_err());
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_contract_address_resolution() {
        let mut config = Configuration::default();
        assert_eq!(
            config.contract_address().expect("mainnet default"),
            Chain::Mainnet.default_contract_address().expect("deployed")
        );

        config.chain = Chain::Morden;
        assert!(config.contract_address().is_err());

        config
            .update_value("contract_address", "0x048717Ea892F23Fb0126F00640e2b18072efd9D2")
            .expect("valid address");
        assert_eq!(
            config.contract_address().expect("configured"),
            Chain::Mainnet.default_contract_address().expect("deployed")
        );
    }

    #[test]
    #[serial]
    fn test_env_overrides_are_not_saved() {
        Configuration::delete().expect("failed to delete config file");
        std::env::set_var("ETHEROLL_CHAIN", "ropsten");
        std::env::set_var("ETHERSCAN_API_KEY", "secret-key");

        let mut config = Configuration::load().expect("failed to load config file");
        assert_eq!(config.chain, Chain::Ropsten);
        assert_eq!(config.etherscan_api_key, "secret-key");

        config.update("abi_path", "/tmp/etheroll.json").expect("failed to update abi_path");
        assert_eq!(config.abi_path, "/tmp/etheroll.json");
        assert_eq!(config.chain, Chain::Ropsten);

        std::env::remove_var("ETHEROLL_CHAIN");
        std::env::remove_var("ETHERSCAN_API_KEY");

        let stored = Configuration::load().expect("failed to load config file");
        assert_eq!(stored.chain, Chain::Mainnet);
        assert_eq!(stored.etherscan_api_key, "YourApiKeyToken");
        assert_eq!(stored.abi_path, "/tmp/etheroll.json");

        Configuration::delete().expect("failed to delete config file");
    }

    // Test deleting configuration file
    #[test]
    #[serial]
    fn test_delete_configuration() {
        Configuration::delete().expect("failed to delete config file");
        let mut config = Configuration::load().expect("failed to load config file");

        config.update("abi_path", "/tmp/abi.json").expect("failed to update abi_path");

        Configuration::delete().expect("failed to delete config file");
        let config = Configuration::load().expect("failed to load config file");

        assert_eq!(config.abi_path, "");
    }
}
