use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads advisor configuration by layering TOML and environment
    /// variables over the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AdvisorConfig> {
        let config: AdvisorConfig = Figment::new()
            .merge(Serialized::defaults(AdvisorConfig::default()))
            .merge(Toml::file("config/Advisor.toml"))
            .merge(Env::prefixed("DCA_").split("__"))
            .extract()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Loads advisor configuration with a specific profile overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AdvisorConfig> {
        let config: AdvisorConfig = Figment::new()
            .merge(Serialized::defaults(AdvisorConfig::default()))
            .merge(Toml::file("config/Advisor.toml"))
            .merge(Toml::file(format!("config/Advisor.{profile}.toml")))
            .merge(Env::prefixed("DCA_").split("__"))
            .extract()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn load_without_file_yields_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = ConfigLoader::load().expect("defaults should extract");
            assert_eq!(config, AdvisorConfig::default());
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Advisor.toml",
                r#"
                [buy]
                base_amount_usd = "250"
                "#,
            )?;
            let config = ConfigLoader::load().expect("file should extract");
            assert_eq!(config.buy.base_amount_usd, dec!(250));
            assert_eq!(config.sell, AdvisorConfig::default().sell);
            Ok(())
        });
    }
}
