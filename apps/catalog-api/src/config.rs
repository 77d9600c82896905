//! Configuration for Catalog API

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig, uploads::UploadConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub uploads: UploadConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let uploads = UploadConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            uploads,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_mongodb() {
        temp_env::with_vars_unset(
            ["MONGODB_URL", "MONGO_URL", "MONGODB_DATABASE", "MONGO_DATABASE"],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("catalog")),
                ("PORT", Some("3100")),
                ("UPLOAD_DIR", Some("/tmp/catalog-uploads")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.mongodb.database(), "catalog");
                assert_eq!(config.server.port, 3100);
                assert_eq!(config.uploads.dir.to_str(), Some("/tmp/catalog-uploads"));
                assert!(config.environment.is_production());
                assert_eq!(config.app.name, "catalog_api");
            },
        );
    }
}
