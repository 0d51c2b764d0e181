//! Configuration for Products API

use core_config::{
    app_info,
    server::{HttpConfig, ServerConfig},
    AppInfo, FromEnv,
};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let app = app_info!();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }
        let server = ServerConfig::from_env()?;
        let http = HttpConfig::from_env()?;

        Ok(Self {
            app,
            mongodb,
            server,
            http,
            environment,
        })
    }
}
