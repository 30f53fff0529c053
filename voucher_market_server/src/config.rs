use std::env;

use log::*;
use vms_common::parse_boolean_flag;
use voucher_market_engine::payment::DEFAULT_SUCCESS_RATE;

const DEFAULT_VMS_HOST: &str = "127.0.0.1";
const DEFAULT_VMS_PORT: u16 = 50051;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Approval probability handed to the stand-in payment network.
    pub upi_success_rate: f64,
    /// When true, outstanding schema migrations are applied at startup.
    pub auto_migrate: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_VMS_HOST.to_string(),
            port: DEFAULT_VMS_PORT,
            database_url: String::default(),
            upi_success_rate: DEFAULT_SUCCESS_RATE,
            auto_migrate: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("VMS_HOST").ok().unwrap_or_else(|| DEFAULT_VMS_HOST.into());
        let port = env::var("VMS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for VMS_PORT. {e} Using the default, {DEFAULT_VMS_PORT}, instead."
                    );
                    DEFAULT_VMS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_VMS_PORT);
        let database_url = env::var("VMS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ VMS_DATABASE_URL is not set. Please set it to the URL for the marketplace database.");
            String::default()
        });
        let upi_success_rate = env::var("VMS_UPI_SUCCESS_RATE")
            .ok()
            .and_then(|s| {
                s.parse::<f64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for VMS_UPI_SUCCESS_RATE. {e}"))
                    .ok()
            })
            .unwrap_or(DEFAULT_SUCCESS_RATE);
        let auto_migrate = parse_boolean_flag(env::var("VMS_AUTO_MIGRATE").ok(), true);
        Self { host, port, database_url, upi_success_rate, auto_migrate }
    }
}
