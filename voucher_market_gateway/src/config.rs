use std::env;

use log::*;

const DEFAULT_GATEWAY_HOST: &str = "127.0.0.1";
const DEFAULT_GATEWAY_PORT: u16 = 8080;
const DEFAULT_RPC_URL: &str = "http://127.0.0.1:50051";

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the marketplace RPC service this gateway fronts.
    pub rpc_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_GATEWAY_HOST.to_string(),
            port: DEFAULT_GATEWAY_PORT,
            rpc_url: DEFAULT_RPC_URL.to_string(),
        }
    }
}

impl GatewayConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("VMS_GATEWAY_HOST").ok().unwrap_or_else(|| DEFAULT_GATEWAY_HOST.into());
        let port = env::var("VMS_GATEWAY_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for VMS_GATEWAY_PORT. {e} Using the default, \
                         {DEFAULT_GATEWAY_PORT}, instead."
                    );
                    DEFAULT_GATEWAY_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_GATEWAY_PORT);
        let rpc_url = env::var("VMS_RPC_URL").ok().unwrap_or_else(|| {
            info!("🪛️ VMS_RPC_URL is not set. Using the default, {DEFAULT_RPC_URL}.");
            DEFAULT_RPC_URL.to_string()
        });
        Self { host, port, rpc_url }
    }
}

#[cfg(test)]
mod test {
    use super::GatewayConfig;

    #[test]
    fn defaults_point_at_the_local_rpc_service() {
        let config = GatewayConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rpc_url, "http://127.0.0.1:50051");
    }
}
