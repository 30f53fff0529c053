use dotenvy::dotenv;
use log::info;
use voucher_market_gateway::{config::GatewayConfig, server::run_gateway};

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let config = GatewayConfig::from_env_or_default();

    info!("🚀️ Starting marketplace HTTP gateway on {}:{}", config.host, config.port);
    match run_gateway(config).await {
        Ok(_) => println!("Bye!"),
        Err(e) => eprintln!("{e}"),
    }
}
