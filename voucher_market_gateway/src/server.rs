use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::info;

use crate::{
    config::GatewayConfig,
    errors::GatewayError,
    routes::{buy_voucher, get_balance, health, list_transactions, login, search_vouchers},
    rpc::RpcClient,
};

pub async fn run_gateway(config: GatewayConfig) -> Result<(), GatewayError> {
    let srv = create_gateway_instance(config)?;
    srv.await.map_err(|e| GatewayError::InitializeError(e.to_string()))
}

pub fn create_gateway_instance(config: GatewayConfig) -> Result<Server, GatewayError> {
    let rpc = RpcClient::new(&config.rpc_url)?;
    info!("🔁️ Forwarding to the marketplace RPC service at {}", config.rpc_url);
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("vmg::access_log"))
            .app_data(web::Data::new(rpc.clone()))
            .service(health)
            .route("/auth/login", web::post().to(login))
            .route("/vouchers/search", web::get().to(search_vouchers))
            .route("/vouchers/buy", web::post().to(buy_voucher))
            .route("/wallet/balance/{user_id}", web::get().to(get_balance))
            .route("/transactions/{user_id}", web::get().to(list_transactions))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))
    .map_err(|e| GatewayError::InitializeError(e.to_string()))?
    .run();
    Ok(srv)
}
