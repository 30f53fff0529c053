use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::info;
use voucher_market_engine::{
    payment::UpiSimulator, AccountApi, AuthApi, CatalogApi, PurchaseApi, SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{buy_voucher, get_balance, health, list_transactions, login, search_vouchers},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.auto_migrate {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let upi_success_rate = config.upi_success_rate;
    info!("🪛️ Stand-in payment network configured with success rate {upi_success_rate}");
    let srv = HttpServer::new(move || {
        let auth_api = AuthApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let account_api = AccountApi::new(db.clone());
        let purchase_api = PurchaseApi::new(db.clone(), Box::new(UpiSimulator::new(upi_success_rate)));
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("vms::access_log"))
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(account_api))
            .app_data(web::Data::new(purchase_api))
            .service(health)
            .route("/login", web::post().to(login::<SqliteDatabase>))
            .route("/vouchers/search", web::get().to(search_vouchers::<SqliteDatabase>))
            .route("/vouchers/buy", web::post().to(buy_voucher::<SqliteDatabase>))
            .route("/wallet/balance/{user_id}", web::get().to(get_balance::<SqliteDatabase>))
            .route("/transactions/{user_id}", web::get().to(list_transactions::<SqliteDatabase>))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
