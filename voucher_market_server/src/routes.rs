//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into a separate
//! module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the backend trait they need, so the endpoint tests can run them against mocks. The
//! server assembly in [`crate::server`] instantiates them with [`SqliteDatabase`](voucher_market_engine::SqliteDatabase).
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use vms_common::Paise;
use voucher_market_engine::{
    db_types::{Pagination, VoucherSearchQuery},
    traits::{AccountManagement, AuthManagement, CatalogManagement, MarketplaceDatabase},
    AccountApi, AuthApi, CatalogApi, PurchaseApi,
};

use crate::{
    data_objects::{
        BalanceResponse, BuyVoucherRequest, BuyVoucherResponse, ListTransactionsResponse, LoginRequest,
        LoginResponse, PageParams, SearchVouchersParams, SearchVouchersResponse,
    },
    errors::ServerError,
};

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Login  ----------------------------------------------------
pub async fn login<B>(api: web::Data<AuthApi<B>>, body: web::Json<LoginRequest>) -> Result<HttpResponse, ServerError>
where B: AuthManagement + 'static {
    let LoginRequest { email, password } = body.into_inner();
    if email.trim().is_empty() || password.is_empty() {
        return Err(ServerError::InvalidRequestBody("email and password are required".to_string()));
    }
    let user = api.login(email.trim(), &password).await?;
    debug!("💻️ Login request for user {} handled", user.id);
    Ok(HttpResponse::Ok().json(LoginResponse { user: user.into(), message: "Login successful".to_string() }))
}

//----------------------------------------------   Catalog  ----------------------------------------------------
pub async fn search_vouchers<B>(
    api: web::Data<CatalogApi<B>>,
    params: web::Query<SearchVouchersParams>,
) -> Result<HttpResponse, ServerError>
where B: CatalogManagement + 'static {
    let params = params.into_inner();
    let mut query = VoucherSearchQuery::default();
    query.pagination = Pagination::new(params.limit, params.offset);
    query.category = params.category.filter(|c| !c.trim().is_empty());
    if let Some(min_price) = params.min_price {
        query.min_price = Some(rupees_to_paise(min_price)?);
    }
    if let Some(max_price) = params.max_price {
        query.max_price = Some(rupees_to_paise(max_price)?);
    }
    let vouchers = api.search(query).await?;
    trace!("💻️ Voucher search returned {} results", vouchers.len());
    Ok(HttpResponse::Ok().json(SearchVouchersResponse { vouchers: vouchers.into_iter().map(Into::into).collect() }))
}

//----------------------------------------------   Purchase  ----------------------------------------------------
pub async fn buy_voucher<B>(
    api: web::Data<PurchaseApi<B>>,
    body: web::Json<BuyVoucherRequest>,
) -> Result<HttpResponse, ServerError>
where B: MarketplaceDatabase + 'static {
    let BuyVoucherRequest { user_id, voucher_id } = body.into_inner();
    debug!("💻️ Received buy request: user {user_id}, voucher {voucher_id}");
    let transaction = api.buy_voucher(user_id, voucher_id).await?;
    Ok(HttpResponse::Ok().json(BuyVoucherResponse {
        transaction: transaction.into(),
        message: "Voucher purchased successfully".to_string(),
    }))
}

//----------------------------------------------   Wallet  ----------------------------------------------------
pub async fn get_balance<B>(api: web::Data<AccountApi<B>>, path: web::Path<i64>) -> Result<HttpResponse, ServerError>
where B: AccountManagement + 'static {
    let user_id = path.into_inner();
    let balance = api.balance_for_user(user_id).await?;
    Ok(HttpResponse::Ok().json(BalanceResponse { user_id, balance: balance.as_rupees() }))
}

//----------------------------------------------   History  ----------------------------------------------------
pub async fn list_transactions<B>(
    api: web::Data<AccountApi<B>>,
    path: web::Path<i64>,
    page: web::Query<PageParams>,
) -> Result<HttpResponse, ServerError>
where B: AccountManagement + 'static {
    let user_id = path.into_inner();
    let pagination = Pagination::new(page.limit, page.offset);
    let transactions = api.history_for_user(user_id, pagination).await?;
    trace!("💻️ Returning {} transactions for user {user_id}", transactions.len());
    Ok(HttpResponse::Ok()
        .json(ListTransactionsResponse { transactions: transactions.into_iter().map(Into::into).collect() }))
}

fn rupees_to_paise(rupees: f64) -> Result<Paise, ServerError> {
    Paise::try_from(rupees).map_err(|e| ServerError::InvalidRequestBody(e.to_string()))
}
