//! Pass-through route handlers.
//!
//! Each handler forwards to the RPC service and wraps the response in the public `{"success": ...}` envelope.
//! Only the liveness check is answered locally.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::trace;
use serde_json::{json, Value};

use crate::{errors::GatewayError, rpc::RpcClient};

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("🔁️ Received health check request");
    HttpResponse::Ok().json(json!({"status": "healthy", "service": "voucher-market-gateway"}))
}

pub async fn login(rpc: web::Data<RpcClient>, body: web::Json<Value>) -> Result<HttpResponse, GatewayError> {
    let response = rpc.post("/login", &body.into_inner()).await?;
    Ok(ok_envelope(response))
}

pub async fn search_vouchers(rpc: web::Data<RpcClient>, req: HttpRequest) -> Result<HttpResponse, GatewayError> {
    let response = rpc.get(&with_query("/vouchers/search", &req)).await?;
    Ok(ok_envelope(response))
}

pub async fn buy_voucher(rpc: web::Data<RpcClient>, body: web::Json<Value>) -> Result<HttpResponse, GatewayError> {
    let response = rpc.post("/vouchers/buy", &body.into_inner()).await?;
    Ok(ok_envelope(response))
}

pub async fn get_balance(rpc: web::Data<RpcClient>, path: web::Path<i64>) -> Result<HttpResponse, GatewayError> {
    let user_id = path.into_inner();
    let response = rpc.get(&format!("/wallet/balance/{user_id}")).await?;
    Ok(ok_envelope(response))
}

pub async fn list_transactions(
    rpc: web::Data<RpcClient>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    let user_id = path.into_inner();
    let response = rpc.get(&with_query(&format!("/transactions/{user_id}"), &req)).await?;
    Ok(ok_envelope(response))
}

fn with_query(path: &str, req: &HttpRequest) -> String {
    let query = req.query_string();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Stamps the success flag into the RPC response object.
fn ok_envelope(response: Value) -> HttpResponse {
    let body = match response {
        Value::Object(mut map) => {
            map.insert("success".to_string(), Value::Bool(true));
            Value::Object(map)
        },
        other => json!({"success": true, "result": other}),
    };
    HttpResponse::Ok().json(body)
}
