use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use thiserror::Error;
use vms_common::RpcCode;

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Could not initialize gateway. {0}")]
    InitializeError(String),
    #[error("{message}")]
    Rpc { code: RpcCode, message: String },
    #[error("The marketplace service could not be reached. {0}")]
    Upstream(String),
}

/// The gateway's transport mapping: RPC code class to public HTTP status. This table is independent of the
/// service's own framing; it is applied to the `code` field of the RPC error body.
pub fn http_status(code: RpcCode) -> StatusCode {
    match code {
        RpcCode::InvalidArgument => StatusCode::BAD_REQUEST,
        RpcCode::NotFound => StatusCode::NOT_FOUND,
        RpcCode::FailedPrecondition => StatusCode::PRECONDITION_FAILED,
        RpcCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        RpcCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Rpc { code, .. } => http_status(*code),
            GatewayError::Upstream(_) | GatewayError::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            GatewayError::Rpc { message, .. } => message.clone(),
            GatewayError::Upstream(detail) => {
                error!("🔁️ Upstream failure: {detail}");
                "internal server error".to_string()
            },
            GatewayError::InitializeError(detail) => {
                error!("🔁️ {detail}");
                "internal server error".to_string()
            },
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "success": false, "error": message }).to_string())
    }
}

#[cfg(test)]
mod test {
    use actix_web::{error::ResponseError, http::StatusCode};
    use vms_common::RpcCode;

    use super::{http_status, GatewayError};

    #[test]
    fn every_code_class_has_a_public_status() {
        assert_eq!(http_status(RpcCode::InvalidArgument), StatusCode::BAD_REQUEST);
        assert_eq!(http_status(RpcCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(http_status(RpcCode::FailedPrecondition), StatusCode::PRECONDITION_FAILED);
        assert_eq!(http_status(RpcCode::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(http_status(RpcCode::Internal), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn failures_wear_the_envelope() {
        let err = GatewayError::Rpc { code: RpcCode::FailedPrecondition, message: "Voucher 3 is out of stock".into() };
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Voucher 3 is out of stock");
    }

    #[actix_web::test]
    async fn upstream_detail_is_not_leaked() {
        let err = GatewayError::Upstream("connection refused on 10.0.0.3".into());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal server error");
    }
}
