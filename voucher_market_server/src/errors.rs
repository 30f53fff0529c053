use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use thiserror::Error;
use vms_common::RpcCode;
use voucher_market_engine::MarketError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    Market(#[from] MarketError),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ServerError {
    /// The RPC status code class of this error. Domain errors carry their own classification; everything else is
    /// either a malformed request or an internal fault.
    pub fn rpc_code(&self) -> RpcCode {
        match self {
            ServerError::Market(e) => e.code(),
            ServerError::InvalidRequestBody(_) => RpcCode::InvalidArgument,
            ServerError::InitializeError(_) | ServerError::IOError(_) | ServerError::Unspecified(_) => {
                RpcCode::Internal
            },
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        // Transport framing of the RPC code class. The gateway classifies on the in-band `code` field, not on
        // this status.
        match self.rpc_code() {
            RpcCode::InvalidArgument => StatusCode::BAD_REQUEST,
            RpcCode::NotFound => StatusCode::NOT_FOUND,
            RpcCode::FailedPrecondition => StatusCode::PRECONDITION_FAILED,
            RpcCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            RpcCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Storage detail stays in the server logs; callers get a generic message.
            ServerError::Market(MarketError::Database(msg)) => {
                error!("💻️ Storage failure: {msg}");
                "internal server error".to_string()
            },
            ServerError::InitializeError(_) | ServerError::IOError(_) | ServerError::Unspecified(_) => {
                error!("💻️ {self}");
                "internal server error".to_string()
            },
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "code": self.rpc_code(), "message": message }).to_string())
    }
}

#[cfg(test)]
mod test {
    use actix_web::{error::ResponseError, http::StatusCode};
    use vms_common::Paise;
    use voucher_market_engine::MarketError;

    use super::ServerError;

    #[test]
    fn domain_errors_map_to_their_rpc_status() {
        let cases = [
            (MarketError::InvalidVoucherId(-1), StatusCode::BAD_REQUEST),
            (MarketError::UserNotFound("9".into()), StatusCode::NOT_FOUND),
            (MarketError::VoucherOutOfStock(3), StatusCode::PRECONDITION_FAILED),
            (MarketError::VoucherExpired(3), StatusCode::PRECONDITION_FAILED),
            (
                MarketError::InsufficientBalance { required: Paise::from(4_000), available: Paise::from(0) },
                StatusCode::PRECONDITION_FAILED,
            ),
            (MarketError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (MarketError::PaymentProcessingFailed("declined".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (MarketError::Database("oops".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ServerError::from(err).status_code(), status);
        }
    }

    #[actix_web::test]
    async fn storage_detail_is_not_leaked() {
        let response = ServerError::Market(MarketError::Database("secret table missing".into())).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "internal");
        assert_eq!(json["message"], "internal server error");
    }
}
