use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of status code classes spoken on the wire between the RPC service and its clients.
///
/// The RPC service classifies domain errors into one of these; the gateway maps them onto public HTTP statuses.
/// Neither side ever inspects the human-readable message to make that decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RpcCode {
    InvalidArgument,
    NotFound,
    FailedPrecondition,
    Unauthenticated,
    Internal,
}

impl RpcCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcCode::InvalidArgument => "invalid-argument",
            RpcCode::NotFound => "not-found",
            RpcCode::FailedPrecondition => "failed-precondition",
            RpcCode::Unauthenticated => "unauthenticated",
            RpcCode::Internal => "internal",
        }
    }
}

impl Display for RpcCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid RPC code: {0}")]
pub struct InvalidRpcCode(String);

impl FromStr for RpcCode {
    type Err = InvalidRpcCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalid-argument" => Ok(Self::InvalidArgument),
            "not-found" => Ok(Self::NotFound),
            "failed-precondition" => Ok(Self::FailedPrecondition),
            "unauthenticated" => Ok(Self::Unauthenticated),
            "internal" => Ok(Self::Internal),
            other => Err(InvalidRpcCode(other.to_string())),
        }
    }
}
