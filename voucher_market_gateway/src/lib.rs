//! # Voucher marketplace HTTP gateway
//!
//! A thin pass-through process in front of the RPC service. It owns no domain logic: each public route forwards
//! to the corresponding RPC call, wraps successful responses in a `{"success": true, ...}` envelope, and maps the
//! RPC error code class onto a public HTTP status. The mapping reads only the structured `code` field of the RPC
//! error body; message text is never inspected.

pub mod config;
pub mod errors;
pub mod routes;
pub mod rpc;
pub mod server;
