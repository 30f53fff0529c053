mod paise;
mod rpc_code;

mod helpers;
pub mod op;

pub use helpers::parse_boolean_flag;
pub use paise::{Paise, PaiseConversionError};
pub use rpc_code::RpcCode;
