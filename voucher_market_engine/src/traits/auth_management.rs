use crate::{db_types::User, errors::MarketError};

#[allow(async_fn_in_trait)]
pub trait AuthManagement {
    /// Verifies the given credentials and returns the matching user.
    ///
    /// An unknown email yields [`MarketError::UserNotFound`]; a known email with the wrong password yields
    /// [`MarketError::InvalidCredentials`].
    async fn authenticate_user(&self, email: &str, password: &str) -> Result<User, MarketError>;

    /// Fetches a user by id. Returns `None` if no such user exists.
    async fn fetch_user(&self, user_id: i64) -> Result<Option<User>, MarketError>;
}
