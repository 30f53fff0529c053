use log::debug;

use crate::{db_types::User, errors::MarketError, traits::AuthManagement};

/// Login and user lookups. Credential storage is the backend's concern; this API only sequences the checks.
#[derive(Debug, Clone)]
pub struct AuthApi<B> {
    db: B,
}

impl<B> AuthApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AuthApi<B>
where B: AuthManagement
{
    pub async fn login(&self, email: &str, password: &str) -> Result<User, MarketError> {
        let user = self.db.authenticate_user(email, password).await?;
        debug!("🔑️ User {} ({}) logged in", user.id, user.email);
        Ok(user)
    }
}
