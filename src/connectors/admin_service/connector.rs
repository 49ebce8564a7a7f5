use crate::connectors::errors::ConnectorError;
use crate::forms::NewUserForm;
use crate::models::{SessionInfo, UserRecord};

use super::PageQuery;

/// Trait for the admin REST API
/// Allows mocking in tests and swapping implementations
#[async_trait::async_trait]
pub trait AdminServiceConnector: Send + Sync {
    /// Fetch the current account and its authorities
    /// Calls GET /api/account
    async fn get_account(&self) -> Result<SessionInfo, ConnectorError>;

    /// Fetch one page of users
    /// Calls GET /api/admin/users?page={page}&size={size}&sort={sort}
    async fn list_users(&self, query: &PageQuery) -> Result<Vec<UserRecord>, ConnectorError>;

    /// Delete a user by login
    /// Calls DELETE /api/admin/users/{login}
    async fn delete_user(&self, login: &str) -> Result<(), ConnectorError>;

    /// Create a user from the add form and return the stored record
    /// Calls POST /api/admin/users
    async fn create_user(&self, form: &NewUserForm) -> Result<UserRecord, ConnectorError>;
}
