//! External Service Connectors
//!
//! The page never builds HTTP requests itself: it talks to the admin REST API
//! through the [`AdminServiceConnector`] trait, so tests can swap in
//! [`admin_service::mock::MockAdminServiceConnector`] and the presentation code
//! never depends on reqwest.
//!
//! ```ignore
//! let config = AdminServiceConfig::with_base_url("http://localhost:8080");
//! let connector: Arc<dyn AdminServiceConnector> = Arc::new(AdminServiceClient::new(config)?);
//! let session = connector.get_account().await?;
//! ```

pub mod admin_service;
pub mod config;
pub mod errors;

pub use admin_service::{AdminServiceClient, AdminServiceConnector, PageQuery};
pub use config::AdminServiceConfig;
pub use errors::ConnectorError;
