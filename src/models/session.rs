use serde::{Deserialize, Serialize};

/// Authority granting access to the admin user endpoints.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Current account as returned by `/api/account`.
///
/// Only `authorities` drives behaviour; the remaining fields are kept for display.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl SessionInfo {
    pub fn is_admin(&self) -> bool {
        self.authorities.iter().any(|a| a == ROLE_ADMIN)
    }
}
