use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Semaphore;

use crate::connectors::errors::ConnectorError;
use crate::forms::NewUserForm;
use crate::models::{SessionInfo, UserRecord, ROLE_ADMIN};

use super::{AdminServiceConnector, PageQuery};

/// A request the mock received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    GetAccount,
    ListUsers(PageQuery),
    DeleteUser(String),
    CreateUser(NewUserForm),
}

/// Mock admin service for testing - answers from canned results and records every call.
///
/// Defaults to an admin session, an empty user page, and successful mutations.
/// When no create result is set, the created record echoes the form.
pub struct MockAdminServiceConnector {
    account: Result<SessionInfo, ConnectorError>,
    later_account: Option<Result<SessionInfo, ConnectorError>>,
    users: Result<Vec<UserRecord>, ConnectorError>,
    later_users: Option<Result<Vec<UserRecord>, ConnectorError>>,
    delete_result: Result<(), ConnectorError>,
    create_result: Option<Result<UserRecord, ConnectorError>>,
    gate: Option<Arc<Semaphore>>,
    list_gate: Option<Arc<Semaphore>>,
    calls: Mutex<Vec<MockCall>>,
}

impl Default for MockAdminServiceConnector {
    fn default() -> Self {
        Self {
            account: Ok(SessionInfo {
                login: Some("admin".to_string()),
                email: None,
                authorities: vec!["ROLE_USER".to_string(), ROLE_ADMIN.to_string()],
            }),
            later_account: None,
            users: Ok(Vec::new()),
            later_users: None,
            delete_result: Ok(()),
            create_result: None,
            gate: None,
            list_gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockAdminServiceConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authorities(mut self, authorities: &[&str]) -> Self {
        self.account = Ok(SessionInfo {
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
            ..SessionInfo::default()
        });
        self
    }

    /// Every session check after the first answers with these authorities.
    pub fn then_authorities(mut self, authorities: &[&str]) -> Self {
        self.later_account = Some(Ok(SessionInfo {
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
            ..SessionInfo::default()
        }));
        self
    }

    pub fn with_account_error(mut self, err: ConnectorError) -> Self {
        self.account = Err(err);
        self
    }

    pub fn with_users(mut self, users: Vec<UserRecord>) -> Self {
        self.users = Ok(users);
        self
    }

    /// Every list request after the first answers with `users`.
    pub fn then_users(mut self, users: Vec<UserRecord>) -> Self {
        self.later_users = Some(Ok(users));
        self
    }

    pub fn with_users_error(mut self, err: ConnectorError) -> Self {
        self.users = Err(err);
        self
    }

    pub fn with_delete_result(mut self, result: Result<(), ConnectorError>) -> Self {
        self.delete_result = result;
        self
    }

    pub fn with_create_result(mut self, result: Result<UserRecord, ConnectorError>) -> Self {
        self.create_result = Some(result);
        self
    }

    /// Mutations wait for a permit on `gate` before answering.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// The user list waits for a permit on `gate` before answering.
    pub fn with_list_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.list_gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.lock_calls().clone()
    }

    pub fn count(&self, pred: impl Fn(&MockCall) -> bool) -> usize {
        self.lock_calls().iter().filter(|c| pred(c)).count()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<MockCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `call` and return how many earlier calls matched `pred`.
    fn record(&self, call: MockCall, pred: impl Fn(&MockCall) -> bool) -> usize {
        let mut calls = self.lock_calls();
        let earlier = calls.iter().filter(|c| pred(c)).count();
        calls.push(call);
        earlier
    }

    fn pick<T: Clone>(first: &T, later: &Option<T>, earlier: usize) -> T {
        match later {
            Some(later) if earlier > 0 => later.clone(),
            _ => first.clone(),
        }
    }

    async fn wait_for(gate: &Option<Arc<Semaphore>>) {
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }
}

#[async_trait::async_trait]
impl AdminServiceConnector for MockAdminServiceConnector {
    async fn get_account(&self) -> Result<SessionInfo, ConnectorError> {
        let earlier = self.record(MockCall::GetAccount, |c| *c == MockCall::GetAccount);
        Self::pick(&self.account, &self.later_account, earlier)
    }

    async fn list_users(&self, query: &PageQuery) -> Result<Vec<UserRecord>, ConnectorError> {
        let earlier = self.record(MockCall::ListUsers(query.clone()), |c| {
            matches!(c, MockCall::ListUsers(_))
        });
        Self::wait_for(&self.list_gate).await;
        Self::pick(&self.users, &self.later_users, earlier)
    }

    async fn delete_user(&self, login: &str) -> Result<(), ConnectorError> {
        self.record(MockCall::DeleteUser(login.to_string()), |_| false);
        Self::wait_for(&self.gate).await;
        self.delete_result.clone()
    }

    async fn create_user(&self, form: &NewUserForm) -> Result<UserRecord, ConnectorError> {
        self.record(MockCall::CreateUser(form.clone()), |_| false);
        Self::wait_for(&self.gate).await;
        match &self.create_result {
            Some(result) => result.clone(),
            None => Ok(UserRecord {
                id: 1000,
                login: form.email.split('@').next().unwrap_or_default().to_string(),
                first_name: form.name.clone(),
                last_name: String::new(),
                email: form.email.clone(),
                role: form.role,
            }),
        }
    }
}
