use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::connectors::{
    AdminServiceClient, AdminServiceConfig, AdminServiceConnector, ConnectorError, PageQuery,
};
use crate::forms::FormField;

use super::confirmation::{delete_prompt, Confirmation};
use super::notification::{Notification, Notifier};
use super::state::{
    MutationOutcome, PageState, PageView, ADD_SUCCEEDED, DELETE_SUCCEEDED, EMPTY_LOGIN,
    LIST_FETCH_FAILED, SESSION_FETCH_FAILED,
};

struct Inner {
    connector: Arc<dyn AdminServiceConnector>,
    query: PageQuery,
    state: Mutex<PageState>,
    notifier: Notifier,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to the admin users page.
///
/// Clones share the same state, so several operations may be in flight at once
/// from one task. The state lock is never held across a request.
#[derive(Clone)]
pub struct UsersPage {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for UsersPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsersPage")
            .field("query", &self.inner.query)
            .field("state", &*self.inner.state())
            .finish()
    }
}

impl UsersPage {
    pub fn new(connector: Arc<dyn AdminServiceConnector>, page_size: u32) -> Self {
        Self {
            inner: Arc::new(Inner {
                connector,
                query: PageQuery::first(page_size),
                state: Mutex::new(PageState::default()),
                notifier: Notifier::new(),
            }),
        }
    }

    /// Build a page talking HTTP to the configured service.
    pub fn from_config(config: &AdminServiceConfig) -> Result<Self, ConnectorError> {
        let page_size = config.page_size;
        let client = AdminServiceClient::new(config.clone())?;
        tracing::info!("Users page bound to {}", client.base_url());
        Ok(Self::new(Arc::new(client), page_size))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifier.subscribe()
    }

    pub fn view(&self) -> PageView {
        self.inner.state().view()
    }

    pub fn snapshot(&self) -> PageState {
        self.inner.state().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state().loading
    }

    /// Check the session, then fetch the user page if and only if the session is admin.
    ///
    /// The loading flag is cleared on every exit path. A newer `load` supersedes
    /// an older one still in flight: the older one's results are discarded.
    pub async fn load(&self) -> PageView {
        let generation = self.inner.state().begin_load();
        {
            let _loading = LoadingGuard {
                inner: &self.inner,
                generation,
            };
            self.check_session_and_list(generation).await;
        }
        self.view()
    }

    async fn check_session_and_list(&self, generation: u64) {
        let session = match self.inner.connector.get_account().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Session check failed: {}", e);
                self.apply_if_current(generation, |state| {
                    state.error = Some(SESSION_FETCH_FAILED.to_string());
                });
                return;
            }
        };

        let is_admin = session.is_admin();
        self.apply_if_current(generation, |state| state.session = Some(session));
        if !is_admin {
            tracing::info!("Session lacks admin authority, skipping user list");
            return;
        }

        match self.inner.connector.list_users(&self.inner.query).await {
            Ok(users) => {
                tracing::info!("Loaded {} users", users.len());
                self.apply_if_current(generation, |state| state.users = users);
            }
            Err(e) => {
                tracing::warn!("User list fetch failed: {}", e);
                self.apply_if_current(generation, |state| {
                    state.error = Some(LIST_FETCH_FAILED.to_string());
                });
            }
        }
    }

    fn apply_if_current(&self, generation: u64, update: impl FnOnce(&mut PageState)) {
        let mut state = self.inner.state();
        if state.generation == generation {
            update(&mut state);
        } else {
            tracing::debug!(generation, "Discarding result of superseded load");
        }
    }

    /// Delete a user by login after confirmation.
    ///
    /// Readiness is checked again after the prompt, under the same lock that marks
    /// the delete outstanding, so a reload during confirmation sends nothing.
    pub async fn delete_user(&self, login: &str, confirmation: &dyn Confirmation) -> MutationOutcome {
        if login.is_empty() {
            return MutationOutcome::Invalid(EMPTY_LOGIN.to_string());
        }
        {
            let state = self.inner.state();
            if !state.is_ready() {
                return MutationOutcome::Unavailable;
            }
            if state.is_deleting(login) {
                return MutationOutcome::AlreadyInFlight;
            }
        }

        if !confirmation.confirm(&delete_prompt(login)) {
            tracing::debug!(login = %login, "Delete cancelled");
            return MutationOutcome::Cancelled;
        }

        let _in_flight = match InFlightGuard::delete(&self.inner, login) {
            Ok(guard) => guard,
            Err(outcome) => {
                tracing::debug!(login = %login, "Delete dropped after confirmation: {:?}", outcome);
                return outcome;
            }
        };

        match self.inner.connector.delete_user(login).await {
            Ok(()) => {
                self.inner.state().remove_login(login);
                self.inner
                    .notifier
                    .publish(Notification::success(DELETE_SUCCEEDED));
                MutationOutcome::Applied
            }
            Err(e) => {
                let detail = e.to_string();
                self.inner.notifier.publish(Notification::error(format!(
                    "Failed to delete the user: {}",
                    detail
                )));
                MutationOutcome::Failed(detail)
            }
        }
    }

    /// Open the add-user panel. Returns false when the page offers no controls.
    pub fn open_add_form(&self) -> bool {
        let mut state = self.inner.state();
        if !state.is_ready() {
            return false;
        }
        state.open_add_form();
        true
    }

    /// Close the panel and clear the buffer.
    pub fn cancel_add_form(&self) {
        self.inner.state().close_add_form();
    }

    /// Edit the add form. Ignored while the panel is closed.
    pub fn update_form(&self, field: FormField) -> bool {
        let mut state = self.inner.state();
        if !state.adding_user {
            return false;
        }
        state.apply_field(field);
        true
    }

    /// Validate and submit the add form.
    pub async fn submit_new_user(&self) -> MutationOutcome {
        let (form, _in_flight) = {
            let mut state = self.inner.state();
            if !state.is_ready() || !state.adding_user {
                return MutationOutcome::Unavailable;
            }
            if state.submitting {
                return MutationOutcome::AlreadyInFlight;
            }
            if let Err(errors) = state.add_form.check() {
                tracing::debug!("Add form rejected: {}", errors);
                return MutationOutcome::Invalid(errors);
            }
            state.submitting = true;
            (
                state.add_form.clone(),
                InFlightGuard {
                    inner: &self.inner,
                    key: InFlightKey::Submit,
                },
            )
        };

        match self.inner.connector.create_user(&form).await {
            Ok(record) => {
                {
                    let mut state = self.inner.state();
                    state.users.push(record);
                    state.close_add_form();
                }
                self.inner
                    .notifier
                    .publish(Notification::success(ADD_SUCCEEDED));
                MutationOutcome::Applied
            }
            Err(e) => {
                let detail = e.to_string();
                self.inner
                    .notifier
                    .publish(Notification::error(format!("Failed to add user: {}", detail)));
                MutationOutcome::Failed(detail)
            }
        }
    }
}

struct LoadingGuard<'a> {
    inner: &'a Inner,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.inner.state();
        if state.generation == self.generation {
            state.loading = false;
        }
    }
}

enum InFlightKey {
    Delete(String),
    Submit,
}

/// Marks a mutation outstanding until dropped.
struct InFlightGuard<'a> {
    inner: &'a Inner,
    key: InFlightKey,
}

impl<'a> InFlightGuard<'a> {
    fn delete(inner: &'a Inner, login: &str) -> Result<Self, MutationOutcome> {
        let mut state = inner.state();
        if !state.is_ready() {
            return Err(MutationOutcome::Unavailable);
        }
        if !state.deleting.insert(login.to_string()) {
            return Err(MutationOutcome::AlreadyInFlight);
        }
        Ok(Self {
            inner,
            key: InFlightKey::Delete(login.to_string()),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.inner.state();
        match &self.key {
            InFlightKey::Delete(login) => {
                state.deleting.remove(login);
            }
            InFlightKey::Submit => state.submitting = false,
        }
    }
}
