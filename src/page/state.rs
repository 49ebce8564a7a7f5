use std::collections::BTreeSet;

use crate::forms::{FormField, NewUserForm};
use crate::models::{SessionInfo, UserRecord};

pub const SESSION_FETCH_FAILED: &str = "Failed to fetch user details";
pub const LIST_FETCH_FAILED: &str = "Failed to fetch users";
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to view this page.";
pub const DELETE_SUCCEEDED: &str = "User deleted successfully.";
pub const ADD_SUCCEEDED: &str = "User added successfully.";
pub const EMPTY_LOGIN: &str = "Login must not be empty";

/// Everything the users page knows, mirrored from the last responses.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub loading: bool,
    pub error: Option<String>,
    pub session: Option<SessionInfo>,
    pub users: Vec<UserRecord>,
    pub add_form: NewUserForm,
    pub adding_user: bool,
    pub(crate) deleting: BTreeSet<String>,
    pub(crate) submitting: bool,
    pub(crate) generation: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            session: None,
            users: Vec::new(),
            add_form: NewUserForm::default(),
            adding_user: false,
            deleting: BTreeSet::new(),
            submitting: false,
            generation: 0,
        }
    }
}

impl PageState {
    pub fn is_admin(&self) -> bool {
        self.session.as_ref().map_or(false, SessionInfo::is_admin)
    }

    /// Loaded, error-free, and admin: list and mutation controls are live.
    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none() && self.is_admin()
    }

    pub fn is_deleting(&self, login: &str) -> bool {
        self.deleting.contains(login)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Start a fresh load cycle and return its generation.
    pub(crate) fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.session = None;
        self.users.clear();
        self.close_add_form();
        self.generation
    }

    pub(crate) fn open_add_form(&mut self) {
        self.adding_user = true;
    }

    pub(crate) fn close_add_form(&mut self) {
        self.adding_user = false;
        self.add_form = NewUserForm::default();
    }

    pub(crate) fn apply_field(&mut self, field: FormField) {
        self.add_form.apply(field);
    }

    /// Drop every record with this login; ids are not consulted.
    pub(crate) fn remove_login(&mut self, login: &str) {
        self.users.retain(|user| user.login != login);
    }

    pub fn view(&self) -> PageView {
        if self.loading {
            return PageView::Loading;
        }
        if let Some(error) = &self.error {
            return PageView::Failed(error.clone());
        }
        if !self.is_admin() {
            return PageView::Forbidden;
        }
        PageView::Ready {
            users: self.users.clone(),
            add_form: self.adding_user.then(|| self.add_form.clone()),
            deleting: self.deleting.iter().cloned().collect(),
            submitting: self.submitting,
        }
    }
}

/// What the presentation layer should render.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    Failed(String),
    Forbidden,
    Ready {
        users: Vec<UserRecord>,
        /// Present while the add panel is open.
        add_form: Option<NewUserForm>,
        /// Logins with a delete outstanding; their controls are disabled.
        deleting: Vec<String>,
        submitting: bool,
    },
}

impl PageView {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Forbidden => Some(FORBIDDEN_MESSAGE),
            _ => None,
        }
    }
}

/// Result of a user-triggered mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server acknowledged and local state was updated.
    Applied,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// The same mutation is still outstanding; nothing was sent.
    AlreadyInFlight,
    /// The form failed client-side validation; nothing was sent.
    Invalid(String),
    /// The page is not in a state that offers this control.
    Unavailable,
    /// The server call failed; local state is unchanged.
    Failed(String),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
