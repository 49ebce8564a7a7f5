//! Admin "Users" page state machine.
//!
//! [`UsersPage::load`] checks the session and, only for admins, fetches the
//! first page of users. Deletes and additions are reconciled with the server's
//! acknowledgement and reported through a [`Notification`] channel; the
//! presentation layer renders [`PageView`] snapshots and supplies a
//! [`Confirmation`] for destructive actions.

mod confirmation;
mod notification;
mod state;
mod users_page;


pub use confirmation::{delete_prompt, AssumeYes, Confirmation};
pub use notification::{Notification, NotificationLevel, Notifier};
pub use state::{
    MutationOutcome, PageState, PageView, ADD_SUCCEEDED, DELETE_SUCCEEDED, EMPTY_LOGIN,
    FORBIDDEN_MESSAGE, LIST_FETCH_FAILED, SESSION_FETCH_FAILED,
};
pub use users_page::UsersPage;
