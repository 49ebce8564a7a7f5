pub mod user;

pub use user::{FormField, NewUserForm};
