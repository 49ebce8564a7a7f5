use tokio::sync::broadcast;

use crate::cli::error::CliError;
use crate::cli::progress;
use crate::configuration::{get_configuration, Settings};
use crate::console::commands::CallableTrait;
use crate::forms::FormField;
use crate::models::{Role, UserRecord};
use crate::page::{
    AssumeYes, Confirmation, MutationOutcome, Notification, NotificationLevel, PageView,
    UsersPage,
};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// shared helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Load settings and apply the `--base-url` override.
pub fn resolve_settings(base_url: Option<&str>) -> Result<Settings, CliError> {
    let mut settings = get_configuration()?;
    if let Some(url) = base_url {
        settings.admin_service.base_url = url.to_string();
    }
    Ok(settings)
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)
}

/// Run the session check and list fetch behind a spinner; fail unless the list is shown.
async fn load_ready_page(page: &UsersPage) -> Result<Vec<UserRecord>, CliError> {
    let pb = progress::spinner("Loading users...");
    let view = page.load().await;
    progress::finish(&pb);

    match view {
        PageView::Ready { users, .. } => Ok(users),
        other => Err(CliError::PageUnavailable(
            other
                .message()
                .unwrap_or("Page is still loading")
                .to_string(),
        )),
    }
}

fn print_notifications(rx: &mut broadcast::Receiver<Notification>) {
    while let Ok(notification) = rx.try_recv() {
        match notification.level {
            NotificationLevel::Success => eprintln!("✓ {}", notification.message),
            NotificationLevel::Error => eprintln!("✗ {}", notification.message),
        }
    }
}

fn outcome_to_result(outcome: MutationOutcome) -> Result<(), CliError> {
    match outcome {
        MutationOutcome::Applied => Ok(()),
        // One command issues one mutation, so this only means the page state is off.
        MutationOutcome::AlreadyInFlight => Err(CliError::MutationFailed(
            "A previous request for this user is still in progress".to_string(),
        )),
        MutationOutcome::Cancelled => {
            eprintln!("Cancelled.");
            Ok(())
        }
        MutationOutcome::Invalid(msg) => Err(CliError::MutationRejected(msg)),
        MutationOutcome::Unavailable => Err(CliError::PageUnavailable(
            "User management is not available".to_string(),
        )),
        MutationOutcome::Failed(detail) => Err(CliError::MutationFailed(detail)),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Render the user page as a fixed-width table.
pub fn render_table(users: &[UserRecord]) -> String {
    let mut out = format!(
        "{:<6} {:<20} {:<24} {:<30} {:<6}\n",
        "ID", "LOGIN", "NAME", "EMAIL", "ROLE"
    );
    out.push_str(&"─".repeat(90));
    out.push('\n');
    for u in users {
        out.push_str(&format!(
            "{:<6} {:<20} {:<24} {:<30} {:<6}\n",
            u.id,
            truncate(&u.login, 18),
            truncate(&u.display_name(), 22),
            truncate(&u.email, 28),
            u.role,
        ));
    }
    out
}

/// Confirms on the terminal; anything but an explicit yes declines.
///
/// The prompt blocks the calling thread. Commands run on a current-thread
/// runtime with nothing else scheduled while it waits.
pub struct TerminalConfirmation;

impl Confirmation for TerminalConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// users list
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `userdesk users list [--json]`
///
/// Shows the first page of users when the session is admin.
pub struct ListUsersCommand {
    pub base_url: Option<String>,
    pub json: bool,
}

impl ListUsersCommand {
    pub fn new(base_url: Option<String>, json: bool) -> Self {
        Self { base_url, json }
    }
}

impl CallableTrait for ListUsersCommand {
    fn call(&self) -> Result<(), CliError> {
        let settings = resolve_settings(self.base_url.as_deref())?;

        runtime()?.block_on(async {
            let page = UsersPage::from_config(&settings.admin_service)?;
            let users = load_ready_page(&page).await?;

            if self.json {
                println!("{}", serde_json::to_string_pretty(&users)?);
                return Ok(());
            }

            if users.is_empty() {
                eprintln!("No users found.");
                return Ok(());
            }

            print!("{}", render_table(&users));
            eprintln!("\n{} user(s) shown.", users.len());
            Ok(())
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// users delete
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `userdesk users delete <LOGIN> [--yes]`
pub struct DeleteUserCommand {
    pub base_url: Option<String>,
    pub login: String,
    pub yes: bool,
}

impl DeleteUserCommand {
    pub fn new(base_url: Option<String>, login: String, yes: bool) -> Self {
        Self {
            base_url,
            login,
            yes,
        }
    }
}

impl CallableTrait for DeleteUserCommand {
    fn call(&self) -> Result<(), CliError> {
        let settings = resolve_settings(self.base_url.as_deref())?;

        runtime()?.block_on(async {
            let page = UsersPage::from_config(&settings.admin_service)?;
            let mut notifications = page.subscribe();
            load_ready_page(&page).await?;

            let outcome = if self.yes {
                page.delete_user(&self.login, &AssumeYes).await
            } else {
                page.delete_user(&self.login, &TerminalConfirmation).await
            };

            print_notifications(&mut notifications);
            outcome_to_result(outcome)
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// users add
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `userdesk users add --name <NAME> --email <EMAIL> [--role user|admin]`
pub struct AddUserCommand {
    pub base_url: Option<String>,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl AddUserCommand {
    pub fn new(base_url: Option<String>, name: String, email: String, role: String) -> Self {
        Self {
            base_url,
            name,
            email,
            role,
        }
    }
}

impl CallableTrait for AddUserCommand {
    fn call(&self) -> Result<(), CliError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|reason| CliError::InvalidArgument {
                name: "--role".to_string(),
                reason,
            })?;
        let settings = resolve_settings(self.base_url.as_deref())?;

        runtime()?.block_on(async {
            let page = UsersPage::from_config(&settings.admin_service)?;
            let mut notifications = page.subscribe();
            load_ready_page(&page).await?;

            if !page.open_add_form() {
                return Err(CliError::PageUnavailable(
                    "User management is not available".to_string(),
                ));
            }
            page.update_form(FormField::Name(self.name.clone()));
            page.update_form(FormField::Email(self.email.clone()));
            page.update_form(FormField::Role(role));
            let outcome = page.submit_new_user().await;

            print_notifications(&mut notifications);
            if outcome.is_applied() {
                if let PageView::Ready { users, .. } = page.view() {
                    if let Some(created) = users.last() {
                        print!("{}", render_table(std::slice::from_ref(created)));
                    }
                }
            }
            outcome_to_result(outcome)
        })
    }
}
