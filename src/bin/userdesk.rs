//! `userdesk` CLI binary.
//!
//! Drives the admin users page from a terminal:
//!
//! ```text
//! userdesk users list
//! userdesk users add --name Carol --email carol@example.com --role user
//! userdesk users delete carol
//! ```
//!
//! The service location comes from `configuration.yaml`, the
//! `USERDESK__ADMIN_SERVICE__BASE_URL` variable, or `--base-url`.

use clap::{Parser, Subcommand};
use userdesk::console::commands::cli::users::{AddUserCommand, DeleteUserCommand, ListUsersCommand};
use userdesk::console::commands::CallableTrait;
use userdesk::telemetry::{get_subscriber, init_subscriber};

#[derive(Parser, Debug)]
#[command(
    name = "userdesk",
    version,
    about = "Manage users through the admin REST API"
)]
struct Cli {
    /// API base URL (overrides configuration)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Admin user management
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
}

#[derive(Debug, Subcommand)]
enum UsersCommands {
    /// Show the first page of users (admin only)
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Delete a user by login
    Delete {
        /// Login of the user to delete
        login: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Create a user
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Role: user, admin
        #[arg(long, default_value = "user")]
        role: String,
    },
}

fn main() {
    let subscriber = get_subscriber("userdesk".into(), "warn".into(), std::io::stderr);
    if let Err(err) = init_subscriber(subscriber) {
        eprintln!("Failed to initialise logging: {}", err);
    }

    let cli = Cli::parse();
    let command = get_command(cli);
    if let Err(err) = command.call() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn get_command(cli: Cli) -> Box<dyn CallableTrait> {
    let base_url = cli.base_url;
    match cli.command {
        Commands::Users { command } => match command {
            UsersCommands::List { json } => Box::new(ListUsersCommand::new(base_url, json)),
            UsersCommands::Delete { login, yes } => {
                Box::new(DeleteUserCommand::new(base_url, login, yes))
            }
            UsersCommands::Add { name, email, role } => {
                Box::new(AddUserCommand::new(base_url, name, email, role))
            }
        },
    }
}
