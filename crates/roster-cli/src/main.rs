use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use roster_core::client::{ClientStatus, ClientUpdate, NewClient, NewSession, SessionUpdate, Therapy};
use roster_infrastructure::ConfigService;
use roster_infrastructure::paths::DATA_DIR_ENV;
use serde::Serialize;

mod app;
mod commands;
mod logging;

use app::{AppBootstrap, AppState};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster - clients and session notes for a private practice", long_about = None)]
struct Cli {
    /// Directory holding the roster data (overrides config.toml)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Log level when ROSTER_LOG is not set (overrides config.toml)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the roster file if it does not exist yet
    Init,
    /// Print the location of the roster file
    DbPath,
    /// Print the location of config.toml
    ConfigPath,
    /// List clients, newest first
    List {
        /// Case-insensitive search over names, phone, telegram and email
        #[arg(long, short)]
        search: Option<String>,
        /// Print full client records instead of list rows
        #[arg(long)]
        full: bool,
    },
    /// Show one client with its sessions, newest first
    Show {
        id: String,
        /// Print the record exactly as stored
        #[arg(long)]
        raw: bool,
    },
    /// Add a client
    Add(AddArgs),
    /// Update fields of a client
    Update(UpdateArgs),
    /// Change the status of a client
    Status { id: String, status: ClientStatus },
    /// Delete a client and all of its sessions
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Manage session notes
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Add a session note dated now
    Add {
        client_id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Replace the notes of a session
    Update {
        client_id: String,
        session_id: String,
        #[arg(long)]
        notes: String,
    },
}

/// Optional client details shared by `add` and `update`.
#[derive(Args, Default)]
struct DetailArgs {
    #[arg(long)]
    middle_name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    telegram: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    price: Option<String>,
    /// personal, group or supervision
    #[arg(long)]
    therapy: Option<Therapy>,
    #[arg(long)]
    request: Option<String>,
    #[arg(long)]
    experience: Option<String>,
    #[arg(long)]
    comment: Option<String>,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    first_name: String,
    #[command(flatten)]
    details: DetailArgs,
}

impl From<AddArgs> for NewClient {
    fn from(args: AddArgs) -> Self {
        let d = args.details;
        NewClient {
            last_name: args.last_name,
            first_name: args.first_name,
            middle_name: d.middle_name.unwrap_or_default(),
            phone: d.phone.unwrap_or_default(),
            telegram: d.telegram.unwrap_or_default(),
            email: d.email.unwrap_or_default(),
            age: d.age.unwrap_or_default(),
            price: d.price.unwrap_or_default(),
            therapy: d.therapy,
            request: d.request.unwrap_or_default(),
            experience: d.experience.unwrap_or_default(),
            comment: d.comment.unwrap_or_default(),
        }
    }
}

#[derive(Args)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    status: Option<ClientStatus>,
    #[command(flatten)]
    details: DetailArgs,
}

impl UpdateArgs {
    fn into_parts(self) -> (String, ClientUpdate) {
        let d = self.details;
        let update = ClientUpdate {
            last_name: self.last_name,
            first_name: self.first_name,
            middle_name: d.middle_name,
            phone: d.phone,
            telegram: d.telegram,
            email: d.email,
            age: d.age,
            price: d.price,
            therapy: d.therapy,
            request: d.request,
            experience: d.experience,
            comment: d.comment,
            status: self.status,
        };
        (self.id, update)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Commands, state: &AppState) -> Result<(), String> {
    let out = |r: Result<()>| r.map_err(|e| e.to_string());

    match command {
        // The bootstrap already created the file.
        Commands::Init | Commands::DbPath => out(print_json(&commands::get_db_path(state)?)),
        Commands::ConfigPath => out(print_json(&commands::get_config_path(state)?)),
        Commands::List { search, full } => {
            if full {
                let clients = commands::get_clients(state).await?;
                out(print_json(&clients))
            } else {
                let rows = commands::list_client_rows(state, search.as_deref().unwrap_or("")).await?;
                out(print_json(&rows))
            }
        }
        Commands::Show { id, raw } => {
            if raw {
                out(print_json(&commands::get_client(state, &id).await?))
            } else {
                out(print_json(&commands::get_client_page(state, &id).await?))
            }
        }
        Commands::Add(args) => out(print_json(&commands::add_client(state, args.into()).await?)),
        Commands::Update(args) => {
            let (id, update) = args.into_parts();
            out(print_json(&commands::update_client(state, &id, update).await?))
        }
        Commands::Status { id, status } => {
            out(print_json(&commands::set_client_status(state, &id, status).await?))
        }
        Commands::Delete { id, yes } => {
            if !yes {
                return Err(format!(
                    "Deleting client {} removes all of its sessions; pass --yes to confirm",
                    id
                ));
            }
            out(print_json(&commands::delete_client(state, &id).await?))
        }
        Commands::Session { action } => match action {
            SessionAction::Add { client_id, notes } => {
                let session = commands::add_session(state, &client_id, NewSession { notes }).await?;
                out(print_json(&session))
            }
            SessionAction::Update {
                client_id,
                session_id,
                notes,
            } => {
                let session = commands::update_session(
                    state,
                    &client_id,
                    &session_id,
                    SessionUpdate::notes(notes),
                )
                .await?;
                out(print_json(&session))
            }
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new();
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config_service.get_config().log_level);
    logging::init(&log_level);

    let bootstrap = AppBootstrap::initialize(config_service, cli.data_dir).await?;

    run(cli.command, &bootstrap.app_state)
        .await
        .map_err(|e| anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_details() {
        let cli = Cli::try_parse_from([
            "roster",
            "add",
            "--last-name",
            "Ivanov",
            "--first-name",
            "Petr",
            "--therapy",
            "group",
            "--phone",
            "123",
        ])
        .unwrap();

        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        let fields = NewClient::from(args);
        assert_eq!(fields.last_name, "Ivanov");
        assert_eq!(fields.therapy, Some(Therapy::Group));
        assert_eq!(fields.phone, "123");
        assert_eq!(fields.email, "");
    }

    #[test]
    fn test_parse_update_only_sets_given_fields() {
        let cli =
            Cli::try_parse_from(["roster", "update", "abc", "--status", "archive"]).unwrap();

        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        let (id, update) = args.into_parts();
        assert_eq!(id, "abc");
        assert_eq!(update, ClientUpdate::status(ClientStatus::Archive));
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["roster", "status", "abc", "retired"]).is_err());
    }

    #[test]
    fn test_add_requires_names() {
        assert!(Cli::try_parse_from(["roster", "add", "--first-name", "Petr"]).is_err());
    }
}
