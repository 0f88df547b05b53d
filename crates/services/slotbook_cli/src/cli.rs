// File: services/slotbook_cli/src/cli.rs
use std::sync::Arc;

use clap::{Parser, Subcommand};
use slotbook_client::format::{mini_app_link, today_iso};
use slotbook_client::messages::UNRESOLVED_USER_TEXT;
use slotbook_client::{
    AdminPanel, BookingClient, BookingForm, HttpBookingApi, RenderContext, UserContext,
};
use slotbook_common::models::UserQuery;
use slotbook_common::{BookingApi, BookingError};
use slotbook_config::{AppConfig, IdentitySource};
use thiserror::Error;
use tracing::info;

use crate::terminal::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "slotbook", version, about = "Book appointment slots from the terminal")]
pub struct Cli {
    /// Page URL the booking page was opened with (`...?name=...&user_id=...`)
    #[arg(long, global = true, conflicts_with = "init_data")]
    pub page_url: Option<String>,

    /// Telegram init data: the raw query string or the user JSON object
    #[arg(long, global = true)]
    pub init_data: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Full page load: profile, dates, today's slots and bookings
    Load,
    /// Dates that have free slots
    Dates,
    /// Free slots for a date (today by default)
    Slots {
        #[arg(long)]
        date: Option<String>,
    },
    /// Book a slot
    Book {
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        /// Contact name, for the contact payload
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Your bookings
    Bookings,
    /// Bookings recorded under a name
    Records {
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete one of your bookings
    Cancel { booking_id: i64 },
    /// Print the booking page link for a user
    Link {
        #[arg(long)]
        name: String,
        #[arg(long)]
        user_id: i64,
    },
    /// Admin panel (requires admin_mode)
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// List all users
    Users,
    /// Find users by Telegram id and/or phone
    Find {
        #[arg(long)]
        telegram_id: Option<i64>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show a user's bookings
    UserBookings { telegram_id: i64 },
    /// Delete a user after confirmation
    DeleteUser {
        telegram_id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Generate slots on the service
    GenerateSlots,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error("Admin commands are disabled; set admin_mode = true")]
    AdminDisabled,
    #[error("No Mini App URL configured; set mini_app.url")]
    MiniAppMissing,
    #[error("User deletion cancelled")]
    Cancelled,
}

/// Identity from the command line, read according to which flag was given.
pub fn resolve_context(cli: &Cli, config: &AppConfig) -> UserContext {
    match (&cli.page_url, &cli.init_data) {
        (Some(page_url), _) => UserContext::resolve(IdentitySource::Url, page_url),
        (None, Some(init_data)) => UserContext::resolve(IdentitySource::Host, init_data),
        (None, None) => UserContext::resolve(config.identity_source, ""),
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> Result<(), CliError> {
    let api: Arc<dyn BookingApi> = Arc::new(HttpBookingApi::from_config(&config)?);
    info!(base_url = %config.api.normalized_base_url(), "Booking service selected");

    match &cli.command {
        Command::Admin { command } => run_admin(command, api, &config).await,
        Command::Link { name, user_id } => {
            let mini_app = config.mini_app.as_ref().ok_or(CliError::MiniAppMissing)?;
            println!("{}", mini_app_link(&mini_app.url, name, *user_id));
            Ok(())
        }
        command => {
            let view: Arc<dyn RenderContext> = Arc::new(TerminalView::new());
            let context = resolve_context(&cli, &config);
            let client = BookingClient::from_config(api, view.clone(), context, &config);
            run_page(command, &client, view.as_ref()).await
        }
    }
}

async fn run_page(
    command: &Command,
    client: &BookingClient,
    view: &dyn RenderContext,
) -> Result<(), CliError> {
    match command {
        Command::Load => client.load(&today_iso()).await,
        Command::Dates => {
            client.load_dates().await?;
        }
        Command::Slots { date } => {
            let date = date.clone().unwrap_or_else(today_iso);
            client.load_slots(&date).await?;
        }
        Command::Book {
            date,
            time,
            name,
            phone,
        } => {
            client.render_context();
            let form = BookingForm::new(date.as_str(), time.as_str()).with_contact(
                name.clone().unwrap_or_default(),
                phone.clone().unwrap_or_default(),
            );
            client.submit(&form).await?;
        }
        Command::Bookings => match client.context().user_id() {
            Some(user_id) => {
                client.load_bookings(user_id).await?;
            }
            None => {
                view.set_status(UNRESOLVED_USER_TEXT);
                return Err(BookingError::UnresolvedUser.into());
            }
        },
        Command::Records { name } => {
            let name = name
                .as_deref()
                .unwrap_or_else(|| client.context().name())
                .to_string();
            client.load_records(&name).await?;
        }
        Command::Cancel { booking_id } => {
            client.delete_booking(*booking_id).await?;
        }
        Command::Link { .. } | Command::Admin { .. } => {}
    }
    Ok(())
}

async fn run_admin(
    command: &AdminCommand,
    api: Arc<dyn BookingApi>,
    config: &AppConfig,
) -> Result<(), CliError> {
    if !config.admin_mode {
        return Err(CliError::AdminDisabled);
    }
    let assume_yes = matches!(command, AdminCommand::DeleteUser { yes: true, .. });
    let panel = AdminPanel::new(api, Arc::new(TerminalView::new().assume_yes(assume_yes)));

    match command {
        AdminCommand::Users => {
            panel.load_users().await?;
        }
        AdminCommand::Find { telegram_id, phone } => {
            let query = UserQuery {
                telegram_id: *telegram_id,
                phone: phone.clone(),
            };
            panel.find_users(&query).await?;
        }
        AdminCommand::UserBookings { telegram_id } => {
            panel.view_bookings(*telegram_id).await?;
        }
        AdminCommand::DeleteUser { telegram_id, .. } => {
            if !panel.delete_user(*telegram_id).await? {
                return Err(CliError::Cancelled);
            }
        }
        AdminCommand::GenerateSlots => {
            panel.generate_slots().await?;
        }
    }
    Ok(())
}
