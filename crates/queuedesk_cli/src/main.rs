//! Command-line frontend for the queuedesk reception board.
//!
//! # Responsibility
//! - Wire user actions (issue/advance/configure/board/reset) to the core
//!   ticket service.
//! - Own every confirmation prompt; core never talks to the terminal.
//!
//! All commands re-print the full board after mutating, mirroring the
//! full re-render contract of the core projection.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use queuedesk_core::{
    open_db, BoardView, NotificationBadge, NotificationType, SqliteStateRepository, Ticket,
    TicketEdit, TicketService,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "queuedesk")]
#[command(about = "Reception queue-ticket board for a service counter", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Board database file
    #[arg(long, default_value = "queuedesk.db")]
    db: PathBuf,

    /// Enable file logging into this directory (absolute path)
    #[arg(long)]
    log_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue the next numbered ticket
    Issue,

    /// Move a preparing ticket to ready
    Advance {
        /// Queue number as shown on the board
        number: u32,
    },

    /// Set customer name and notification channel for a ticket
    Configure {
        /// Queue number as shown on the board
        number: u32,

        /// Customer display name (empty clears it)
        #[arg(long, default_value = "")]
        name: String,

        /// Notification channel
        #[arg(long, value_enum, default_value = "none")]
        notify: NotifyArg,

        /// Email address (email) or messaging deep link (messaging)
        #[arg(long, default_value = "")]
        url: String,

        /// Apply without the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Print the current board
    Board,

    /// Clear all tickets and restart numbering at 1
    Reset {
        /// Reset without the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NotifyArg {
    None,
    Email,
    Messaging,
}

impl From<NotifyArg> for NotificationType {
    fn from(value: NotifyArg) -> Self {
        match value {
            NotifyArg::None => Self::None,
            NotifyArg::Email => Self::Email,
            NotifyArg::Messaging => Self::Messaging,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        queuedesk_core::init_logging(queuedesk_core::default_log_level(), log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open board database at {}", cli.db.display()))?;
    let repo = SqliteStateRepository::new(&conn);
    let mut service = TicketService::open(repo).context("failed to load board state")?;

    match cli.command {
        Commands::Issue => {
            let ticket = service.issue_ticket()?;
            println!("issued ticket No. {}", ticket.number);
            print_board(&service);
        }
        Commands::Advance { number } => {
            let ticket = find_by_number(&service, number)?;
            if service.advance_ticket(ticket.id)? {
                println!("ticket No. {number} is ready");
            } else {
                println!("ticket No. {number} was already ready");
            }
            print_board(&service);
        }
        Commands::Configure {
            number,
            name,
            notify,
            url,
            yes,
        } => {
            let ticket = find_by_number(&service, number)?;
            let current = service
                .open_editor(ticket.id)
                .context("ticket disappeared while opening the editor")?;

            service.stage_edit(TicketEdit {
                name,
                notification_type: notify.into(),
                url,
            });

            if yes || confirm(&format!("Apply these settings to ticket No. {number}?"))? {
                if service.commit_edit()? {
                    println!("updated ticket No. {number}");
                }
            } else {
                service.cancel_edit();
                let kept_name = if current.name.is_empty() {
                    "-"
                } else {
                    current.name.as_str()
                };
                println!("kept previous settings (name: {kept_name})");
            }
            print_board(&service);
        }
        Commands::Board => print_board(&service),
        Commands::Reset { yes } => {
            if yes || confirm("Really reset all data? This cannot be undone.")? {
                service.reset_all()?;
                println!("board reset");
            } else {
                println!("reset cancelled");
            }
        }
    }

    Ok(())
}

fn find_by_number<R: queuedesk_core::StateRepository>(
    service: &TicketService<R>,
    number: u32,
) -> Result<Ticket> {
    match service.tickets().iter().find(|t| t.number == number) {
        Some(ticket) => Ok(ticket.clone()),
        None => bail!("no ticket with number {number} on the board"),
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_board<R: queuedesk_core::StateRepository>(service: &TicketService<R>) {
    let view = BoardView::project(service.state());

    println!();
    println!("queuedesk  {}", Local::now().format("%m/%d %H:%M"));
    match view.latest_number {
        Some(number) => println!("latest number: {number}"),
        None => println!("latest number: --"),
    }

    print_group("PREPARING", &view.preparing);
    print_group("READY", &view.ready);
}

fn print_group(title: &str, cards: &[queuedesk_core::TicketCard]) {
    println!();
    println!("{title} ({})", cards.len());
    for card in cards {
        let mut line = format!("  No. {:<4} received {}", card.number, card.received_at);
        if let Some(completed_at) = &card.completed_at {
            line.push_str(&format!("  ready {completed_at}"));
        }
        if let Some(name) = &card.name {
            line.push_str(&format!("  {name}"));
        }
        match &card.notification {
            NotificationBadge::None => {}
            NotificationBadge::Label(label) => line.push_str(&format!("  [{label}]")),
            NotificationBadge::Link { label, href } => {
                line.push_str(&format!("  [{label}: {href}]"))
            }
        }
        if card.can_advance {
            line.push_str("  (advance available)");
        }
        println!("{line}");
    }
}
