use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ledger_core::format::{money, signed_amount};
use ledger_core::{Category, RecordId, TxnType};
use ledger_store::RestStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod dashboard;
mod onboard;
mod setup;
mod state;
mod view;

use config::Connection;
use controller::{ContributionOutcome, Controller, TransactionForm};

const LOG_ENV: &str = "LEDGERLITE_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlite",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGERLITE_BUILD_SHA"), ")"),
    about = "Track income, expenses and savings goals in your Supabase project"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show balances, savings goals and transactions by category (default)
    Dashboard,

    /// Record a transaction dated today
    Add {
        /// Description, e.g. "Starbucks"
        #[arg(long)]
        name: String,

        #[arg(long)]
        amount: String,

        #[arg(long = "type", value_enum, default_value_t = KindArg::Expense)]
        kind: KindArg,

        /// Emoji label or alias: shopping, food, transport, entertainment, income, rent
        #[arg(long, default_value = "🛒", value_parser = parse_category)]
        category: Category,
    },

    /// Savings goal commands
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },

    /// Interactive dashboard (r=refresh, q=quit)
    Tui,

    /// One-time interactive setup: write the Supabase URL and anon key
    Setup,

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum GoalCommand {
    /// Create a goal, e.g. --name "New Car" --target 500000
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        target: String,
    },

    /// Add money to a goal; completion is recomputed from the new total
    Contribute {
        /// Goal id as shown on the dashboard
        #[arg(long)]
        id: String,

        #[arg(long)]
        amount: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a template config.toml with placeholders
    Init,

    /// Report which connection settings are missing
    Check,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TxnType {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Income => TxnType::Income,
            KindArg::Expense => TxnType::Expense,
        }
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse_choice(s).ok_or_else(|| {
        format!(
            "unknown category '{s}' (choose from: {})",
            view::render_category_choices()
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Dashboard);

    init_logging(matches!(command, Command::Tui))?;

    match command {
        Command::Setup => setup::run_setup()?,

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Check => {
                let cfg = config::load_effective_config()?;
                println!("Config file: {}", state::config_path()?.display());
                match config::resolve_connection(&cfg) {
                    Connection::Ready { url, .. } => println!("Ready: {url}"),
                    Connection::SetupRequired(decision) => {
                        print!("{}", view::render_setup(&decision))
                    }
                }
            }
        },

        command => {
            let Some(mut controller) = connect()? else {
                return Ok(());
            };
            run_ledger_command(command, &mut controller).await?;
        }
    }

    Ok(())
}

/// Build a controller, or print the setup screen and return `None` without touching
/// the network.
fn connect() -> Result<Option<Controller>> {
    let cfg = config::load_effective_config()?;
    match config::resolve_connection(&cfg) {
        Connection::SetupRequired(decision) => {
            print!("{}", view::render_setup(&decision));
            Ok(None)
        }
        Connection::Ready { url, anon_key } => {
            let store = Arc::new(RestStore::new(&url, &anon_key).context("configuring store")?);
            Ok(Some(Controller::new(store.clone(), store)))
        }
    }
}

async fn run_ledger_command(command: Command, controller: &mut Controller) -> Result<()> {
    controller.load().await;

    match command {
        Command::Dashboard => {
            print!("{}", view::render_dashboard(controller.state()));
        }

        Command::Tui => dashboard::run_dashboard(controller).await?,

        Command::Add {
            name,
            amount,
            kind,
            category,
        } => {
            let mut form = TransactionForm {
                name,
                amount,
                kind: kind.into(),
                category,
            };
            let today = chrono::Utc::now().date_naive();
            let saved = controller.submit_transaction(&mut form, today).await?;
            let totals = controller.state().totals();

            println!(
                "Added {} {} ({}) on {}",
                saved.category.label(),
                saved.name,
                signed_amount(&saved),
                saved.date_label()
            );
            println!(
                "Balance {} | Income {} | Expenses {}",
                money(totals.balance),
                money(totals.income),
                money(totals.expenses)
            );
        }

        Command::Goal { command } => match command {
            GoalCommand::Add { name, target } => {
                let goal = controller.add_goal(&name, &target).await?;
                println!(
                    "Created goal {} (id {}), target {}",
                    goal.name,
                    goal.id,
                    money(goal.target_amount)
                );
            }
            GoalCommand::Contribute { id, amount } => {
                let id = RecordId::new(id);
                match controller.contribute(&id, &amount).await? {
                    ContributionOutcome::Skipped => {
                        println!("No contribution amount given; nothing changed.");
                    }
                    ContributionOutcome::Recorded { update, refreshed } => {
                        match controller.state().find_goal(&id) {
                            Some(goal) if refreshed => {
                                for line in view::goal_card(goal) {
                                    println!("{line}");
                                }
                            }
                            _ => println!(
                                "Contribution saved (new total {}); the goal list could not be \
                                 re-read.",
                                money(update.current_amount)
                            ),
                        }
                    }
                }
            }
        },

        Command::Setup | Command::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // The TUI owns the terminal, so its logs go to a file.
    if to_file {
        let path = state::log_path()?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
