use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use purchase_order_relay::common::simple_types::ReferenceNumber;
use purchase_order_relay::counter::{FileCounter, OrderReferenceCounter, SEED};
use purchase_order_relay::logging;
use purchase_order_relay::place_order::{api, PurchaseOrderDraft};
use purchase_order_relay::presenter::{Banner, Summary, DEFAULT_COMPANY_NAME};
use purchase_order_relay::relay_client::{RelayClient, DEFAULT_RELAY_URL};

/// Collects a purchase order and submits it through the local relay.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Relay endpoint orders are posted to
    #[arg(long, global = true, env = "PO_RELAY_URL", default_value = DEFAULT_RELAY_URL)]
    relay_url: String,

    /// File holding the order reference counter
    #[arg(long, global = true, env = "PO_COUNTER_FILE")]
    counter_file: Option<PathBuf>,

    /// Company named in the "accepted" banner
    #[arg(long, global = true, env = "PO_COMPANY_NAME", default_value = DEFAULT_COMPANY_NAME)]
    company_name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a draft (the sample draft when --draft is omitted)
    Submit {
        /// JSON draft to submit
        #[arg(long)]
        draft: Option<PathBuf>,

        /// Skip incomplete line items without asking
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Write the sample draft as JSON, to edit and submit later
    Draft {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Inspect or reset the order reference counter
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },
}

#[derive(Subcommand, Debug)]
enum CounterAction {
    /// Show the current value and the next reference number
    Show,
    /// Put the counter back to its starting value
    Reset,
}

#[tokio::main]
async fn main() {
    logging::init("warn", false);

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let counter = match &cli.counter_file {
        Some(path) => FileCounter::new(path),
        None => FileCounter::new(FileCounter::default_path().context(
            "No local data directory for the order counter; pass --counter-file",
        )?),
    };

    match cli.command {
        Command::Submit { draft, yes } => {
            let draft = load_draft(draft)?;
            let relay = RelayClient::new(&cli.relay_url);
            let placed = api::place_order(&relay, &counter, &draft, yes).await?;

            let summary = Summary::of(&placed, &cli.company_name);
            let rendered = summary.to_string();
            let (first, rest) = rendered.split_once('\n').unwrap_or((rendered.as_str(), ""));
            let first = match summary.banner() {
                Banner::Accepted | Banner::Submitted => first.green().bold(),
                Banner::Warning => first.yellow().bold(),
                Banner::Failed => first.red().bold(),
            };
            println!("{first}\n{rest}");
        }
        Command::Draft { out } => {
            let json = serde_json::to_string_pretty(&PurchaseOrderDraft::sample_now())?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote sample draft to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Counter { action } => match action {
            CounterAction::Show => {
                let current = counter.read()?;
                println!("Counter file: {}", counter.path().display());
                println!("Current value: {current}");
                println!("Next order: {}", ReferenceNumber::new(current + 1));
            }
            CounterAction::Reset => {
                counter.reset()?;
                println!(
                    "Counter reset to {SEED}. Next order will be {}",
                    ReferenceNumber::new(SEED + 1)
                );
            }
        },
    }
    Ok(())
}

fn load_draft(path: Option<PathBuf>) -> Result<PurchaseOrderDraft> {
    let Some(path) = path else {
        return Ok(PurchaseOrderDraft::sample_now());
    };
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse draft {}", path.display()))
}
