use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use payout_calc::application::service::PayoutService;
use payout_calc::domain::inputs::{CalculatorInputs, CurrencyCode, Mode};
use payout_calc::domain::ports::{HistoryStoreBox, Session, SessionStoreBox};
use payout_calc::infrastructure::in_memory::{InMemoryHistoryStore, InMemorySessionStore};
use payout_calc::infrastructure::json_file::JsonFileStore;
#[cfg(feature = "storage-rocksdb")]
use payout_calc::infrastructure::rocksdb::RocksDBStore;
use payout_calc::interfaces::csv::history_writer::{HistoryWriter, default_file_name_at};
use payout_calc::interfaces::display::{HistoryTable, PayoutSummary};
use payout_calc::interfaces::input::{parse_amount, parse_days};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about = "Freelance payout calculator", long_about = None)]
struct Cli {
    /// JSON file holding the last inputs and the saved history
    #[arg(
        long,
        global = true,
        env = "PAYOUT_STORE",
        default_value = "payout_calc.json"
    )]
    store: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Keep everything in memory for this run
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Net payout for the hours worked
    Payout(CalcArgs),
    /// Hours needed to reach a target net payout
    Target(CalcArgs),
    /// Saved calculations
    #[command(subcommand)]
    History(HistoryCommand),
}

/// Calculator inputs. Anything left out keeps its value from the last run.
#[derive(Args)]
struct CalcArgs {
    /// Hourly rate in the base currency
    #[arg(long, value_parser = parse_amount)]
    rate: Option<Decimal>,
    /// Hours worked
    #[arg(long, value_parser = parse_amount)]
    hours: Option<Decimal>,
    /// Platform service fee, in percent
    #[arg(long, value_parser = parse_amount)]
    fee: Option<Decimal>,
    /// VAT charged on the service fee, in percent
    #[arg(long, value_parser = parse_amount)]
    vat: Option<Decimal>,
    /// Fixed withdrawal fee in the base currency
    #[arg(long, value_parser = parse_amount)]
    withdrawal: Option<Decimal>,
    /// Units of local currency per unit of base currency
    #[arg(long, value_parser = parse_amount)]
    exchange_rate: Option<Decimal>,
    /// Net payout to reach (target mode)
    #[arg(long, value_parser = parse_amount)]
    target: Option<Decimal>,
    /// Working days per week (target mode)
    #[arg(long, value_parser = parse_days)]
    days: Option<u32>,
    /// Base currency code
    #[arg(long)]
    currency: Option<String>,
    /// Local currency code
    #[arg(long)]
    local_currency: Option<String>,
    /// Save the result to history
    #[arg(long)]
    save: bool,
}

impl CalcArgs {
    fn apply(&self, mut inputs: CalculatorInputs) -> CalculatorInputs {
        let decimals = [
            (self.rate, &mut inputs.hourly_rate),
            (self.hours, &mut inputs.hours_worked),
            (self.fee, &mut inputs.service_fee_rate),
            (self.vat, &mut inputs.vat_rate),
            (self.withdrawal, &mut inputs.withdrawal_fee),
            (self.exchange_rate, &mut inputs.exchange_rate),
        ];
        for (arg, field) in decimals {
            if let Some(value) = arg {
                *field = value;
            }
        }
        if self.target.is_some() {
            inputs.target_net = self.target;
        }
        if let Some(days) = self.days {
            inputs.working_days_per_week = days;
        }
        if let Some(code) = &self.currency {
            inputs.currency = CurrencyCode::new(code.as_str());
        }
        if let Some(code) = &self.local_currency {
            inputs.local_currency = CurrencyCode::new(code.as_str());
        }
        inputs
    }
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List saved calculations, newest first
    List,
    /// Delete one saved calculation
    Delete {
        /// Entry ID as shown by `history list`
        id: Uuid,
    },
    /// Delete all saved calculations
    Clear,
    /// Export saved calculations to CSV
    Export {
        /// Output file; `-` writes to stdout. Defaults to payout_history_<date>.csv
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn json_stores(path: &Path) -> (HistoryStoreBox, SessionStoreBox) {
    log::debug!("using store file {}", path.display());
    let store = JsonFileStore::open(path);
    (Box::new(store.clone()), Box::new(store))
}

#[cfg(feature = "storage-rocksdb")]
fn db_stores(db_path: &Path, _fallback: &Path) -> Result<(HistoryStoreBox, SessionStoreBox)> {
    let store = RocksDBStore::open(db_path).into_diagnostic()?;
    Ok((Box::new(store.clone()), Box::new(store)))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn db_stores(db_path: &Path, fallback: &Path) -> Result<(HistoryStoreBox, SessionStoreBox)> {
    log::warn!(
        "Persistent storage requested via --db-path {}, but 'storage-rocksdb' feature is not enabled. Falling back to {}.",
        db_path.display(),
        fallback.display()
    );
    Ok(json_stores(fallback))
}

fn build_service(cli: &Cli) -> Result<PayoutService> {
    let (history_store, session_store) = if cli.ephemeral {
        let history_store: HistoryStoreBox = Box::new(InMemoryHistoryStore::new());
        let session_store: SessionStoreBox = Box::new(InMemorySessionStore::new());
        (history_store, session_store)
    } else if let Some(db_path) = &cli.db_path {
        db_stores(db_path, &cli.store)?
    } else {
        json_stores(&cli.store)
    };

    Ok(PayoutService::new(history_store, session_store))
}

async fn run_calculation(service: &PayoutService, mode: Mode, args: &CalcArgs) -> Result<()> {
    let session = service.load_session().await.into_diagnostic()?;
    let inputs = args.apply(session.inputs);
    let results = service.calculate(mode, &inputs);

    println!(
        "{}",
        PayoutSummary {
            mode,
            inputs: &inputs,
            results: &results,
        }
    );

    service
        .store_session(Session {
            mode,
            inputs: inputs.clone(),
        })
        .await
        .into_diagnostic()?;

    if args.save {
        let entry = service
            .save(mode, inputs, results)
            .await
            .into_diagnostic()?;
        println!("\nSaved entry {}", entry.id());
    }
    Ok(())
}

async fn run_history(service: &PayoutService, command: &HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List => {
            let entries = service.history().await.into_diagnostic()?;
            println!("{}", HistoryTable(&entries));
        }
        HistoryCommand::Delete { id } => {
            service.delete(*id).await.into_diagnostic()?;
            println!("Deleted entry {id}");
        }
        HistoryCommand::Clear => {
            service.clear_history().await.into_diagnostic()?;
            println!("History cleared");
        }
        HistoryCommand::Export { output } => {
            let entries = service.history().await.into_diagnostic()?;
            if entries.is_empty() {
                eprintln!("No history to export");
                return Ok(());
            }

            let path = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_file_name_at(&Utc::now())));
            if path == Path::new("-") {
                let stdout = io::stdout();
                let mut writer = HistoryWriter::new(stdout.lock());
                writer.write_entries(&entries).into_diagnostic()?;
            } else {
                let file = File::create(&path).into_diagnostic()?;
                let rows = HistoryWriter::new(file)
                    .write_entries(&entries)
                    .into_diagnostic()?;
                eprintln!("Exported {rows} entries to {}", path.display());
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let service = build_service(&cli)?;

    match &cli.command {
        Command::Payout(args) => run_calculation(&service, Mode::Payout, args).await,
        Command::Target(args) => run_calculation(&service, Mode::Target, args).await,
        Command::History(command) => run_history(&service, command).await,
    }
}
