//! registry-cli: demo command line for the customer registry.
//!
//! Seeds an in-memory registry with the reference customers and runs
//! lookups against it. Nothing is persisted between runs.
//!
//! Run:
//! ```bash
//! # the three reference lookups
//! cargo run -p registry-cli -- demo
//!
//! # ad-hoc lookup with reproducible ids and JSON output
//! CUSTOMER_ID_SEED=7 cargo run -p registry-cli -- find --customer-type business --output json
//! ```
//!
//! Configuration: See `config.rs` for all environment variables.

mod config;

use std::io::Write;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use customer_domain::adapters::memory_repo::InMemoryRepo;
use customer_domain::id::{RandomIdGenerator, SeededIdGenerator};
use customer_domain::service::CustomerService;
use customer_domain::{Customer, CustomerFilter, CustomerId, CustomerIdGenerator, NewCustomer};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(version, about = "Demo command line for the in-memory customer registry")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the reference lookups against the seeded registry
    Demo,
    /// Look up seeded customers by account number, sort code and/or type
    Find(FindArgs),
}

#[derive(Debug, clap::Args)]
struct FindArgs {
    /// Exact account number to match
    #[arg(long)]
    account_number: Option<String>,

    /// Exact sort code to match
    #[arg(long)]
    sort_code: Option<String>,

    /// Exact customer type to match
    #[arg(long)]
    customer_type: Option<String>,

    /// Output format (default: text).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Id source picked from configuration.
enum IdSource {
    Random(RandomIdGenerator),
    Seeded(SeededIdGenerator),
}

impl CustomerIdGenerator for IdSource {
    fn next_id(&self) -> CustomerId {
        match self {
            IdSource::Random(g) => g.next_id(),
            IdSource::Seeded(g) => g.next_id(),
        }
    }
}

type Registry = CustomerService<InMemoryRepo, IdSource>;

#[derive(Serialize)]
struct FindOutput<'a> {
    filter: &'a CustomerFilter,
    matches: Vec<&'a Customer>,
}

fn main() {
    let cli = Cli::parse();

    let cfg = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&cfg, cli.verbose);

    let result = run(cli.command, &cfg, &mut std::io::stdout().lock());
    let code = exit_code(result, &mut std::io::stderr());
    if code != 0 {
        std::process::exit(code);
    }
}

/// Report a command failure on `err` and map it to the process exit code.
fn exit_code(result: anyhow::Result<()>, err: &mut impl Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            // Nothing sensible left to do if stderr itself is gone.
            let _ = writeln!(err, "error: {:#}", e);
            1
        }
    }
}

fn run(command: Command, cfg: &config::Config, out: &mut impl Write) -> anyhow::Result<()> {
    info!("{}", customer_domain::about());
    let registry = build_registry(cfg)?;

    match command {
        Command::Demo => {
            let lookups = [
                CustomerFilter::new().account_number("12345678"),
                CustomerFilter::new().sort_code("65-43-21"),
                CustomerFilter::new().customer_type("business"),
            ];
            for filter in &lookups {
                for customer in registry.find_customer(filter) {
                    writeln!(out, "Found customer: {}", customer)?;
                }
            }
        }
        Command::Find(args) => {
            let filter = CustomerFilter {
                account_number: args.account_number,
                sort_code: args.sort_code,
                customer_type: args.customer_type,
            };
            let matches = registry.find_customer(&filter);
            match args.output {
                OutputFormat::Text => {
                    if matches.is_empty() {
                        writeln!(out, "No customers found")?;
                    }
                    for customer in matches {
                        writeln!(out, "Found customer: {}", customer)?;
                    }
                }
                OutputFormat::Json => {
                    let rendered = FindOutput {
                        filter: &filter,
                        matches,
                    };
                    writeln!(out, "{}", serde_json::to_string_pretty(&rendered)?)?;
                }
            }
        }
    }
    Ok(())
}

fn build_registry(cfg: &config::Config) -> anyhow::Result<Registry> {
    let ids = match cfg.id_seed {
        Some(seed) => {
            debug!(seed, "using seeded customer ids");
            IdSource::Seeded(SeededIdGenerator::new(seed))
        }
        None => IdSource::Random(RandomIdGenerator::new()),
    };

    let mut registry = CustomerService::with_policy(InMemoryRepo::new(), ids, cfg.validation_policy);
    for input in reference_customers() {
        let stored = registry.register(input)?;
        debug!(customer_id = %stored.customer_id(), name = stored.name(), "seeded customer");
    }
    Ok(registry)
}

fn reference_customers() -> [NewCustomer; 2] {
    [
        NewCustomer::new("John Doe", "12345678", "12-34-56", "personal"),
        NewCustomer::new("Jane Smith", "87654321", "65-43-21", "business"),
    ]
}

fn init_tracing(cfg: &config::Config, verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so command output on stdout stays machine-readable.
    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
