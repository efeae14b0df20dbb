//! ledger-inspect: decode operation records and print account locators.
//!
//! # Usage
//!
//! ```bash
//! # Decode one or more base64 XDR operation records
//! ledger-inspect decode AAAAAAAAAAEA...
//!
//! # Decode records from stdin, one per line
//! cat records.txt | ledger-inspect decode
//!
//! # Print the locator of an account's limits
//! ledger-inspect account https://horizon.example.org gAccount --resource limits
//! ```

use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use ledger_sdk::query::Server;
use ledger_sdk::{Operation, OperationError, operation_to_object};
use serde_json::json;

/// Inspect ledger operation records and account locators
#[derive(Parser, Debug)]
#[command(name = "ledger-inspect")]
#[command(about = "Inspect ledger operation records and account locators", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode base64 XDR operation records to JSON
    Decode {
        /// Records to decode. Read from stdin, one per line, when omitted.
        records: Vec<String>,
    },
    /// Print the locator of an account resource
    Account {
        /// Base locator of the indexing service
        server: String,
        /// Account id
        id: String,
        /// Sub-resource of the account
        #[arg(long, value_enum)]
        resource: Option<Resource>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Resource {
    Statistics,
    Limits,
    Traits,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let ok = match args.command {
        Command::Decode { records } => decode(records),
        Command::Account {
            server,
            id,
            resource,
        } => account(&server, id, resource),
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Decodes every record, reporting failures without stopping.
fn decode(records: Vec<String>) -> bool {
    let records = if records.is_empty() {
        match io::stdin().lock().lines().collect::<Result<Vec<_>, _>>() {
            Ok(lines) => lines,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                return false;
            }
        }
    } else {
        records
    };

    let mut ok = true;
    for (index, record) in records.iter().enumerate() {
        let record = record.trim();
        if record.is_empty() {
            continue;
        }
        match Operation::from_xdr_base64(record) {
            Ok(op) => {
                tracing::debug!(index, op_type = ?op.op_type(), "decoded record");
                println!("{}", describe(&op));
            }
            Err(e) => {
                tracing::error!(index, "Failed to decode record: {}", e);
                ok = false;
            }
        }
    }
    ok
}

fn describe(op: &Operation) -> serde_json::Value {
    let source = op.source_account.map(|id| id.address());
    match operation_to_object(op) {
        Ok(object) => json!({
            "sourceAccount": source,
            "operation": object,
        }),
        Err(OperationError::UnsupportedOperationKind { kind }) => json!({
            "sourceAccount": source,
            "operationType": kind as u32,
            "operationKind": format!("{:?}", kind),
        }),
        Err(e) => json!({
            "sourceAccount": source,
            "error": e.to_string(),
        }),
    }
}

fn account(server: &str, id: String, resource: Option<Resource>) -> bool {
    let server = match Server::new(server) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{}", e);
            return false;
        }
    };

    let builder = server.accounts();
    let builder = match resource {
        None => builder.account_id(id),
        Some(Resource::Statistics) => builder.statistics_for_account(id),
        Some(Resource::Limits) => builder.limits(id),
        Some(Resource::Traits) => builder.traits(id),
    };

    match builder.build() {
        Ok(locator) => {
            println!("{}", locator);
            true
        }
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}
