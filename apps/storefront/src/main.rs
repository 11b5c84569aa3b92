//! # ShopSmart CLI Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        shopsmart                                        │
//! │                                                                         │
//! │  argv ──► clap ──► lib::run ──► CartProvider ──► CartStore             │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                                              SQLite kv_store            │
//! │                                                                         │
//! │  stdout: CartResponse or ApiError as JSON                              │
//! │  stderr: tracing logs (notifications included)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use shopsmart_storefront::cli::Cli;
use shopsmart_storefront::{init_tracing, run};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(response) => print_json(&response),
        Err(err) => {
            print_json(&err);
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to encode output: {e}");
            ExitCode::FAILURE
        }
    }
}
