//! Taskscribe - Entry Point
//!
//! Interactive shell around the parsing pipeline: type a task sentence to
//! parse it, or load a transcript file to extract every action item. The
//! model-assisted path is used when a credential is configured and falls
//! back to rule-based parsing on any failure.

use clap::Parser;
use taskscribe::pipeline::{Orchestrator, ParseOutcome, ParsePath};
use taskscribe::Result;

use chrono::Local;
use std::io::{self, Write};
use tokio::runtime::Runtime;

#[derive(Parser)]
#[command(name = "taskscribe", about = "Natural language task extraction")]
struct Args {
    /// Parse this input once and exit instead of starting the shell
    input: Option<String>,

    /// Treat the input as a meeting transcript
    #[arg(long)]
    transcript: bool,

    /// Skip the model-assisted path even when a credential is configured
    #[arg(long)]
    local_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("taskscribe=info")
        .init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    let orchestrator = if args.local_only {
        Orchestrator::local_only()
    } else {
        Orchestrator::from_env()
    };
    if !orchestrator.has_remote() {
        tracing::info!("running in local-only mode");
    }

    if let Some(input) = args.input {
        let now = Local::now().naive_local();
        if args.transcript {
            let outcome = rt.block_on(orchestrator.parse_transcript(&input, now));
            print_outcome(&outcome)?;
            print_json(&outcome.value)?;
        } else {
            let outcome = rt.block_on(orchestrator.parse_single(&input, now));
            print_outcome(&outcome)?;
            print_json(&outcome.value)?;
        }
        return Ok(());
    }

    println!("=== TASKSCRIBE ===");
    println!("Type a task sentence to parse it.");
    println!();
    println!("Commands:");
    println!("  transcript <file>  - Extract tasks from a transcript file");
    println!("  quit / q           - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        let now = Local::now().naive_local();

        if let Some(path) = input.strip_prefix("transcript ") {
            let text = match std::fs::read_to_string(path.trim()) {
                Ok(text) => text,
                Err(e) => {
                    println!("could not read {}: {}", path.trim(), e);
                    continue;
                }
            };
            let outcome = rt.block_on(orchestrator.parse_transcript(&text, now));
            print_outcome(&outcome)?;
            if outcome.value.is_empty() {
                println!("no tasks found");
            } else {
                print_json(&outcome.value)?;
            }
            continue;
        }

        let outcome = rt.block_on(orchestrator.parse_single(input, now));
        print_outcome(&outcome)?;
        print_json(&outcome.value)?;
    }

    Ok(())
}

fn print_outcome<T>(outcome: &ParseOutcome<T>) -> Result<()> {
    if let Some(warning) = &outcome.warning {
        println!("(remote path failed, used local parser: {})", warning);
    } else if outcome.path == ParsePath::Remote {
        println!("(parsed by model)");
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
