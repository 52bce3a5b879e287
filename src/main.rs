use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::error;

use scantrend::render::{self, OutputFormat};
use scantrend::utils::{setup_logging, validate_args};
use scantrend::{analyze_scan_file, Args, Command, Session, Settings};

fn run_session(settings: Settings, file: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let mut session = Session::new(settings);

    if let Some(file) = file {
        match session.select_file(file) {
            Ok(snapshot) => render::print_trend(&snapshot, format)?,
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    // stdout carries rendered output only
    let stdin = io::stdin();
    let mut stderr = io::stderr();
    eprint!("> ");
    stderr.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let (command, rest) = match line.trim().split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line.trim(), ""),
        };

        let outcome = match command {
            "" => Ok(()),
            "quit" | "exit" => break,
            "open" if rest.is_empty() => {
                eprintln!("Usage: open <path>");
                Ok(())
            }
            "open" => session
                .select_file(rest)
                .and_then(|snapshot| render::print_trend(&snapshot, format)),
            "refresh" => session
                .refresh()
                .and_then(|snapshot| render::print_trend(&snapshot, format)),
            "show" => match session.snapshot() {
                Some(snapshot) => render::print_trend(&snapshot, format),
                None => {
                    println!("{}", render::NO_TREND_DATA);
                    Ok(())
                }
            },
            "status" => match session.snapshot() {
                Some(snapshot) => render::print_status(&snapshot.status, format),
                None => render::print_status(&[], format),
            },
            other => {
                eprintln!("Unknown command '{}': expected open, refresh, show, status or quit", other);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            eprintln!("Error: {:#}", e);
        }

        eprint!("> ");
        stderr.flush()?;
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_args(args);

    match &args.command {
        Command::Trend { file } => {
            let snapshot = analyze_scan_file(file, &settings)?;
            render::print_trend(&snapshot, args.format)
        }
        Command::Status { file } => {
            let snapshot = analyze_scan_file(file, &settings)?;
            render::print_status(&snapshot.status, args.format)
        }
        Command::Session { file } => run_session(settings, file.clone(), args.format),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    validate_args(&args)?;

    match run(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
