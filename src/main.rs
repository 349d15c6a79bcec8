use std::{fs, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nanoc::{
    compile_source, errors::diagnostics::Diagnostics, lexer::lexer::tokenize, render_diagnostic,
    type_checker::options::CheckOptions,
};

/// Checks a NanoScript program for syntax and type errors.
#[derive(Debug, Parser)]
#[command(name = "nanoc", version, about)]
struct Cli {
    /// Script to check.
    script: PathBuf,

    /// Increase logging verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only run the checks the classic analyzer performed.
    #[arg(long)]
    permissive: bool,

    /// Print the scanned tokens.
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parsed tree and inferred types.
    #[arg(long)]
    dump_ast: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = fs::read_to_string(&cli.script)
        .with_context(|| format!("failed to read `{}`", cli.script.display()))?;
    let file_name = cli.script.display().to_string();

    let options = if cli.permissive {
        CheckOptions::reference()
    } else {
        CheckOptions::default()
    };

    if cli.dump_tokens {
        // Scan errors are reported again by the full run below.
        let mut scratch = Diagnostics::new();
        for token in tokenize(&source, &mut scratch) {
            token.debug();
        }
    }

    let start = Instant::now();
    let compilation = compile_source(&source, options);
    info!("Checked in {:?}", start.elapsed());

    if cli.dump_ast {
        for stmt in &compilation.statements {
            println!("{}", stmt);
        }
        for annotation in &compilation.annotations {
            println!("{}", annotation);
        }
    }

    for error in &compilation.diagnostics {
        eprintln!("{}\n", render_diagnostic(error, &source, &file_name));
    }

    match compilation.failed_phase {
        None => {
            println!("Success! Valid NanoScript code.");
            Ok(ExitCode::SUCCESS)
        }
        Some(phase) => {
            info!(?phase, errors = compilation.diagnostics.len(), "check failed");
            Ok(ExitCode::from(phase.exit_code()))
        }
    }
}

fn directive_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "nanoc=warn",
        1 => "nanoc=debug",
        _ => "nanoc=trace",
    }
}
