//! Command-line interface for the calculator.
//!
//! Reads statements from a file (or stdin when no file is given), runs one
//! parsing session over the whole input, prints statement values to stdout
//! and diagnostics to stderr.

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use shiftred_calc::CalcParser;
use std::io::Read;
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(version, about = "line-oriented register calculator", long_about = None)]
struct Args {
    /// Input file with calculator statements; reads stdin when omitted
    input: Option<PathBuf>,

    /// Print bare `syntax error` diagnostics without token suggestions
    #[arg(long)]
    terse: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let bytes = match &args.input {
        Some(path) => std::fs::read(path).with_context(|| format!("can't read {}", path.display()))?,
        None => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("can't read stdin")?;
            buffer
        }
    };

    let stdout = std::io::stdout();
    let mut parser = CalcParser::new(bytes.into_iter(), stdout.lock()).verbose_diagnostics(!args.terse);
    let outcome = parser.run();

    for diagnostic in parser.diagnostics() {
        eprintln!("{diagnostic}");
    }

    match outcome {
        Ok(stats) => {
            log::debug!(
                "session done: {} tokens, {} shifts, {} reductions, {} syntax errors",
                stats.tokens,
                stats.shifts,
                stats.reductions,
                stats.syntax_errors
            );
            Ok(())
        }
        Err(err) => Err(anyhow::Error::new(err).context("parsing aborted")),
    }
}
