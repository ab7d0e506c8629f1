//! Convert every IET script in a directory to XML and back.
//!
//! Exits non-zero only when a file could not be converted; encoder
//! diagnostics are logged as warnings and do not affect the exit status.

use clap::Parser;
use iet_xml::batch::{run, BatchSettings};
use iet_xml::converters::iet::QuoteStyle;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "iet-batch")]
#[command(version)]
#[command(about = "Encode *.iet scripts to XML, then decode *.xml back to *.iet.restored")]
struct Cli {
    /// Directory holding the scripts (default: current directory)
    #[arg(value_name = "DIR", default_value = ".")]
    directory: PathBuf,

    /// Write <q> spans as “ ” instead of 「 」 when decoding
    #[arg(long)]
    western_quotes: bool,
}

impl Cli {
    fn settings(self) -> BatchSettings {
        BatchSettings {
            directory: self.directory,
            quote_style: if self.western_quotes {
                QuoteStyle::Western
            } else {
                QuoteStyle::Corner
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("failed to initialize logger");
    }

    match run(&cli.settings()) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
