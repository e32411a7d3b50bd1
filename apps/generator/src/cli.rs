//! # CLI Argument Definitions
//!
//! Every flag is optional; without arguments the generator reads `./pci.ids`
//! and writes the five built-in tables into the working directory.

use clap::Parser;
use std::path::PathBuf;

/// Generates GPU name tables from the `pci.ids` database.
#[derive(Debug, Parser)]
#[command(name = "pcitab")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generates GPU name lookup tables from the pci.ids database")]
pub(crate) struct Cli {
    /// Configuration file (defaults to an optional `pcitab.toml` in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to `pci.ids`, overriding the configuration
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for the generated tables, overriding the configuration
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Emit plain string literals without the `u8` prefix
    #[arg(long)]
    pub ascii_literals: bool,

    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also append diagnostics to `<DIR>/pcitab.log`
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Tracing filter directives (e.g. `pcitab_ids=debug`), replacing `RUST_LOG` and `-v`
    #[arg(long, value_name = "DIRECTIVES")]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub(crate) fn apply(self, config: &mut pcitab::GeneratorConfig) {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(out_dir) = self.out_dir {
            config.out_dir = out_dir;
        }
        if self.ascii_literals {
            config.utf8_literals = false;
        }
    }
}
