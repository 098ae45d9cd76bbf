//! # CLI Argument Definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "demoji")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Strip emoji from documents, honouring your allow and block lists")]
pub struct Cli {
    /// Configuration file (TOML); `demoji.toml` in the working directory is used if present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Filter an HTML file with the stored settings and print the result
    Scrub {
        /// HTML file to filter
        file: PathBuf,
        /// Output representation
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
        /// Configuration-change notification (JSON) applied after the first pass;
        /// repeatable, applied in order
        #[arg(short, long = "notify", value_name = "JSON")]
        notify: Vec<String>,
    },
    /// Inspect or change the stored filter settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print the current settings as JSON
    Show {},
    /// Write first-run defaults for missing settings
    Init {},
    /// Change one or more settings
    Set {
        /// Master switch (`true` or `false`)
        #[arg(long)]
        enabled: Option<bool>,
        /// Characters that are never removed
        #[arg(long)]
        allow: Option<String>,
        /// Extra characters to remove
        #[arg(long)]
        block: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Serialized document
    Html,
    /// Text content of the document element
    Text,
}
