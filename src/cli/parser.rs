use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for poselog
/// CLI application to record the pose of a tracked object to a spreadsheet
#[derive(Parser)]
#[command(
    name = "poselog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record the pose of a tracked rigid body from a motion-capture stream to XLSX, CSV or JSON",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose diagnostics on stderr (one line per recorded frame)
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Record one session until ENTER, Ctrl+C, or the end of a replay
    Record {
        /// Capture source: host:port, tcp://host:port, or replay:<file>
        #[arg(long, value_name = "ADDRESS")]
        address: Option<String>,

        /// Request reduced-precision (lightweight) segment data
        #[arg(long)]
        lightweight: bool,

        /// Name of the tracked object
        #[arg(long, value_name = "NAME")]
        object: Option<String>,

        /// Output file template (.xlsx, .csv or .json); {timestamp} is replaced
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<String>,

        /// Delay before the first frame is read, in milliseconds
        #[arg(long = "grace-ms", value_name = "MS")]
        grace_ms: Option<u64>,

        /// Delay before disconnecting, in milliseconds
        #[arg(long = "teardown-ms", value_name = "MS")]
        teardown_ms: Option<u64>,

        /// Text written for occluded components
        #[arg(long, value_name = "TEXT")]
        marker: Option<String>,
    },
}
