use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rattendance
/// Attendance backend for factory production lines
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance tracking for factory lines: kiosk check-ins, exports and digest emails",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL)
        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Print or manage the internal log table
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Database maintenance
    Db {
        #[arg(long = "migrate", help = "Apply pending schema migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Run SQLite integrity check")]
        check: bool,

        #[arg(long = "vacuum", help = "Compact the database file")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database statistics")]
        info: bool,
    },

    /// Manage the roster of a line
    Operator {
        #[command(subcommand)]
        action: OperatorAction,
    },

    /// Record a check-in from the command line
    Checkin {
        /// Line id (e.g. line1)
        line: String,

        /// Operator id as read by the kiosk
        operator_id: String,

        /// Check-in time: RFC3339, "YYYY-MM-DD HH:MM[:SS]" (UTC) or epoch millis.
        /// Defaults to now.
        #[arg(long = "at", value_name = "TIMESTAMP")]
        at: Option<String>,
    },

    /// List check-ins whose date starts with a prefix
    List {
        /// Line id
        line: String,

        /// Date prefix: YYYY, YYYY-MM or YYYY-MM-DD
        date: String,
    },

    /// Export check-ins of a line to a file
    Export {
        /// Line id
        #[arg(long)]
        line: String,

        /// Export format
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Period: all, YYYY, YYYY-MM, YYYY-MM-DD, or ranges like YYYY-MM-DD:YYYY-MM-DD
        #[arg(long)]
        range: Option<String>,

        /// Overwrite the output file without asking
        #[arg(long)]
        force: bool,
    },

    /// Send the attendance digest of a line now
    Digest {
        /// Line id
        line: String,

        /// Day to send (YYYY-MM-DD, UTC). Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// Run the HTTP API and the digest scheduler
    Serve {
        /// Listen address (overrides server.listen_addr)
        #[arg(long)]
        listen: Option<String>,

        /// Log level (overrides log_level; RUST_LOG wins over both)
        #[arg(long = "log-level")]
        log_level: Option<String>,

        /// Emit logs as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum OperatorAction {
    /// Add an operator to a line's roster
    Add {
        line: String,
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long = "employee-id")]
        employee_id: String,
        #[arg(long)]
        station: String,
    },

    /// Show a line's roster
    List { line: String },

    /// Remove an operator from a line's roster
    Del { line: String, id: String },
}
