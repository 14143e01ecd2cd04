use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use filekind::commands::{
    category_command, classify_command, json_shape_command, labels_command, scan_command,
};
use filekind::load_config;

/// File-kind and JSON-shape classifier for uploaded files.
///
/// This CLI is a thin wrapper around `filekind-core` (exposed in code as
/// `filekind_core`). All classification logic lives in the library.
#[derive(Parser, Debug)]
#[command(name = "filekind", version, about = "Classify uploaded files by kind and JSON shape")]
struct Cli {
    /// Classifier config file (.json, .yaml or .yml). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log classification decisions to stderr (overrides the default `warn` level).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every category and JSON-shape label.
    Labels {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Classify a file name and optional media type without touching disk.
    Category {
        /// File name, e.g. `report.pdf`.
        #[arg(long)]
        name: String,

        /// Declared media type, e.g. `image/png`.
        #[arg(long)]
        media_type: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Infer whether JSON content is tabular (SQL), document (NoSQL) or corrupted.
    #[command(group(ArgGroup::new("source").required(true).args(["path", "text"])))]
    JsonShape {
        /// Read JSON content from this file.
        #[arg(long)]
        path: Option<String>,

        /// Use this inline JSON text.
        #[arg(long)]
        text: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Classify a file on disk, reading its content when it is JSON.
    Classify {
        /// Path to the file.
        #[arg(long)]
        path: String,

        /// Declared media type. If omitted, one may be guessed per config.
        #[arg(long)]
        media_type: Option<String>,

        /// Skip SHA-256 computation.
        #[arg(long, default_value_t = false)]
        skip_hash: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Classify every file under a directory and report totals per label.
    Scan {
        /// Directory to scan. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    // Default to listing labels if no command is provided.
    match cli.command.unwrap_or(Command::Labels { json: false }) {
        Command::Labels { json } => labels_command(json)?,
        Command::Category { name, media_type, json } => {
            category_command(&name, media_type.as_deref(), json)?
        }
        Command::JsonShape { path, text, json } => {
            json_shape_command(path.as_deref(), text.as_deref(), &config, json)?
        }
        Command::Classify { path, media_type, skip_hash, json } => {
            classify_command(&path, media_type.as_deref(), &config, skip_hash, json)?
        }
        Command::Scan { root, json } => scan_command(&root, &config, json)?,
    }

    Ok(())
}

/// Install a stderr subscriber; `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
