//! Command-line interface definitions.

use crate::sandbox::Viewport;
use crate::store::FileKind;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Playpen: a local HTML/CSS/JS playground with a sandboxed live preview
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: playpen.toml)
    #[arg(short = 'C', long, global = true, default_value = "playpen.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Project storage file (overrides `[storage] path`; `:memory:` keeps nothing)
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub storage: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the playground server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Debounce delay for edits, in milliseconds
        #[arg(short, long)]
        debounce: Option<u64>,

        /// Initial preview width (mobile, tablet, desktop)
        #[arg(short = 'w', long)]
        viewport: Option<Viewport>,

        /// Open the playground in a browser
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        open: Option<bool>,
    },

    /// Compose the preview document and print or write it
    #[command(visible_alias = "c")]
    Compose {
        /// File to preview (default: the selected file)
        file: Option<String>,

        /// Write the document to this path instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Write every project file to a directory
    #[command(visible_alias = "e")]
    Export {
        /// Target directory
        #[arg(short, long, default_value = "playpen-export", value_hint = clap::ValueHint::DirPath)]
        out: PathBuf,
    },

    /// Manage project files
    #[command(visible_alias = "f")]
    File {
        #[command(subcommand)]
        action: FileAction,
    },

    /// Manage the mock backend
    #[command(visible_alias = "m")]
    Mock {
        #[command(subcommand)]
        action: MockAction,
    },
}

/// `playpen file` actions
#[derive(Subcommand, Debug, Clone)]
pub enum FileAction {
    /// List project files
    Ls,

    /// Print a file's content
    Show { name: String },

    /// Add a file (kind inferred from the extension unless given)
    Add {
        name: String,

        #[arg(short, long)]
        kind: Option<FileKind>,

        /// Initial content from a local file instead of the seed
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        from: Option<PathBuf>,
    },

    /// Delete a file
    Rm { name: String },

    /// Rename a file
    Mv { from: String, to: String },

    /// Replace a file's content from a local file or stdin
    Set {
        name: String,

        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        from: Option<PathBuf>,
    },

    /// Select the file shown in the editor and preview
    Select { name: String },
}

/// `playpen mock` actions
#[derive(Subcommand, Debug, Clone)]
pub enum MockAction {
    /// List endpoints and collections
    Ls,

    /// Register an endpoint (replaces one with the same path and method)
    Add {
        path: String,

        #[arg(short, long, default_value = "GET")]
        method: String,

        #[arg(short, long, default_value_t = 200)]
        status: u16,

        /// JSON response body
        #[arg(short, long, default_value = "{}")]
        body: String,

        /// Response delay in milliseconds
        #[arg(short, long, default_value_t = 0)]
        delay: u64,
    },

    /// Remove an endpoint
    Rm {
        path: String,

        #[arg(short, long, default_value = "GET")]
        method: String,
    },

    /// Set a collection served at `/api/<name>` from a JSON array
    Collection {
        name: String,

        /// JSON array of items; omit to remove the collection
        items: Option<String>,
    },

    /// Resolve a request against the mock backend
    Fetch {
        url: String,

        #[arg(short, long, default_value = "GET")]
        method: String,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,
    },
}
