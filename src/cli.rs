use bfp_admin_common::RecordKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bfp-admin")]
#[command(about = "BFP Villanueva personnel administration", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of a list screen
    List {
        /// personnel, leave, clearance, award, inspection, equipment, recruitment, training, leave-balance
        kind: RecordKind,

        /// Free-text search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Summary card quick filter (e.g. pending, active)
        #[arg(short, long, default_value = "total")]
        card: String,

        /// Dropdown filter as field=value (repeatable)
        #[arg(short, long, value_parser = parse_key_val)]
        filter: Vec<(String, String)>,

        /// Page number (clamped)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Write the whole filtered set to an xlsx file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Create a record from a JSON file
    Create {
        kind: RecordKind,

        #[arg(long)]
        json: PathBuf,
    },

    /// Replace a record's fields from a JSON file
    Update {
        kind: RecordKind,
        id: String,

        #[arg(long)]
        json: PathBuf,
    },

    /// Delete a record
    Delete {
        kind: RecordKind,
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Set a record's status
    SetStatus {
        kind: RecordKind,
        id: String,
        status: String,
    },

    /// Approve a pending leave request and charge the leave balance
    ApproveLeave { id: String },

    /// Reject a leave request
    RejectLeave { id: String },

    /// Import records from an xlsx file (header row = field names)
    Import {
        kind: RecordKind,
        file: PathBuf,

        /// Validate only
        #[arg(long)]
        dry_run: bool,
    },

    /// Local embedded store
    Local {
        #[command(subcommand)]
        action: LocalAction,
    },

    /// Show / edit configuration
    Config {
        /// Backend Service URL
        #[arg(long)]
        set_url: Option<String>,

        /// Backend Service API key
        #[arg(long)]
        set_key: Option<String>,

        /// Folder for the local store file
        #[arg(long)]
        set_local_dir: Option<PathBuf>,

        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum LocalAction {
    /// List all objects in a store
    List { store: String },

    /// Show one object
    Get { store: String, id: String },

    /// Insert (no id) or replace (with id) an object from a JSON file
    Put {
        store: String,
        #[arg(long)]
        json: PathBuf,
        #[arg(long)]
        id: Option<String>,
    },

    Delete { store: String, id: String },

    /// Remove the store file
    Clear,
}

/// `field=value`
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got: {}", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in: {}", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
