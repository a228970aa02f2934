mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use snapshot_audit::AuditError;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "snapshot-audit")]
#[command(about = "Group tabular exports into record timelines and show field-level changes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Audit loan snapshots across one or more exports")]
    Audit {
        #[arg(required = true, help = "CSV export files, in snapshot order")]
        files: Vec<String>,
        #[arg(long, default_value = "", help = "Identifier query (comma-separated accepted values)")]
        query: String,
        #[arg(long, short, value_name = "COL=VALUES", help = "Secondary filter, repeatable (values comma-separated)")]
        filter: Vec<String>,
        #[arg(long, value_enum, default_value = "summary", help = "Column projection mode")]
        columns: ColumnsArg,
        #[arg(long, short = 'F', value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, value_enum, help = "Grouping key equality (default: normalized)")]
        key_match: Option<KeyMatchArg>,
        #[arg(long, short, help = "Quiet mode: only show the summary line")]
        quiet: bool,
    },
    #[command(about = "Show information about one or more exports")]
    Info {
        #[arg(required = true, help = "CSV export files")]
        files: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColumnsArg {
    Full,
    Summary,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum KeyMatchArg {
    Exact,
    Normalized,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Audit {
            files,
            query,
            filter,
            columns,
            format,
            key_match,
            quiet,
        } => commands::audit::run(&files, &query, &filter, columns, format, key_match, quiet),
        Commands::Info { files } => commands::info::run(&files),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if is_internal_error(err) {
        ExitCode::from(3)
    } else {
        ExitCode::from(2)
    }
}

fn is_internal_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<AuditError>(),
            Some(AuditError::SinkError { .. })
        )
    })
}
