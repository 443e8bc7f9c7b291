use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use leadboard::config::{BoardConfig, LogFormat};

mod cmd;

#[derive(Parser)]
#[command(name = "leadboard")]
#[command(version, about = "Kanban lead board with pipelines, columns and bulk moves")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Pipeline to operate on. Overrides board.toml's default_pipeline.
    #[arg(short, long, global = true)]
    pub pipeline: Option<String>,

    /// Log output format: pretty or json
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create .leadboard/ with a default board.toml and seed demo data
    Init,
    /// Replace all boards with the demo data
    Reset {
        #[arg(long)]
        force: bool,
    },
    /// List pipelines
    Pipelines,
    /// Show the columns and leads of a pipeline
    Show {
        /// Case-insensitive match on name, company or job title
        #[arg(short, long)]
        search: Option<String>,
        /// Only leads carrying this tag id
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Rename the selected pipeline
    RenamePipeline { name: String },
    /// Add, rename, reorder, label or delete columns
    Column {
        #[command(subcommand)]
        command: ColumnCommands,
    },
    /// Add, move or label leads
    Lead {
        #[command(subcommand)]
        command: LeadCommands,
    },
    /// Drop an encoded drag payload on a column
    Drop {
        column_id: String,
        /// Transfer payload, e.g. {"kind":"single","leadId":"lead3"}
        payload: String,
    },
    /// List every tag in use
    Tags,
    /// Choose which fields lead cards show
    Cards {
        #[arg(long, value_delimiter = ',')]
        show: Vec<CardField>,
        #[arg(long, value_delimiter = ',')]
        hide: Vec<CardField>,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ColumnCommands {
    Add {
        name: String,
    },
    Rename {
        column_id: String,
        name: String,
    },
    /// Move a column to a zero-based position
    Move {
        column_id: String,
        order: u32,
    },
    /// Add tags to every lead in a column
    Label {
        column_id: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    Delete {
        column_id: String,
        /// What happens to the column's leads
        #[arg(long, value_enum, default_value = "previous")]
        policy: DeleteArg,
        /// Destination column for --policy move or add
        #[arg(long)]
        target_column: Option<String>,
        /// Destination pipeline for --policy add
        #[arg(long)]
        target_pipeline: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteArg {
    /// Move leads to the preceding column
    Previous,
    /// Take leads off the pipeline
    Delete,
    /// Move leads to --target-column
    Move,
    /// Move leads to --target-column of --target-pipeline
    Add,
}

#[derive(Subcommand, Clone)]
pub enum LeadCommands {
    /// Create a lead in the first column
    Add {
        name: Option<String>,
        #[arg(long)]
        job_title: Option<String>,
        #[arg(long)]
        company: Option<String>,
    },
    /// Move leads to a column
    Move {
        #[arg(long)]
        to: String,
        #[arg(required = true)]
        lead_ids: Vec<String>,
    },
    /// Replace a lead's tags
    Labels { lead_id: String, tags: Vec<String> },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardField {
    JobTitle,
    Company,
    ConnectionStatus,
    Tags,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    Show,
    Validate,
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = BoardConfig::with_cli_args(
        project_dir,
        cli.verbose,
        cli.pipeline.clone(),
        cli.log_format,
    )?;
    leadboard::logging::init(&config.log_level(), config.log_format())?;

    match &cli.command {
        Commands::Init => cmd::cmd_init(&config)?,
        Commands::Reset { force } => cmd::cmd_reset(&config, *force)?,
        Commands::Pipelines => cmd::cmd_pipelines(&config)?,
        Commands::Show { search, tag } => {
            cmd::cmd_show(&config, search.as_deref(), tag.as_deref())?
        }
        Commands::RenamePipeline { name } => cmd::cmd_rename_pipeline(&config, name)?,
        Commands::Column { command } => cmd::cmd_column(&config, command)?,
        Commands::Lead { command } => cmd::cmd_lead(&config, command)?,
        Commands::Drop { column_id, payload } => cmd::cmd_drop(&config, column_id, payload)?,
        Commands::Tags => cmd::cmd_tags(&config)?,
        Commands::Cards { show, hide } => cmd::cmd_cards(&config, show, hide)?,
        Commands::Config { command } => cmd::cmd_config(&config, command.clone())?,
    }

    Ok(())
}
