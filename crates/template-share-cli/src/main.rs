mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use template_share_store::{LiveTemplateDir, TemplateStore};

use crate::commands::parse_kind;
use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "template-share")]
#[command(about = "Manage editor templates and share them through a template server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List local file templates
    List,
    /// Add or replace a local file template from a source file
    Add {
        /// Template name; an existing template with this name is replaced
        name: String,
        /// File whose contents become the template body
        source: PathBuf,
        /// Extension of generated files (default: the source file's)
        #[arg(long)]
        extension: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        /// Base name for generated files (default: derived from the name)
        #[arg(long, default_value = "")]
        file_name: String,
        /// Skip reformatting after instantiation
        #[arg(long)]
        no_reformat: bool,
        /// Also register as a live template
        #[arg(long)]
        live_template: bool,
    },
    /// Show one local template in full
    Show { name: String },
    /// Remove a local template
    Remove { name: String },
    /// Export templates to a bundle on disk
    Export {
        output: PathBuf,
        /// Template names to include (default: all)
        #[arg(long = "template")]
        templates: Vec<String>,
        /// Template kind: file or live
        #[arg(long, default_value = "file")]
        kind: String,
        /// After exporting, share the bundle under this display name
        #[arg(long)]
        share: Option<String>,
    },
    /// Import a bundle from disk
    Import {
        archive: PathBuf,
        /// Template kind: file or live
        #[arg(long, default_value = "file")]
        kind: String,
    },
    /// Work with the template server
    Remote {
        #[command(subcommand)]
        command: RemoteCommand,
    },
    /// Show or change the server configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum RemoteCommand {
    /// List shared templates
    List {
        /// Filter by kind: file or live
        #[arg(long)]
        kind: Option<String>,
    },
    /// Download a shared template bundle, optionally applying it
    Fetch {
        /// Server file name, as shown by `remote list`
        file_name: String,
        #[arg(long, default_value = "file")]
        kind: String,
        /// Apply without asking
        #[arg(long)]
        apply: bool,
        /// Directory to download into (default: a fresh temp directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Upload a bundle under a display name
    Share {
        archive: PathBuf,
        display_name: String,
        #[arg(long, default_value = "file")]
        kind: String,
    },
    /// Delete a shared template from the server
    Delete {
        file_name: String,
        #[arg(long, default_value = "file")]
        kind: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the active server configuration
    Show,
    /// Point the client at a private template server
    Set {
        #[arg(long)]
        server_url: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        /// Return to the built-in public read-only server
        #[arg(long)]
        reset: bool,
    },
}

fn build_store(config: &CliConfig) -> Result<TemplateStore> {
    let path = config
        .store_path()
        .context("could not determine data directory")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    TemplateStore::open(&path).map_err(|e| anyhow::anyhow!("{e}"))
}

fn build_live_dir(config: &CliConfig) -> Result<LiveTemplateDir> {
    let dir = config
        .live_dir()
        .context("could not determine config directory")?;
    Ok(LiveTemplateDir::new(dir))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::load();

    match cli.command {
        Command::List => {
            let store = build_store(&config)?;
            commands::list::run(&store).await
        }
        Command::Add {
            name,
            source,
            extension,
            description,
            file_name,
            no_reformat,
            live_template,
        } => {
            let store = build_store(&config)?;
            commands::add::run(
                &store,
                &name,
                &source,
                extension,
                description,
                file_name,
                no_reformat,
                live_template,
            )
            .await
        }
        Command::Show { name } => {
            let store = build_store(&config)?;
            commands::show::run(&store, &name)
        }
        Command::Remove { name } => {
            let store = build_store(&config)?;
            commands::remove::run(&store, &name).await
        }
        Command::Export {
            output,
            templates,
            kind,
            share,
        } => {
            let store = build_store(&config)?;
            let live = build_live_dir(&config)?;
            let kind = parse_kind(&kind)?;
            commands::export::run(&store, &live, &mut config, kind, &output, &templates, share)
                .await
        }
        Command::Import { archive, kind } => {
            let store = build_store(&config)?;
            let live = build_live_dir(&config)?;
            let kind = parse_kind(&kind)?;
            commands::import::run(&store, &live, kind, &archive).await
        }
        Command::Remote { command } => match command {
            RemoteCommand::List { kind } => {
                let kind = kind.as_deref().map(parse_kind).transpose()?;
                commands::remote::list(&mut config, kind).await
            }
            RemoteCommand::Fetch {
                file_name,
                kind,
                apply,
                output,
            } => {
                let store = build_store(&config)?;
                let live = build_live_dir(&config)?;
                let kind = parse_kind(&kind)?;
                commands::remote::fetch(&mut config, &store, &live, kind, &file_name, apply, output)
                    .await
            }
            RemoteCommand::Share {
                archive,
                display_name,
                kind,
            } => {
                let kind = parse_kind(&kind)?;
                commands::remote::share(&mut config, kind, &archive, &display_name).await
            }
            RemoteCommand::Delete {
                file_name,
                kind,
                yes,
            } => {
                let kind = parse_kind(&kind)?;
                commands::remote::delete(&mut config, kind, &file_name, yes).await
            }
        },
        Command::Config { command } => match command {
            ConfigCommand::Show => commands::config::show(&config),
            ConfigCommand::Set {
                server_url,
                api_key,
                reset,
            } => commands::config::set(&mut config, server_url, api_key, reset),
        },
    }
}
