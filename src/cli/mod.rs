pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::admin::AdminWorkspace;
use crate::app::{cache_from_config, gateway_from_config};
use crate::config::AppConfig;
use crate::gateway::Gateway;

#[derive(Parser)]
#[command(name = "restoro")]
#[command(about = "Restoro CLI - content cache, pages and admin lists from the command line")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, env = "RESTORO_ACCESS_TOKEN", help = "Admin access token")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Inspect or clear the persisted content cache")]
    Cache {
        #[command(subcommand)]
        cmd: commands::cache::CacheCommands,
    },

    #[command(about = "List supported service icons")]
    Icons {
        #[arg(help = "Substring filter")]
        filter: Option<String>,
    },

    #[command(about = "Render a public page through the content cache")]
    Page {
        #[command(subcommand)]
        cmd: commands::page::PageCommands,
    },

    #[command(about = "Portfolio case management")]
    Cases {
        #[command(subcommand)]
        cmd: commands::cases::CaseCommands,
    },

    #[command(about = "Contact form submissions")]
    Submissions {
        #[command(subcommand)]
        cmd: commands::submissions::SubmissionCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything a command may need, resolved from the environment once
pub struct Context {
    pub config: AppConfig,
    pub output: OutputFormat,
    pub token: Option<String>,
}

impl Context {
    pub fn gateway(&self) -> anyhow::Result<Arc<dyn Gateway>> {
        Ok(gateway_from_config(&self.config)?)
    }

    pub fn cache(&self) -> anyhow::Result<crate::cache::ContentCache> {
        Ok(cache_from_config(&self.config.cache)?)
    }

    /// Workspace for admin commands. The token must belong to a live session.
    pub async fn admin_workspace(&self) -> anyhow::Result<AdminWorkspace> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Admin commands need --token or RESTORO_ACCESS_TOKEN"))?;
        let gateway = self.gateway()?;
        if gateway.get_user(token).await?.is_none() {
            anyhow::bail!("Session expired or unknown, sign in again");
        }
        Ok(AdminWorkspace::new(
            gateway.with_access_token(token),
            self.config.gateway.bucket.clone(),
        ))
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context {
        config: crate::config::config().clone(),
        output: OutputFormat::from_cli(&cli),
        token: cli.token,
    };

    match cli.command {
        Commands::Cache { cmd } => commands::cache::handle(cmd, &ctx).await,
        Commands::Icons { filter } => commands::icons::handle(filter, &ctx).await,
        Commands::Page { cmd } => commands::page::handle(cmd, &ctx).await,
        Commands::Cases { cmd } => commands::cases::handle(cmd, &ctx).await,
        Commands::Submissions { cmd } => commands::submissions::handle(cmd, &ctx).await,
    }
}
