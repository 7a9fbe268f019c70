use clap::Subcommand;
use serde_json::json;

use crate::cache::CacheKey;
use crate::cli::utils::{output_collection, output_success};
use crate::cli::Context;

#[derive(Subcommand)]
pub enum CacheCommands {
    #[command(about = "Show every cached list with its age")]
    Status,

    #[command(about = "Drop cached lists so the next page load refetches")]
    Clear {
        #[arg(help = "Only this key (contentBlocks, cases, services)")]
        key: Option<String>,
    },
}

pub async fn handle(cmd: CacheCommands, ctx: &Context) -> anyhow::Result<()> {
    let cache = ctx.cache()?;
    match cmd {
        CacheCommands::Status => {
            let entries = cache.status()?;
            output_collection(&ctx.output, "entries", &entries, "Cache is empty", |e| {
                match e.age_ms {
                    Some(age) => format!(
                        "{:<14} {:>8}s old  {}",
                        e.key,
                        age / 1000,
                        if e.stale { "stale" } else { "fresh" }
                    ),
                    None => format!("{:<14} {:>9}  missing", e.key, "-"),
                }
            })
        }
        CacheCommands::Clear { key: None } => {
            cache.clear()?;
            output_success(&ctx.output, "Cleared all cached content", None)
        }
        CacheCommands::Clear { key: Some(raw) } => {
            let key = CacheKey::parse(&raw).ok_or_else(|| anyhow::anyhow!("Unknown cache key '{}'", raw))?;
            cache.invalidate(key)?;
            output_success(
                &ctx.output,
                &format!("Cleared {}", key.as_str()),
                Some(json!({ "key": key.as_str() })),
            )
        }
    }
}
