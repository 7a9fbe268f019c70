use clap::Subcommand;
use std::sync::Arc;

use crate::cli::utils::output_document;
use crate::cli::Context;
use crate::site::SiteService;

#[derive(Subcommand)]
pub enum PageCommands {
    #[command(about = "Home page view")]
    Home,

    #[command(about = "Portfolio page view")]
    Portfolio,
}

pub async fn handle(cmd: PageCommands, ctx: &Context) -> anyhow::Result<()> {
    let site = SiteService::new(ctx.gateway()?, Arc::new(ctx.cache()?));
    match cmd {
        PageCommands::Home => {
            let rendered = site.home().await;
            tracing::info!("Home page served from {:?}", rendered.source);
            output_document(&rendered)
        }
        PageCommands::Portfolio => {
            let rendered = site.portfolio().await;
            tracing::info!("Portfolio page served from {:?}", rendered.source);
            output_document(&rendered)
        }
    }
}
