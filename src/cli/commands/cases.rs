use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{confirm, output_collection, output_success};
use crate::cli::Context;
use crate::types::RowId;

#[derive(Subcommand)]
pub enum CaseCommands {
    #[command(about = "List cases, newest first")]
    List,

    #[command(about = "Delete a case")]
    Delete {
        #[arg(help = "Case id")]
        id: String,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn handle(cmd: CaseCommands, ctx: &Context) -> anyhow::Result<()> {
    let mut workspace = ctx.admin_workspace().await?;
    match cmd {
        CaseCommands::List => {
            let cases = workspace.load_cases().await?;
            output_collection(&ctx.output, "cases", cases, "No cases yet", |c| {
                format!("{:<38} {:<12} {}", c.id, c.category, c.title)
            })
        }
        CaseCommands::Delete { id, yes } => {
            let id = RowId::parse(&id);
            let confirmed = yes || confirm(&format!("Delete case {}?", id))?;
            if !confirmed {
                return output_success(&ctx.output, "Nothing deleted", None);
            }
            workspace.delete_case(&id, true).await?;
            output_success(&ctx.output, &format!("Deleted case {}", id), Some(json!({ "deleted": id })))
        }
    }
}
