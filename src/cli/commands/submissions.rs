use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_success};
use crate::cli::Context;
use crate::models::SubmissionStatus;
use crate::types::RowId;

#[derive(Subcommand)]
pub enum SubmissionCommands {
    #[command(about = "List submissions of one status, newest first")]
    List {
        #[arg(long, default_value = "new", help = "new or processed")]
        status: String,
    },

    #[command(about = "Flip a submission between new and processed")]
    Toggle {
        #[arg(help = "Submission id")]
        id: String,
    },
}

pub async fn handle(cmd: SubmissionCommands, ctx: &Context) -> anyhow::Result<()> {
    let mut workspace = ctx.admin_workspace().await?;
    match cmd {
        SubmissionCommands::List { status } => {
            let status: SubmissionStatus = status.parse()?;
            let tab = workspace.load_submissions(status).await?;
            output_collection(&ctx.output, "submissions", &tab.items, "No requests", |s| {
                let contact = if s.phone.is_empty() { &s.email } else { &s.phone };
                format!(
                    "{:<38} {:<26} {:<20} {}",
                    s.id,
                    s.created_at.as_deref().unwrap_or("-"),
                    s.name,
                    contact
                )
            })
        }
        SubmissionCommands::Toggle { id } => {
            let id = RowId::parse(&id);
            // Toggling works on the loaded tab, so find the row on either one.
            let mut found = false;
            for status in [SubmissionStatus::New, SubmissionStatus::Processed] {
                if workspace.load_submissions(status).await?.items.iter().any(|s| s.id == id) {
                    found = true;
                    break;
                }
            }
            if !found {
                anyhow::bail!("No submission with id {}", id);
            }
            let next = workspace.toggle_submission(&id).await?;
            output_success(
                &ctx.output,
                &format!("Submission {} is now {}", id, next),
                Some(json!({ "id": id, "status": next })),
            )
        }
    }
}
