use crate::cli::utils::output_collection;
use crate::cli::Context;
use crate::icons::Icon;

pub async fn handle(filter: Option<String>, ctx: &Context) -> anyhow::Result<()> {
    let icons = Icon::search(filter.as_deref().unwrap_or(""));
    output_collection(&ctx.output, "icons", &icons, "No icons match", |icon| {
        format!("{:<16} {}", icon.name(), icon.component())
    })
}
