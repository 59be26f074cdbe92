use crate::clockify::ClockifyClient;
use crate::config::{Config, check};
use crate::errors::AppResult;
use crate::ui::messages::{field, header, warning};

pub async fn handle(cfg: &Config) -> AppResult<()> {
    check::require_clockify(cfg, false, false)?;
    let client = ClockifyClient::new(&cfg.clockify)?;

    let workspaces = client.workspaces().await?;
    if workspaces.is_empty() {
        warning("No workspaces visible to this API key.");
        return Ok(());
    }

    header("Workspaces");
    for ws in &workspaces {
        field(&ws.name, &ws.id);
    }
    Ok(())
}
