use crate::cli::parser::Commands;
use crate::clockify::{ClockifyClient, UserDto};
use crate::config::{Config, check};
use crate::errors::AppResult;
use crate::ui::messages::{field, header, info, warning};

/// `user` prints the ids to paste into the config file.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { email } = cmd else {
        return Ok(());
    };

    let user = match email {
        Some(email) => {
            check::require_clockify(cfg, true, false)?;
            let client = ClockifyClient::new(&cfg.clockify)?;
            match client.find_user_by_email(email).await? {
                Some(u) => u,
                None => {
                    warning(format!("No member with email '{email}' in this workspace."));
                    return Ok(());
                }
            }
        }
        None => {
            check::require_clockify(cfg, false, false)?;
            ClockifyClient::new(&cfg.clockify)?.current_user().await?
        }
    };

    print_user(&user);
    Ok(())
}

fn print_user(user: &UserDto) {
    header("Clockify user");
    field("Name", &user.name);
    field("Email", &user.email);
    field("User id", &user.id);

    let ws = user
        .active_workspace
        .as_deref()
        .or(user.default_workspace.as_deref());
    if let Some(ws) = ws {
        field("Active workspace", ws);
    }

    info("Put these into clockify.user_id / clockify.workspace_id.");
}
