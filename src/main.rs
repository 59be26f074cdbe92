//! clockify-timesheet main entrypoint.

use clockify_timesheet::run;
use clockify_timesheet::ui::messages::error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
