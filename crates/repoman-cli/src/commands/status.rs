//! `repoman status` - print git's status text unchanged.

use serde_json::json;

use crate::{
    cli::GlobalArgs, commands::open_repository, config::AppConfig, error::CliResult,
    output::OutputManager,
};

pub fn execute(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manager = open_repository(&global, &config)?;
    let status = manager.repository().status()?;

    if output.is_json() {
        output.json(&json!({ "status": status }))?;
    } else {
        output.print(status.trim_end())?;
    }
    Ok(())
}
