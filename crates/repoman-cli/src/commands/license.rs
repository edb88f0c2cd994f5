//! `repoman license` - list templates and write LICENSE files.

use serde::Serialize;
use tracing::instrument;

use repoman_core::domain::{LicenseTemplate, RepositoryHandle};

use crate::{
    cli::{GlobalArgs, LicenseCommands},
    commands::{license_service, open_repository},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// JSON shape of one `license list` entry; the template body is omitted.
#[derive(Debug, Serialize)]
struct LicenseSummary<'a> {
    id: &'a str,
    name: &'a str,
    requires_name: bool,
}

impl<'a> From<&'a LicenseTemplate> for LicenseSummary<'a> {
    fn from(t: &'a LicenseTemplate) -> Self {
        Self {
            id: &t.id,
            name: &t.display_name,
            requires_name: t.requires_name,
        }
    }
}

pub fn execute(
    cmd: LicenseCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        LicenseCommands::List => list(&global, &config, &output),
        LicenseCommands::Add { id, author } => add(&id, author, &global, &config, &output),
    }
}

/// Listing needs no repository and never runs git.
fn list(global: &GlobalArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let templates = license_service(RepositoryHandle::new(&global.repo), config)?.templates();

    if output.is_json() {
        let summaries: Vec<LicenseSummary<'_>> = templates.iter().map(Into::into).collect();
        output.json(&summaries)?;
        return Ok(());
    }

    output.header("Available licenses:")?;
    for template in &templates {
        if template.display_name == template.id {
            output.item(&template.id, false)?;
        } else {
            output.item(&format!("{} ({})", template.id, template.display_name), false)?;
        }
    }
    Ok(())
}

#[instrument(skip_all, fields(license = %id))]
fn add(
    id: &str,
    author: Option<String>,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let manager = open_repository(global, config)?;
    let author = author.or_else(|| config.license.default_author.clone());
    let replacing = manager.licenses().license_path().exists();

    let license = manager.generate_and_add_license(id, author.as_deref())?;
    if replacing {
        output.warning("Replaced the existing LICENSE file")?;
    }

    let path = license
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "LICENSE".into());
    output.success(&format!(
        "Wrote {} license to {path} and staged it",
        license.license_id()
    ))?;
    Ok(())
}
