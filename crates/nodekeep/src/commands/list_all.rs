use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use nodekeep_backend::{NodeVersion, VersionManager};
use nodekeep_core::{LEDGER_FILE, capture_many, write_ledger};

use crate::args::VersionsFilter;
use crate::context::Tools;
use crate::ui;

#[derive(Debug, Serialize)]
struct VersionReport {
    version: String,
    active: bool,
    packages: Vec<String>,
}

/// Walk the requested versions, capture each one's global packages, print
/// the report, and rewrite the ledger from what was seen.
pub async fn list_all(tools: &Tools, json: bool, filter: &VersionsFilter) {
    let installed = match tools.manager.list_installed().await {
        Ok(installed) => installed,
        Err(error) => {
            ui::error(&format!("could not list installed versions: {error}"));
            return;
        }
    };
    if installed.is_empty() {
        ui::info("no Node.js versions are installed");
        return;
    }

    let (selection, missing) = select_versions(&installed, filter);
    for version in &missing {
        ui::warning(&format!("{version} is not installed, skipping it"));
    }
    if selection.is_empty() {
        ui::info("none of the requested versions are installed");
        return;
    }

    let current = tools.manager.current().await.ok().flatten();
    let captured = capture_many(&tools.manager, &tools.packages, &selection).await;

    if json {
        print_json(&captured, current.as_ref());
    } else {
        print_text(&captured, current.as_ref());
    }

    match write_ledger(Path::new(LEDGER_FILE), &captured) {
        Ok(()) => {
            if json {
                log::debug!("wrote {LEDGER_FILE}");
            } else {
                ui::success(&format!("wrote {LEDGER_FILE}"));
            }
        }
        Err(error) => ui::error(&format!("could not write {LEDGER_FILE}: {error}")),
    }
}

/// Resolve the filter against what is actually installed, splitting off the
/// requested-but-absent versions. `All` keeps the installed order (newest
/// first); an explicit list keeps its own order.
fn select_versions(
    installed: &[NodeVersion],
    filter: &VersionsFilter,
) -> (Vec<NodeVersion>, Vec<NodeVersion>) {
    match filter {
        VersionsFilter::All => (installed.to_vec(), Vec::new()),
        VersionsFilter::Selected(requested) => requested
            .iter()
            .cloned()
            .partition(|version| installed.contains(version)),
    }
}

fn print_text(captured: &[(NodeVersion, Vec<String>)], current: Option<&NodeVersion>) {
    for (version, packages) in captured {
        let label = if current == Some(version) {
            format!("{version} (active)")
        } else {
            version.to_string()
        };
        println!("\n{}", label.bold());
        if packages.is_empty() {
            println!("  {}", "no global packages".dimmed());
        } else {
            println!("  {}", packages.join(", "));
        }
    }
    println!();
}

fn print_json(captured: &[(NodeVersion, Vec<String>)], current: Option<&NodeVersion>) {
    let reports: Vec<VersionReport> = captured
        .iter()
        .map(|(version, packages)| VersionReport {
            version: version.to_string(),
            active: current == Some(version),
            packages: packages.clone(),
        })
        .collect();

    match serde_json::to_string_pretty(&reports) {
        Ok(text) => println!("{text}"),
        Err(error) => ui::error(&format!("could not serialize the report: {error}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> NodeVersion {
        text.parse().unwrap()
    }

    #[test]
    fn all_filter_keeps_the_installed_order() {
        let installed = vec![v("22.11.0"), v("20.11.0"), v("18.20.0")];

        let (selection, missing) = select_versions(&installed, &VersionsFilter::All);

        assert_eq!(selection, installed);
        assert!(missing.is_empty());
    }

    #[test]
    fn explicit_filter_splits_off_absent_versions() {
        let installed = vec![v("22.11.0"), v("18.20.0")];
        let filter = VersionsFilter::Selected(vec![v("18.20.0"), v("19.0.0"), v("22.11.0")]);

        let (selection, missing) = select_versions(&installed, &filter);

        assert_eq!(selection, vec![v("18.20.0"), v("22.11.0")]);
        assert_eq!(missing, vec![v("19.0.0")]);
    }

    #[test]
    fn json_report_has_stable_field_names() {
        let report = VersionReport {
            version: "v20.11.0".to_string(),
            active: true,
            packages: vec!["eslint".to_string()],
        };

        let value = serde_json::to_value(report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "version": "v20.11.0",
                "active": true,
                "packages": ["eslint"],
            })
        );
    }
}
