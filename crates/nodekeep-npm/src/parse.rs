use serde::Deserialize;
use std::collections::HashMap;

/// Document shape of `npm ls -g --depth=0 --json`. npm omits the
/// `dependencies` key entirely when nothing is installed, and omits
/// `version` for linked packages.
#[derive(Debug, Deserialize)]
struct NpmListOutput {
    #[serde(default)]
    dependencies: HashMap<String, NpmListEntry>,
}

#[derive(Debug, Deserialize)]
struct NpmListEntry {
    version: Option<String>,
}

/// Sorted global package names from an `npm ls` JSON document, with the
/// `npm` bootstrap package dropped. `None` means the document was not valid.
pub(crate) fn parse_global_listing(json: &str) -> Option<Vec<String>> {
    let listing: NpmListOutput = serde_json::from_str(json).ok()?;
    let mut names: Vec<String> = listing
        .dependencies
        .into_keys()
        .filter(|name| name != "npm")
        .collect();
    names.sort();
    Some(names)
}

/// Installed version of `name` from an `npm ls` JSON document.
pub(crate) fn parse_installed_version(json: &str, name: &str) -> Option<String> {
    let mut listing: NpmListOutput = serde_json::from_str(json).ok()?;
    listing.dependencies.remove(name)?.version
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLOBAL_LISTING: &str = r#"{
  "name": "lib",
  "dependencies": {
    "npm": { "version": "10.8.2" },
    "prettier": { "version": "3.3.2" },
    "eslint": { "version": "9.5.0" }
  }
}"#;

    #[test]
    fn global_listing_is_sorted_and_excludes_npm() {
        let names = parse_global_listing(GLOBAL_LISTING).unwrap();
        assert_eq!(names, vec!["eslint", "prettier"]);
    }

    #[test]
    fn global_listing_without_dependencies_key_is_empty() {
        let names = parse_global_listing(r#"{ "name": "lib" }"#).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn global_listing_rejects_invalid_json() {
        assert!(parse_global_listing("npm ERR! something broke").is_none());
    }

    #[test]
    fn installed_version_finds_the_named_package() {
        let version = parse_installed_version(GLOBAL_LISTING, "eslint");
        assert_eq!(version.as_deref(), Some("9.5.0"));
    }

    #[test]
    fn installed_version_of_absent_package_is_none() {
        assert!(parse_installed_version(GLOBAL_LISTING, "typescript").is_none());
    }

    #[test]
    fn installed_version_of_versionless_entry_is_none() {
        let json = r#"{ "dependencies": { "my-tool": {} } }"#;
        assert!(parse_installed_version(json, "my-tool").is_none());
    }
}
