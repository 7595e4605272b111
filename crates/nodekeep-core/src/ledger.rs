//! The consolidated package ledger: a flat text file mapping each runtime
//! version to its global package list. Written whole on every capture, read
//! back as one deduplicated union.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use nodekeep_backend::NodeVersion;

/// File name of the ledger, relative to the working directory.
pub const LEDGER_FILE: &str = "global-packages.txt";

const VERSION_HEADER: &str = "Node Version: ";
const NO_PACKAGES_MARKER: &str = "(No global packages installed)";

/// Overwrite the ledger with one block per version: a header line, then the
/// comma-joined package list (or a fixed marker for an empty set), then a
/// blank separator.
pub fn write_ledger(path: &Path, entries: &[(NodeVersion, Vec<String>)]) -> io::Result<()> {
    let mut contents = String::new();

    for (version, packages) in entries {
        contents.push_str(VERSION_HEADER);
        contents.push_str(&version.bare());
        contents.push('\n');
        if packages.is_empty() {
            contents.push_str(NO_PACKAGES_MARKER);
        } else {
            contents.push_str(&packages.join(", "));
        }
        contents.push_str("\n\n");
    }

    std::fs::write(path, contents)
}

/// The union of all package names recorded in the ledger, deduplicated and
/// sorted, with `npm` dropped. Headers, markers, and blank lines do not
/// contribute names.
///
/// A missing ledger is an error the caller turns into "run the capture step
/// first"; it is never created here.
pub fn read_ledger(path: &Path) -> io::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(consolidate(&contents))
}

fn consolidate(contents: &str) -> Vec<String> {
    let mut names = BTreeSet::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("Node Version:") || line == NO_PACKAGES_MARKER {
            continue;
        }
        for name in line.split(',') {
            let name = name.trim();
            if !name.is_empty() && name != "npm" {
                names.insert(name.to_string());
            }
        }
    }

    names.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> NodeVersion {
        s.parse().expect("test version should parse")
    }

    fn ledger_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
        dir.path().join(LEDGER_FILE)
    }

    #[test]
    fn round_trip_unions_and_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = ledger_path(&dir);

        write_ledger(
            &path,
            &[
                (
                    version("18.20.0"),
                    vec!["eslint".to_string(), "npm".to_string()],
                ),
                (
                    version("20.11.0"),
                    vec!["eslint".to_string(), "prettier".to_string()],
                ),
            ],
        )
        .unwrap();

        let names = read_ledger(&path).unwrap();

        assert_eq!(names, vec!["eslint", "prettier"]);
    }

    #[test]
    fn round_trip_is_order_independent() {
        let dir = tempfile::tempdir().unwrap();
        let forward = ledger_path(&dir);
        let reversed = dir.path().join("reversed.txt");

        let a = (
            version("18.20.0"),
            vec!["typescript".to_string(), "eslint".to_string()],
        );
        let b = (version("22.11.0"), vec!["eslint".to_string()]);

        write_ledger(&forward, &[a.clone(), b.clone()]).unwrap();
        write_ledger(&reversed, &[b, a]).unwrap();

        assert_eq!(
            read_ledger(&forward).unwrap(),
            read_ledger(&reversed).unwrap()
        );
    }

    #[test]
    fn written_format_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = ledger_path(&dir);

        write_ledger(
            &path,
            &[
                (
                    version("20.11.0"),
                    vec!["eslint".to_string(), "prettier".to_string()],
                ),
                (version("18.20.0"), vec![]),
            ],
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Node Version: 20.11.0\neslint, prettier\n\nNode Version: 18.20.0\n(No global packages installed)\n\n"
        );
    }

    #[test]
    fn empty_sets_read_back_as_no_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = ledger_path(&dir);

        write_ledger(&path, &[(version("18.20.0"), vec![])]).unwrap();

        assert!(read_ledger(&path).unwrap().is_empty());
    }

    #[test]
    fn reading_a_missing_ledger_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = ledger_path(&dir);

        let error = read_ledger(&path).unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn consolidate_tolerates_hand_edited_spacing() {
        let contents = "Node Version: 18.20.0\neslint,prettier,  typescript\n\n\nNode Version: 20.11.0\nprettier , npm\n";

        let names = consolidate(contents);

        assert_eq!(names, vec!["eslint", "prettier", "typescript"]);
    }

    #[test]
    fn consolidate_ignores_headers_and_markers() {
        let contents =
            "Node Version: 18.20.0\n(No global packages installed)\n\nNode Version: 20.11.0\nnpm\n";

        assert!(consolidate(contents).is_empty());
    }
}
