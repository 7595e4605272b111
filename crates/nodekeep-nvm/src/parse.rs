//! Pure parsers for nvm's text output. Each listing format gets its own
//! function; nothing here runs commands.

use nodekeep_backend::NodeVersion;

/// Strip ANSI escape sequences and carriage returns. nvm colors its output
/// even with `NO_COLOR` set on some versions, and nvm-windows emits CRLF.
pub(crate) fn clean_output(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // CSI sequences end at the first byte in @..=~
                for final_byte in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&final_byte) {
                        break;
                    }
                }
            }
            continue;
        }
        if c != '\r' {
            cleaned.push(c);
        }
    }

    cleaned
}

/// First whitespace token of a line after an optional `->` current-version
/// marker, parsed as a version. Alias lines (`default -> 18 (...)`) and the
/// `system` entry fail the parse and drop out.
fn leading_version(line: &str) -> Option<NodeVersion> {
    let mut rest = line.trim_start();
    rest = rest.strip_prefix("->").unwrap_or(rest);
    rest = rest.trim_start();
    rest = rest.strip_prefix('*').unwrap_or(rest);
    let token = rest.split_whitespace().next()?;
    token.parse().ok()
}

/// Versions named by `nvm ls` on Unix, in listing order.
pub(crate) fn parse_unix_installed(output: &str) -> Vec<NodeVersion> {
    let mut versions = Vec::new();
    for line in output.lines() {
        if let Some(version) = leading_version(line)
            && !versions.contains(&version)
        {
            versions.push(version);
        }
    }
    versions
}

/// Versions named by `nvm list` on nvm-windows, in listing order. The active
/// version carries a leading `*`.
pub(crate) fn parse_windows_installed(output: &str) -> Vec<NodeVersion> {
    // Same line shape as Unix apart from the marker, which leading_version
    // already strips.
    parse_unix_installed(output)
}

/// Newest LTS release in `nvm ls-remote --lts` output. The listing is
/// ascending, so the scan runs from the last line up.
pub(crate) fn parse_unix_latest_stable(output: &str) -> Option<NodeVersion> {
    output.lines().rev().find_map(leading_version)
}

/// Newest LTS release in the `nvm list available` table on nvm-windows.
/// Rows look like `|   25.0.0    |   24.11.0   |  0.12.18  |  0.11.16  |`;
/// the LTS column is the second cell, and the first data row is the newest.
pub(crate) fn parse_windows_latest_stable(output: &str) -> Option<NodeVersion> {
    for line in output.lines() {
        let line = line.trim();
        if !line.starts_with('|') {
            continue;
        }

        let cells: Vec<&str> = line
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect();

        // Header and separator rows fail the parse and are skipped.
        if let Some(version) = cells.get(1).and_then(|cell| cell.parse().ok()) {
            return Some(version);
        }
    }
    None
}

/// Whether a listing mentions `version` as a standalone token (optionally
/// `v`-prefixed). Tokens are compared textually, so `118.20.0` and
/// `18.20.00` do not count as mentions of `18.20.0`.
pub(crate) fn listing_contains_version(output: &str, version: &NodeVersion) -> bool {
    let bare = version.bare();
    output
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '.'))
        .filter(|token| !token.is_empty())
        .any(|token| token.strip_prefix('v').unwrap_or(token) == bare)
}
