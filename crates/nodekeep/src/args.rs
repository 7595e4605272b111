use clap::{Parser, Subcommand};

use nodekeep_backend::NodeVersion;

#[derive(Parser, Debug)]
#[command(
    name = "nodekeep",
    about = "Keep Node.js versions and their global packages in step across nvm",
    version,
    term_width = 80
)]
pub struct Cli {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture every version's global packages and write the ledger
    ListAll {
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Capture only these versions, e.g. "18.20.0,20.11.0"
        #[arg(long, value_name = "LIST", default_value = "all", value_parser = parse_versions_filter)]
        versions: VersionsFilter,
    },

    /// Move to the latest LTS release, carry the packages over, retire the rest
    Cleanup,

    /// Install the latest LTS release and switch to it
    #[command(visible_alias = "install")]
    InstallLts,

    /// Remove a version whose installation went wrong
    #[command(visible_alias = "fix")]
    FixFailed {
        /// The version to remove; picked interactively when omitted
        #[arg(value_name = "VERSION", value_parser = parse_version)]
        version: Option<NodeVersion>,
    },

    /// Bring one version's global packages up to the ledger or another version
    Migrate {
        /// Target version; the latest LTS release when omitted
        #[arg(long, value_name = "VERSION", value_parser = parse_version)]
        to: Option<NodeVersion>,

        /// Copy the live package set of this installed version instead of the ledger
        #[arg(long, value_name = "VERSION", value_parser = parse_version)]
        from: Option<NodeVersion>,

        /// Install every missing or outdated package without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Which versions a capture covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionsFilter {
    All,
    Selected(Vec<NodeVersion>),
}

fn parse_version(raw: &str) -> Result<NodeVersion, String> {
    raw.parse::<NodeVersion>().map_err(|error| error.to_string())
}

fn parse_versions_filter(raw: &str) -> Result<VersionsFilter, String> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(VersionsFilter::All);
    }

    let mut versions = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let version = parse_version(part)?;
        if !versions.contains(&version) {
            versions.push(version);
        }
    }

    if versions.is_empty() {
        return Err(String::from(
            "expected \"all\" or a comma separated list of versions",
        ));
    }
    Ok(VersionsFilter::Selected(versions))
}
