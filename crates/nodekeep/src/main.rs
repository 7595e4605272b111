//! nodekeep keeps Node.js versions and their global packages in step on
//! machines that use nvm or nvm-windows: capture what each version has,
//! move package sets between versions, and retire versions that are behind
//! the latest LTS release or never installed cleanly.
//!
//! Everything runs sequentially on one thread; every external step is a
//! child process of nvm or npm, awaited one at a time. Failures of those
//! tools are reported on the console and never crash the run, so the exit
//! code only reflects command line validation.

mod args;
mod commands;
mod context;
mod logging;
mod ui;

use clap::Parser;

use crate::args::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(tools) = context::locate().await else {
        return;
    };

    match cli.command {
        Command::ListAll { json, versions } => {
            commands::list_all(&tools, json, &versions).await;
        }
        Command::Cleanup => commands::cleanup(&tools).await,
        Command::InstallLts => commands::install_lts(&tools).await,
        Command::FixFailed { version } => commands::fix_failed(&tools, version.as_ref()).await,
        Command::Migrate { to, from, yes } => commands::migrate(&tools, to, from, yes).await,
    }
}
