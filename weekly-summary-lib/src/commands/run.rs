//! Command dispatch logic for weekly-summary

use super::{InitArgs, PreviewArgs, UpdateArgs, init_config, preview_digest, update_document};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "weekly-summary", version, author, long_about = None)]
#[command(about = "Keep a weekly digest of GitHub activity in a profile README")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch recent activity and update the digest in the README
    Update(Box<UpdateArgs>),
    /// Fetch recent activity and print the digest without changing any file
    Preview(Box<PreviewArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// Argument errors, `--help`, and `--version` are written to the host, which is then asked
/// to exit with clap's status code.
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let text = e.render().to_string();
            if e.use_stderr() {
                let _ = write!(host.error(), "{text}");
            } else {
                let _ = write!(host.output(), "{text}");
            }

            host.exit(e.exit_code());
            return Ok(());
        }
    };

    match &cli.command {
        Command::Update(update_args) => update_document(host, update_args).await,
        Command::Preview(preview_args) => preview_digest(host, preview_args).await,
        Command::Init(init_args) => init_config(host, init_args),
    }
}
