use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::document::{DEFAULT_DOCUMENT, PatchOutcome, patch_document, resolve_document};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Document to update, relative to the repository root unless absolute
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DOCUMENT)]
    pub readme: Utf8PathBuf,
}

/// Fetch activity, render the digest, and patch it into the document.
pub async fn update_document<H: Host>(host: &mut H, args: &UpdateArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    // Fail on a missing document before spending any requests.
    let path = resolve_document(&args.readme, common.cwd())?;

    let aggregate = common.collect().await;
    let digest = common.render(&aggregate);

    match patch_document(&path, &digest)? {
        PatchOutcome::Updated(strategy) => {
            let _ = writeln!(host.output(), "Updated {path} ({strategy})");
        }
        PatchOutcome::Unchanged(_) => {
            let _ = writeln!(host.output(), "{path} is already up to date");
        }
    }

    Ok(())
}
