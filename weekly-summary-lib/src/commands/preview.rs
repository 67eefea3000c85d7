use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Fetch activity and print the rendered digest without touching any file.
pub async fn preview_digest<H: Host>(host: &mut H, args: &PreviewArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    let aggregate = common.collect().await;
    let digest = common.render(&aggregate);

    let _ = writeln!(host.output(), "{digest}");
    Ok(())
}
