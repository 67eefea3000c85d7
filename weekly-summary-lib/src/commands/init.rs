use super::Host;
use super::config::{CONFIG_FILE_NAME, Config};
use crate::Result;
use crate::document::repository_root;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `summary.toml` in the repository root)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = if let Some(path) = &args.output {
        path.clone()
    } else {
        let cwd = std::env::current_dir().into_app_err("determining the current directory")?;
        let cwd = Utf8PathBuf::try_from(cwd).into_app_err("current directory is not valid UTF-8")?;
        repository_root(&cwd).unwrap_or(cwd).join(CONFIG_FILE_NAME)
    };

    Config::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    #[test]
    fn test_init_writes_default_config() {
        let tmp = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::try_from(tmp.path().join("custom.toml")).unwrap();
        let mut host = TestHost::new();

        init_config(&mut host, &InitArgs { output: Some(output.clone()) }).unwrap();

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert_eq!(Config::load(&root, Some(&output)).unwrap(), Config::default());

        let printed = String::from_utf8(host.output_buf).unwrap();
        assert!(printed.contains("custom.toml"), "{printed}");
    }
}
