use std::path::PathBuf;

use colored::Colorize as _;
use simjudge_core::Config;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let path = args.dir.join(Config::FILENAME);
    fsutil::write_new_with_mkdir(&path, Config::example_toml())?;
    println!(
        "{}",
        format!("Successfully wrote {}", path.to_string_lossy()).green()
    );
    Ok(())
}
