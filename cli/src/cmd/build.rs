use simjudge_core::{action, config::Overrides};

use super::{GlobalArgs, SubcmdResult};
use crate::config;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub async fn exec(_args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args, Overrides::default())?;
    action::do_build(&cfg.build).await?;
    Ok(())
}
