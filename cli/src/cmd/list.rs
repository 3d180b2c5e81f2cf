use colored::Colorize as _;
use simjudge_core::config::Overrides;

use super::{GlobalArgs, SubcmdResult};
use crate::config;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args, Overrides::default())?;
    let catalog = cfg.catalog();
    let width = catalog.iter().map(|t| t.name.len()).max().unwrap_or(0);

    for t in &catalog {
        let input = t.input_path(&cfg.test.data_dir);
        let mark = if input.exists() {
            "".normal()
        } else {
            " (missing)".red()
        };
        println!(
            "{:<width$} {:>6}  {}{}",
            t.name,
            t.expected_answer,
            input.to_string_lossy(),
            mark,
            width = width
        );
    }
    Ok(())
}
