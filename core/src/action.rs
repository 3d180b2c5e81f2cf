use std::path::PathBuf;

use crate::builder::Builder;
use crate::catalog::Catalog;
use crate::config::{BuildConfig, Config};
use crate::error::{Error, Result};
use crate::style;
use crate::testing::{self, TestOutcome, TestRunner};

fn report(e: Error) -> Error {
    style::print_warn(&e, true);
    if let Error::BuildFailure { diagnostics, .. } = &e {
        eprint!("{}", diagnostics);
    }
    e
}

pub async fn do_build(cfg: &BuildConfig) -> Result<PathBuf> {
    let builder = Builder::from_config(cfg);
    let artifact = builder.build().await.map_err(report)?.to_owned();
    style::print_ctrl("compile done", true);
    Ok(artifact)
}

/// Builds the subject (unless disabled), then runs every case in catalog order.
/// The first failing case stops the run; its error is returned after a warning is printed.
pub async fn do_test<'t>(catalog: &'t Catalog, cfg: &Config) -> Result<Vec<TestOutcome<'t>>> {
    if cfg.build.enabled {
        self::do_build(&cfg.build).await?;
    } else {
        log::info!("Build skipped");
    }

    let runner = TestRunner::new(cfg.build.executable()).time_limit(cfg.test.time_limit());
    log::info!(
        "Running: {} (data dir: {})",
        runner.get_executable().to_string_lossy(),
        cfg.test.data_dir.to_string_lossy()
    );
    if catalog.is_empty() {
        log::warn!("Catalog has no test cases");
    }

    let mut results = Vec::with_capacity(catalog.len());
    for t in catalog {
        style::print_ctrl("run test case", false);
        style::print_info(&t.name, true);

        let input = t.input_path(&cfg.test.data_dir);
        let bar = style::spinner(format!("Testcase {} ...", t.name));
        let res = runner.execute(&input).await;
        bar.finish_and_clear();
        let res = res.map_err(report)?;

        log::debug!(
            "{}: {}ms, stderr={:?}",
            t.name,
            res.execution_time.as_millis(),
            String::from_utf8_lossy(&res.stderr)
        );

        let outcome = match testing::verify(&res, t) {
            Ok(outcome) => outcome,
            Err(e) => {
                let e = report(e);
                style::print_execution_detail(&res);
                return Err(e);
            }
        };
        style::print_outcome(&outcome);
        results.push(outcome);
    }

    style::print_ctrl("execute done", true);
    Ok(results)
}
