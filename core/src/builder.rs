use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::process::Command;

use crate::config::BuildConfig;
use crate::error::{Error, Result};

/// Compiles the subject's single source file into the executable the runner spawns.
#[derive(Debug, Clone)]
pub struct Builder {
    compiler: PathBuf,
    flags: Vec<String>,
    source: PathBuf,
    output: PathBuf,
}

impl Builder {
    pub fn new(
        compiler: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            compiler: compiler.into(),
            flags: Vec::new(),
            source: source.into(),
            output: output.into(),
        }
    }

    pub fn from_config(cfg: &BuildConfig) -> Self {
        Self::new(&cfg.compiler, &cfg.source, cfg.executable()).flags(cfg.flags.clone())
    }

    pub fn flags(mut self, flags: Vec<String>) -> Self {
        self.flags = flags;
        self
    }

    /// `<flags...> <source> -o <output>`
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.flags.iter().map(OsString::from).collect();
        args.push(self.source.clone().into());
        args.push("-o".into());
        args.push(self.output.clone().into());
        args
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.compiler.as_os_str().to_owned())
            .chain(self.args())
            .map(|s| s.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the compiler to completion. A non-zero exit status becomes
    /// [`Error::BuildFailure`] carrying the compiler's diagnostics.
    pub async fn build(&self) -> Result<&Path> {
        log::info!("Compiling: {}", self.command_line());

        let output = Command::new(&self.compiler)
            .args(self.args())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| Error::BuildSpawn {
                compiler: self.compiler.clone(),
                source,
            })?;

        if !output.status.success() {
            let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
            diagnostics.push_str(&String::from_utf8_lossy(&output.stdout));
            return Err(Error::BuildFailure {
                status: output.status,
                diagnostics,
            });
        }
        Ok(&self.output)
    }
}
