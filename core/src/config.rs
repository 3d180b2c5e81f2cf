use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::catalog::{Catalog, TestCase};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub build: BuildConfig,
    pub test: TestConfig,
    #[serde(rename = "testcase", default)]
    pub testcases: Vec<TestCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub compiler: PathBuf,
    #[serde(default)]
    pub flags: Vec<String>,
    pub source: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    pub data_dir: PathBuf,
    pub time_limit_ms: Option<u64>,
}

/// Values that take precedence over the config file (environment, command line).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub compiler: Option<PathBuf>,
    pub time_limit_ms: Option<u64>,
    #[serde(skip)]
    pub no_build: bool,
}

fn default_true() -> bool {
    true
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "simjudge.toml";

    pub fn example_toml() -> String {
        match Asset::get(Self::FILENAME) {
            Some(file) => String::from_utf8_lossy(file.data.as_ref()).into_owned(),
            None => String::new(),
        }
    }

    /// Built-in catalog and paths; relative paths are left relative to the current dir.
    pub fn builtin() -> anyhow::Result<Self> {
        let cfg = Self::from_toml(&Self::example_toml()).context("Invalid built-in config")?;
        Ok(cfg.resolve_paths("."))
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        let base = filepath
            .parent()
            .map(Path::to_owned)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut cfg = cfg.resolve_paths(base);
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> Option<PathBuf> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
    }

    /// Loads the nearest config file, falling back to the built-in one.
    pub fn from_file_finding_in_ancestors_or_builtin(
        cur_dir: impl AsRef<Path>,
    ) -> anyhow::Result<Self> {
        match Self::find_file_in_ancestors(cur_dir) {
            Some(path) => Self::from_toml_file(path),
            None => {
                log::info!("No {} found; using the built-in catalog", Self::FILENAME);
                Self::builtin()
            }
        }
    }

    fn resolve_paths(mut self, base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        self.build.source = fsutil::resolve_from(base, &self.build.source);
        self.build.output = fsutil::resolve_from(base, &self.build.output);
        if self.build.compiler.components().count() > 1 {
            self.build.compiler = fsutil::resolve_from(base, &self.build.compiler);
        }
        self.test.data_dir = fsutil::resolve_from(base, &self.test.data_dir);
        self
    }

    /// Override paths are taken as given (relative to the current dir).
    pub fn with_overrides(mut self, o: Overrides) -> Self {
        let Overrides {
            data_dir,
            source,
            compiler,
            time_limit_ms,
            no_build,
        } = o;
        if let Some(d) = data_dir {
            self.test.data_dir = d;
        }
        if let Some(s) = source {
            self.build.source = s;
        }
        if let Some(c) = compiler {
            self.build.compiler = c;
        }
        if time_limit_ms.is_some() {
            self.test.time_limit_ms = time_limit_ms;
        }
        if no_build {
            self.build.enabled = false;
        }
        self
    }

    pub fn catalog(&self) -> Catalog {
        self.testcases.iter().cloned().collect()
    }
}

impl BuildConfig {
    /// Path of the built artifact, always with a directory part so that
    /// spawning it never searches `PATH`.
    pub fn executable(&self) -> PathBuf {
        let out = &self.output;
        match out.parent() {
            Some(dir) if dir.as_os_str().is_empty() => Path::new(".").join(out),
            _ => out.to_owned(),
        }
    }
}

impl TestConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

impl Overrides {
    pub fn merge(self, higher: Overrides) -> Self {
        Self {
            data_dir: higher.data_dir.or(self.data_dir),
            source: higher.source.or(self.source),
            compiler: higher.compiler.or(self.compiler),
            time_limit_ms: higher.time_limit_ms.or(self.time_limit_ms),
            no_build: self.no_build || higher.no_build,
        }
    }
}
