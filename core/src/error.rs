use std::{io, path::PathBuf, process::ExitStatus, time::Duration};

pub type Result<T> = std::result::Result<T, Error>;

/// Failure category of a run. Every fatal condition belongs to exactly one kind,
/// and each kind owns a distinct process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum FailureKind {
    InputNotFound,
    WrongAnswer,
    MalformedOutput,
    BuildFailure,
    Timeout,
    Exec,
}

impl FailureKind {
    pub fn exit_code(self) -> i32 {
        use FailureKind::*;
        match self {
            InputNotFound => 3,
            WrongAnswer => 4,
            MalformedOutput => 5,
            BuildFailure => 6,
            Timeout => 7,
            Exec => 8,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input not found: {}", .path.to_string_lossy())]
    InputNotFound { path: PathBuf },

    #[error("cannot open input {}: {source}", .path.to_string_lossy())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Wrong Answer on '{case}' (expected {expected}, got {got})")]
    WrongAnswer {
        case: String,
        expected: i64,
        got: i64,
    },

    #[error("malformed output on '{case}': {reason}")]
    MalformedOutput { case: String, reason: MalformedReason },

    #[error("cannot spawn compiler '{}': {source}", .compiler.to_string_lossy())]
    BuildSpawn {
        compiler: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("compile error: {status}")]
    BuildFailure {
        status: ExitStatus,
        diagnostics: String,
    },

    #[error("time limit exceeded ({}ms) on input {}", .limit.as_millis(), .input.to_string_lossy())]
    Timeout { input: PathBuf, limit: Duration },

    #[error("failed to execute subject '{}': {source}", .program.to_string_lossy())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to communicate with subject: {0}")]
    Communicate(#[source] io::Error),
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        use Error::*;
        match self {
            InputNotFound { .. } | InputUnreadable { .. } => FailureKind::InputNotFound,
            WrongAnswer { .. } => FailureKind::WrongAnswer,
            MalformedOutput { .. } => FailureKind::MalformedOutput,
            BuildSpawn { .. } | BuildFailure { .. } => FailureKind::BuildFailure,
            Timeout { .. } => FailureKind::Timeout,
            Spawn { .. } | Communicate(_) => FailureKind::Exec,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

/// Why the subject's output did not fit the stdout/stderr contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("{0} is not valid UTF-8")]
    NotUtf8(Channel),

    #[error("stdout is empty")]
    EmptyStdout,

    #[error("first stdout line is not an integer: {0:?}")]
    NotAnInteger(String),

    #[error("stderr has {0} lines (expected 4)")]
    MetricsLineCount(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Channel {
    Stdout,
    Stderr,
}
