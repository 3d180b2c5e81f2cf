use std::{process::ExitStatus, time::Duration};

use crate::catalog::TestCase;

/// Everything the subject wrote, captured after it exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status: ExitStatus,
    pub execution_time: Duration,
}

/// The four counters the subject prints on stderr, kept as opaque text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub instruction_count: String,
    pub cycle_count: String,
    pub accuracy: String,
    pub total_branches: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome<'t> {
    pub testcase: &'t TestCase,
    pub judge: i64,
    pub metrics: Metrics,
    pub execution_time: Duration,
}
