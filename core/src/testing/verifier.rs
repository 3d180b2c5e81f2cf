use super::result::{ExecutionResult, Metrics, TestOutcome};
use crate::catalog::TestCase;
use crate::error::{Channel, Error, MalformedReason, Result};

/// Parses the judge result from the first stdout line.
pub fn parse_judge(stdout: &[u8]) -> std::result::Result<i64, MalformedReason> {
    let text = decode(stdout, Channel::Stdout)?;
    let first = text.lines().next().ok_or(MalformedReason::EmptyStdout)?;
    first
        .trim()
        .parse()
        .map_err(|_| MalformedReason::NotAnInteger(first.to_owned()))
}

/// Splits stderr into exactly `[instructions, cycles, accuracy, total]`.
pub fn parse_metrics(stderr: &[u8]) -> std::result::Result<Metrics, MalformedReason> {
    let text = decode(stderr, Channel::Stderr)?;
    let lines: Vec<&str> = text.lines().collect();
    let [ins, cyc, acc, tot] = lines.as_slice() else {
        return Err(MalformedReason::MetricsLineCount(lines.len()));
    };
    Ok(Metrics {
        instruction_count: ins.to_string(),
        cycle_count: cyc.to_string(),
        accuracy: acc.to_string(),
        total_branches: tot.to_string(),
    })
}

fn decode(bytes: &[u8], channel: Channel) -> std::result::Result<&str, MalformedReason> {
    std::str::from_utf8(bytes).map_err(|_| MalformedReason::NotUtf8(channel))
}

/// Both channels are parsed before the answer is compared, so malformed output
/// is reported even when the answer is also wrong.
pub fn verify<'t>(result: &ExecutionResult, testcase: &'t TestCase) -> Result<TestOutcome<'t>> {
    let malformed = |reason| Error::MalformedOutput {
        case: testcase.name.clone(),
        reason,
    };
    let judge = parse_judge(&result.stdout).map_err(malformed)?;
    let metrics = parse_metrics(&result.stderr).map_err(malformed)?;

    if judge != testcase.expected_answer {
        return Err(Error::WrongAnswer {
            case: testcase.name.clone(),
            expected: testcase.expected_answer,
            got: judge,
        });
    }
    Ok(TestOutcome {
        testcase,
        judge,
        metrics,
        execution_time: result.execution_time,
    })
}
