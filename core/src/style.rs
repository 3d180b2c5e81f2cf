use std::fmt::Display;
use std::time::Duration;

use colored::{ColoredString, Colorize};
use crossterm::terminal;
use indicatif::{ProgressBar, ProgressStyle};

use crate::testing::{ExecutionResult, TestOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// control flow and progress
    Ctrl,
    Info,
    /// warnings and failures
    Warn,
}

pub trait ColorTheme {
    fn paint(&self, s: &str) -> ColoredString;
}

impl ColorTheme for Category {
    fn paint(&self, s: &str) -> ColoredString {
        use Category::*;
        match self {
            Ctrl => s.cyan().bold(),
            Info => s.green().bold(),
            Warn => s.red(),
        }
    }
}

/// Styled `msg` followed by a newline, or by a space when more text follows on the same line.
pub fn format_message(category: Category, msg: impl Display, line: bool) -> String {
    let end = if line { "\n" } else { " " };
    format!("{}{}", category.paint(&msg.to_string()), end)
}

fn emit(category: Category, msg: impl Display, line: bool) {
    print!("{}", format_message(category, msg, line));
}

pub fn print_ctrl(msg: impl Display, line: bool) {
    emit(Category::Ctrl, msg, line)
}

pub fn print_info(msg: impl Display, line: bool) {
    emit(Category::Info, msg, line)
}

pub fn print_warn(msg: impl Display, line: bool) {
    emit(Category::Warn, msg, line)
}

pub fn format_outcome(res: &TestOutcome) -> String {
    let m = &res.metrics;
    format!(
        "judge result: {}\ncommit number: {}\ncycles: {}\naccuracy: {} among {}\n",
        res.judge, m.instruction_count, m.cycle_count, m.accuracy, m.total_branches,
    )
}

pub fn print_outcome(res: &TestOutcome) {
    print!("{}", format_outcome(res));
}

/// Spinner drawn on stderr while the subject runs; hidden when stderr is not a terminal.
pub fn spinner(msg: impl Into<String>) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let bar = ProgressBar::new_spinner()
        .with_style(style)
        .with_message(msg.into());
    bar.enable_steady_tick(Duration::from_millis(50));
    bar
}

/// Dumps what the subject printed, for failures where the output itself is at fault.
pub fn print_execution_detail(res: &ExecutionResult) {
    let (cols, _) = terminal::size().unwrap_or((40, 40));
    let cols = cols as usize;

    const BOLD_LINE: &str = "━";
    const THIN_LINE: &str = "─";

    let bold_bar = BOLD_LINE.repeat(cols).blue().bold();
    println!(
        "{} [{}ms, {}]",
        bold_bar,
        res.execution_time.as_millis(),
        res.status
    );

    fn print_sub_title(s: &str, cols: usize) {
        println!(
            "{}{}",
            s.cyan().bold(),
            THIN_LINE.repeat(cols.saturating_sub(s.len() + 1)).bright_black(),
        )
    }

    fn print_stream(bytes: &[u8]) {
        if bytes.is_empty() {
            println!("{}", "<EMPTY>".magenta().dimmed());
            return;
        }
        let text = String::from_utf8_lossy(bytes);
        print!("{}", text);
        if !text.ends_with('\n') {
            println!("{}", " Missing new line ".on_yellow().black().bold());
        }
    }

    print_sub_title("[stdout]", cols);
    print_stream(&res.stdout);

    print_sub_title("[stderr]", cols);
    print_stream(&res.stderr);

    println!("{}", bold_bar);
}
