use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    pub name: String,
    #[serde(rename = "answer")]
    pub expected_answer: i64,
}

impl TestCase {
    pub const INPUT_EXTENSION: &str = "data";

    pub fn new(name: impl Into<String>, expected_answer: i64) -> Self {
        Self {
            name: name.into(),
            expected_answer,
        }
    }

    /// `<data_dir>/<name>.data`
    pub fn input_path(&self, data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir
            .as_ref()
            .join(format!("{}.{}", self.name, Self::INPUT_EXTENSION))
    }
}

/// Ordered, read-only list of test cases. Execution order is report order.
/// Names are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog(Vec<TestCase>);

impl Catalog {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self(cases)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TestCase> for Catalog {
    fn from_iter<I: IntoIterator<Item = TestCase>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
