pub mod action;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod style;
pub mod testing;

pub use crate::catalog::{Catalog, TestCase};
pub use crate::config::Config;
pub use crate::error::{Error, FailureKind, Result};
