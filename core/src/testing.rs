pub mod result;
pub mod runner;
pub mod verifier;

pub use result::*;
pub use runner::*;
pub use verifier::*;
