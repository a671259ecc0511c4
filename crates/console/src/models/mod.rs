//! Domain models for the console.

pub mod operator;
pub mod session;

pub use operator::{AccessKeyDigest, DirectoryError, Operator, OperatorDirectory};
pub use session::{CurrentOperator, keys as session_keys};
