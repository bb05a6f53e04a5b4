pub mod catalog;
pub mod config;
pub mod decoder;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod harness;
pub mod judge;
pub mod problems;
pub mod routes;
pub mod testcase;
pub mod web_server;

pub use decoder::Verdict;
pub use error::{JudgeError, Result};
pub use judge::{Judge, RunOutcome, SubmitOutcome};
