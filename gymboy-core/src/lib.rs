#![warn(missing_docs)]
//! Environment protocol shared by gymboy environments.
//!
//! An [`Env`] is stepped with an action and returns a [`Step`], which bundles the
//! observation, the scalar reward and the termination/truncation flags.
//! Diagnostics produced along the way travel in a [`Record`](record::Record).
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
