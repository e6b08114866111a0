//! Key-value records of diagnostics.
//!
//! Environments return a [`Record`] alongside every [`Step`](crate::Step),
//! e.g. the weighted reward components of the step.
//!
//! ```rust
//! use gymboy_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("reward", RecordValue::Scalar(0.25));
//! record.insert("levels", RecordValue::Array1(vec![5.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
//! assert_eq!(record.get_scalar("reward").unwrap(), 0.25);
//! ```
mod base;

pub use base::{Record, RecordValue};
