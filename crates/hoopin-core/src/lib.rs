//! Core types and trait definitions for the Hoopin waitlist.
//!
//! This crate is free of HTTP and database dependencies. The endpoint, the
//! store backend and the client all share its schema and validation rules so
//! that both sides of the wire agree on what a valid submission is.

pub mod error;
pub mod response;
pub mod row;
pub mod store;
pub mod submission;
pub mod validate;

pub use error::ValidationError;
pub use response::{StatusResponse, SubmitResponse};
pub use row::WaitlistRow;
pub use submission::{RawSubmission, Submission};
pub use validate::{FieldKind, is_valid_email, validate_field};
