pub mod preflight;
pub mod query;
pub mod submit;
