//! Client side of the Hoopin waitlist.
//!
//! [`form`] holds the inline validation and the submit flow; [`client`] is
//! the HTTP transport with its single retry.

pub mod client;
pub mod form;

#[cfg(test)]
mod testing;
