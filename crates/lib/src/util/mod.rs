//! Shared utilities.
//!
//! Test helpers only, for now.

#[cfg(test)]
pub mod testutil;
