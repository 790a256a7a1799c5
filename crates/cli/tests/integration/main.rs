//! Integration tests driving the cpbuild binary against a fake toolchain.
//!
//! The toolchain is a pair of shell scripts, so these run on Unix only.

#![cfg(unix)]

mod build_tests;
mod clean_tests;
mod common;
