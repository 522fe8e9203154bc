//! Executor integration tests through the public `ledgerstore` API.

mod common;
mod config;
mod custom_kinds;
mod error_handling;
