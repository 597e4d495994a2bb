//! Command service integration tests.

mod support;
mod caching;
mod commands;

#[cfg(feature = "http")]
mod http;
