//! Vote engine integration tests.

mod support;
mod concurrency;
mod invariants;
