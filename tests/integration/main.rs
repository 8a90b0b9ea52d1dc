//! Integration tests
//!
//! `api_tests` drive the full router against in-memory stores.
//! `repository_tests` need PostgreSQL: run with
//! `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

mod common;
mod repository_tests;
