//! Library entry for Storefront exposing the paginated collections, the
//! backend sources and the browser runtime for the binary and integration tests.

pub mod app;
pub mod args;
pub mod config;
pub mod i18n;
pub mod logic;
pub mod sources;
pub mod state;

#[cfg(test)]
mod test_utils;
