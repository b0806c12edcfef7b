#![doc(test(attr(deny(warnings))))]

//! Blueprint Builder drafts healthcare service scenarios and renders a mock
//! service blueprint for each one, driven from an interactive shell.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Blueprint Builder tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
