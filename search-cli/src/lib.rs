//! Library target for the `stream-search-cli` package.
//!
//! The primary deliverable of this package is the `stream-search` CLI binary
//! (`src/main.rs`). This library exists so CI can run
//! `cargo test -p stream-search-cli --doc` for feature/doctype validation.

#[doc(hidden)]
pub use stream_search;
