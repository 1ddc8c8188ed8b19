//! Section scrolling: which section is current, and animated scrolls between
//! sections.
//!
//! `coordinator` is plain Rust driven by explicit millisecond timestamps so it
//! can be exercised without a browser. `browser` binds it to the DOM.

pub mod browser;
pub mod config;
pub mod coordinator;
pub mod easing;
pub mod visibility;

pub use config::ScrollConfig;
