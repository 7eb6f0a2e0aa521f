//! Command-line application helpers.

pub mod output;

pub use output::render;
