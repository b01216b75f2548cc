// THEORY:
// This file is the main entry point for the `meanstretch` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the
// public API that will be exposed to external consumers.
//
// The primary goal is to export the `ContrastPipeline` and its associated data
// structures (`StretchConfig`, `ChannelMeans`, etc.) as the clean, high-level
// interface for the enhancement engine, with `parallel_pipeline` as the
// row-parallel alternative for large rasters. The leaf building blocks live in
// `core_modules` and stay usable on their own for callers that already hold
// raw pixel data.

pub mod core_modules;
pub mod errors;
pub mod pipeline;
pub mod parallel_pipeline;
