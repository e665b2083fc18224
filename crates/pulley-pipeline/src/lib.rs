// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline coordinator for a Pulley run.
//!
//! One run moves through fixed states:
//!
//! 1. load the raw document through a [`DocumentLoader`](pulley_config::DocumentLoader),
//! 2. check it against the v1 schema and deserialize the typed Pulleyfile,
//! 3. process packages strictly in order: resolve, construct, validate, fetch,
//! 4. resolve and construct the bundler and hand it every retrieved package.
//!
//! Any error ends the run; rule failures only do so in halt mode.

pub mod display;
pub mod pipeline;

pub use pipeline::{Pipeline, PipelineOptions, RunSummary, DEFAULT_BUNDLER};
