// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Pulley integration tests.
//!
//! Provides mock plugins and recording collaborators for fast, deterministic
//! tests without touching the filesystem.
//!
//! # Components
//!
//! - [`MockSourceFactory`] / [`MockBundlerFactory`] - counting plugin doubles
//!   that log every construction, fetch, and bundle into a shared [`EventLog`]
//! - [`ScriptedRule`] - rule with a fixed outcome and optional delay
//! - [`RecordingObserver`] - rule observer that records every hook
//! - [`MemorySink`] - report sink that keeps events in memory
//! - [`TestRegistry`] - builder for a plugin registry over mocks

pub mod harness;
pub mod mock_bundler;
pub mod mock_source;
pub mod recording;
pub mod rules;

pub use harness::{TestRegistry, mock_plugins, recording_reporter};
pub use mock_bundler::{BundleCall, MockBundlerFactory};
pub use mock_source::MockSourceFactory;
pub use recording::{EventLog, MemorySink, RecordingObserver};
pub use rules::ScriptedRule;
