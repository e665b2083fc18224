// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin contracts for sources, bundlers, and rules.
//!
//! All async methods use `#[async_trait]` so plugins can be held as trait objects.

pub mod bundler;
pub mod rule;
pub mod source;

pub use bundler::{Bundler, BundlerFactory};
pub use rule::{Rule, RuleError, RuleRef};
pub use source::{Source, SourceFactory};
