// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule validation for plugin configuration.
//!
//! [`evaluate`] runs every rule of a set concurrently and reports progress to a
//! [`RuleObserver`]. [`validate_source`] applies a source's option and
//! authentication rule sets to a package spec. The [`builtin`] module holds
//! reusable rules shared by the built-in plugins.

pub mod builtin;
pub mod evaluate;
pub mod observer;
pub mod validate;

pub use evaluate::{RulePass, RuleSetOutcome, evaluate};
pub use observer::{NoopObserver, ReportingObserver, RuleObserver};
pub use validate::validate_source;
