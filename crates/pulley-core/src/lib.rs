// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Pulley.
//!
//! Defines the plugin contracts ([`Source`], [`Bundler`], [`Rule`]), the
//! pipeline error type, and the records that flow between pipeline stages.
//! Source and bundler plugins implement the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{PluginError, PulleyError};
pub use types::{
    AfterAction, PackageContent, PackageFile, PluginCategory, RetrievedPackage, RuleFailure,
    SchemaViolation,
};

pub use traits::{Bundler, BundlerFactory, Rule, RuleError, RuleRef, Source, SourceFactory};
