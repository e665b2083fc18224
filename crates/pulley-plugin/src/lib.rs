// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry and built-in catalog.
//!
//! Sources and bundlers are compiled in and registered by name in a
//! [`StaticProvider`]. The [`PluginRegistry`] resolves names through a
//! [`PluginProvider`], so other lookup strategies can be added without
//! touching callers.

pub mod catalog;
pub mod registry;

pub use catalog::{builtin_provider, builtin_registry};
pub use registry::{Plugin, PluginProvider, PluginRegistry, StaticProvider};
