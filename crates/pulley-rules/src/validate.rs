// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validation of a constructed source against a package's configuration.

use futures::future;
use pulley_core::Source;
use serde_json::Value;

use crate::evaluate::{RuleSetOutcome, evaluate};
use crate::observer::RuleObserver;

/// Run `source`'s option rules against `options` and, when the source
/// declares them, its authentication rules against `authentication`.
///
/// The two rule sets are evaluated concurrently, each with its own
/// start/finish notifications. A missing authentication object is tested as
/// JSON `null`. The returned outcome lists option results first.
pub async fn validate_source(
    source: &dyn Source,
    options: &Value,
    authentication: Option<&Value>,
    observer: &dyn RuleObserver,
) -> RuleSetOutcome {
    let option_rules = source.option_rules();

    match source.authentication_rules() {
        None => evaluate(&option_rules, options, observer).await,
        Some(auth_rules) => {
            let auth_value = authentication.unwrap_or(&Value::Null);
            let (options_outcome, auth_outcome) = future::join(
                evaluate(&option_rules, options, observer),
                evaluate(&auth_rules, auth_value, observer),
            )
            .await;
            options_outcome.merge(auth_outcome)
        }
    }
}
