// SPDX-FileCopyrightText: 2026 Pulley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The run state machine.

use std::path::{Path, PathBuf};

use pulley_config::{DocumentLoader, PackageSpec, Pulleyfile, Settings};
use pulley_core::{PulleyError, RetrievedPackage, SchemaViolation};
use pulley_plugin::PluginRegistry;
use pulley_report::Reporter;
use pulley_rules::{ReportingObserver, validate_source};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::display::package_box;

/// Bundler used when neither the command line nor the Pulleyfile names one.
pub const DEFAULT_BUNDLER: &str = "default";

/// Per-run knobs that do not come from the Pulleyfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub destination: PathBuf,
    /// Beats the Pulleyfile's `bundler` when set.
    pub bundler_override: Option<String>,
    /// Turn rule-set failures into a fatal [`PulleyError::RuleValidation`].
    pub halt_on_rule_failure: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("./out"),
            bundler_override: None,
            halt_on_rule_failure: false,
        }
    }
}

impl From<&Settings> for PipelineOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            destination: settings.destination.clone(),
            bundler_override: settings.bundler.clone(),
            halt_on_rule_failure: settings.halt_on_rule_failure,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub bundler: String,
    pub destination: PathBuf,
    /// Sanitized package names, in bundle order.
    pub packages: Vec<String>,
}

/// Coordinates one run over a registry and a reporting context.
pub struct Pipeline<'a> {
    registry: &'a PluginRegistry,
    reporter: &'a Reporter,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(registry: &'a PluginRegistry, reporter: &'a Reporter, options: PipelineOptions) -> Self {
        Self {
            registry,
            reporter,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Execute a full run with the document produced by `loader`.
    pub async fn run(&self, loader: &dyn DocumentLoader) -> Result<RunSummary, PulleyError> {
        let document = loader.load(self.reporter).await?;
        let pulleyfile = self.check_schema(&document)?;
        info!(name = %pulleyfile.info.name, packages = pulleyfile.packages.len(), "Pulleyfile accepted");

        let mut retrieved = Vec::with_capacity(pulleyfile.packages.len());
        for spec in &pulleyfile.packages {
            retrieved.push(self.process_package(spec).await?);
        }

        let bundler = self.bundler_name(&pulleyfile).to_string();
        self.bundle(&bundler, retrieved).await
    }

    /// Validate the raw document and deserialize the typed Pulleyfile.
    pub fn check_schema(&self, document: &Value) -> Result<Pulleyfile, PulleyError> {
        self.reporter.info("Validating Pulleyfile against v1 schema");
        let outcome = pulley_config::validate(document);

        if !outcome.is_valid() {
            let count = outcome.errors.len();
            self.reporter
                .error(format!("Encountered {count} Pulleyfile validation errors:"));
            for (index, violation) in outcome.errors.iter().enumerate() {
                self.reporter
                    .error(format!("Error {}/{count}: {violation}", index + 1));
            }
            return Err(PulleyError::SchemaValidation {
                violations: outcome.errors,
            });
        }

        let pulleyfile: Pulleyfile = serde_json::from_value(document.clone()).map_err(|e| {
            PulleyError::SchemaValidation {
                violations: vec![SchemaViolation::new("", e.to_string())],
            }
        })?;

        self.reporter.info_success("Validated Pulleyfile");
        Ok(pulleyfile)
    }

    /// Resolve, construct, validate, and fetch one package.
    pub async fn process_package(&self, spec: &PackageSpec) -> Result<RetrievedPackage, PulleyError> {
        self.reporter.raw(package_box(spec));

        let source_name = spec.source_name().inspect_err(|_| {
            self.reporter.error(format!(
                "Package {} declares an inline source without a name",
                spec.name
            ));
        })?;
        let factory = self.registry.resolve_source(source_name, self.reporter)?;

        let options = spec.effective_options();
        let authentication = spec.authentication_value();
        let source = factory.create(&options, authentication.as_ref());
        debug!(package = %spec.name, source = source_name, "source constructed");

        let observer = ReportingObserver::new(self.reporter);
        let outcome =
            validate_source(source.as_ref(), &options, authentication.as_ref(), &observer).await;

        if !outcome.is_success() {
            warn!(
                package = %spec.name,
                failed = outcome.failures.len(),
                "configuration rules failed"
            );
            if self.options.halt_on_rule_failure {
                return Err(PulleyError::RuleValidation {
                    package: spec.name.clone(),
                    failures: outcome.failures,
                });
            }
        }

        let content = source.fetch().await.map_err(|e| {
            self.reporter
                .error(format!("Failed to fetch package {}", spec.name));
            PulleyError::plugin(format!("fetch of package '{}' failed", spec.name), e)
        })?;

        let package = RetrievedPackage::new(&spec.name, content)
            .with_metadata(spec.metadata.clone())
            .with_after(spec.after.clone());
        self.reporter.info_success(format!(
            "Retrieved package {} ({} file(s))",
            package.name,
            package.content.len()
        ));
        Ok(package)
    }

    /// Bundler precedence: command line, then Pulleyfile, then [`DEFAULT_BUNDLER`].
    pub fn bundler_name<'p>(&'p self, pulleyfile: &'p Pulleyfile) -> &'p str {
        self.options
            .bundler_override
            .as_deref()
            .or(pulleyfile.bundler.as_deref())
            .unwrap_or(DEFAULT_BUNDLER)
    }

    async fn bundle(
        &self,
        bundler_name: &str,
        packages: Vec<RetrievedPackage>,
    ) -> Result<RunSummary, PulleyError> {
        let factory = self.registry.resolve_bundler(bundler_name, self.reporter)?;
        let bundler = factory.create();

        let destination: &Path = &self.options.destination;
        let names: Vec<String> = packages.iter().map(|p| p.name.clone()).collect();
        self.reporter.notice(format!(
            "Bundling {} package(s) with {bundler_name} bundler",
            names.len()
        ));

        bundler.bundle(packages, destination).await.map_err(|e| {
            self.reporter.error(format!("Failed to bundle with {bundler_name} bundler"));
            PulleyError::plugin(format!("bundle with '{bundler_name}' bundler failed"), e)
        })?;

        self.reporter.success(format!(
            "Bundled {} package(s) into {}",
            names.len(),
            destination.display()
        ));
        info!(bundler = bundler_name, destination = %destination.display(), "bundle complete");

        Ok(RunSummary {
            bundler: bundler_name.to_string(),
            destination: destination.to_path_buf(),
            packages: names,
        })
    }
}
