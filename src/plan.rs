//! Grouping many assets into bundles.
//!
//! A [`BundlePlan`] is the bundle → assets view a build pipeline or browser consumes: every
//! input is resolved once and filed under its bundle name, with assets that received no name
//! kept aside so callers can report them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NamingError, NamingResult};
use crate::models::{AssetCategory, AssetRole, AssetType, BundleName};
use crate::resolver::Resolver;

/// One asset handed to the planner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlanInput {
  /// Asset path relative to the project root.
  pub path: String,
  /// Size in bytes.
  #[serde(default)]
  pub size: u64,
  /// How the asset was reached.
  #[serde(default)]
  pub role: AssetRole,
}

impl PlanInput {
  /// Primary asset input.
  pub fn primary(path: impl Into<String>, size: u64) -> Self {
    Self {
      path: path.into(),
      size,
      role: AssetRole::Primary,
    }
  }

  /// Dependency asset input.
  pub fn dependency(path: impl Into<String>, size: u64) -> Self {
    Self {
      path: path.into(),
      size,
      role: AssetRole::Dependency,
    }
  }
}

/// Read a JSON array of [`PlanInput`] records.
pub fn load_plan_inputs(path: &Path) -> NamingResult<Vec<PlanInput>> {
  let content = fs::read_to_string(path).map_err(|source| NamingError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&content).map_err(|source| NamingError::Json {
    path: path.to_path_buf(),
    source,
  })
}

/// Options controlling how names are recorded in a plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
  /// Append the dependency marker to names assigned to dependency-role inputs.
  pub suffix_dependencies: bool,
}

/// Classified asset filed under a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAsset {
  /// Normalised asset path.
  pub path: String,
  /// Size in bytes.
  pub size: u64,
  /// Derived category.
  pub category: AssetCategory,
  /// Derived type.
  #[serde(rename = "type")]
  pub asset_type: AssetType,
  /// Role supplied with the input.
  pub role: AssetRole,
}

/// Assets grouped by bundle name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BundlePlan {
  /// Bundles in name order, each with its assets in path order.
  pub bundles: BTreeMap<BundleName, Vec<PlannedAsset>>,
  /// Paths no rule assigned a bundle to.
  pub unassigned: Vec<String>,
  /// Script paths, which are never bundled.
  pub scripts: Vec<String>,
}

impl BundlePlan {
  /// Resolve every input and group the results.
  pub fn build<I>(resolver: &Resolver<'_>, inputs: I, options: PlanOptions) -> Self
  where
    I: IntoIterator<Item = PlanInput>,
  {
    let rules = resolver.rules();
    let mut plan = Self::default();

    for input in inputs {
      if rules.is_script(&input.path) {
        plan.scripts.push(input.path);
        continue;
      }

      let descriptor = resolver.classify(&input.path, input.size).with_role(input.role);
      let Some(mut name) = resolver.resolve(&descriptor) else {
        plan.unassigned.push(descriptor.path().to_string());
        continue;
      };
      if options.suffix_dependencies && input.role == AssetRole::Dependency {
        name = resolver.with_dependency_suffix(&name);
      }

      plan.bundles.entry(name).or_default().push(PlannedAsset {
        path: descriptor.path().to_string(),
        size: descriptor.size(),
        category: descriptor.category(),
        asset_type: descriptor.asset_type(),
        role: descriptor.role(),
      });
    }

    for assets in plan.bundles.values_mut() {
      assets.sort_by(|a, b| a.path.cmp(&b.path));
    }
    plan.unassigned.sort();
    plan.scripts.sort();

    tracing::debug!(
      bundles = plan.bundles.len(),
      unassigned = plan.unassigned.len(),
      scripts = plan.scripts.len(),
      "bundle plan built"
    );
    plan
  }

  /// Assets filed under `name`.
  pub fn assets(&self, name: &str) -> Option<&[PlannedAsset]> {
    self
      .bundles
      .get(&BundleName::new(name))
      .map(Vec::as_slice)
  }

  /// Number of distinct bundles.
  pub fn bundle_count(&self) -> usize {
    self.bundles.len()
  }

  /// Total bytes per bundle.
  pub fn bundle_sizes(&self) -> BTreeMap<&BundleName, u64> {
    self
      .bundles
      .iter()
      .map(|(name, assets)| (name, assets.iter().map(|asset| asset.size).sum()))
      .collect()
  }
}
