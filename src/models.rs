//! Data structures describing assets and the bundle names assigned to them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{asset_category, asset_type, normalize_path};
use crate::config::NamingRules;

/// Content area an asset belongs to, derived from its root directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
  /// Characters, weapons, monsters, effects and other model content.
  Model,
  /// Scene content.
  Scene,
  /// User interface content.
  UI,
  /// Anything outside the configured roots.
  Other,
}

/// Asset kind, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
  /// Shader source.
  Shader,
  /// Material.
  Material,
  /// Image formats.
  Texture,
  /// Prefabs and imported meshes.
  Prefab,
  /// Serialized engine assets.
  Asset,
  /// Unmatched extension.
  Other,
}

/// How the caller reached the asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetRole {
  /// The asset is bundled for its own sake.
  #[default]
  Primary,
  /// The asset is pulled in by another asset and may be shared.
  Dependency,
}

impl AssetCategory {
  /// Dependency assets in this category may be grouped by sharing rules.
  pub fn allows_dependency_grouping(self) -> bool {
    self != AssetCategory::UI
  }
}

impl AssetType {
  /// Types that take part in dependency grouping.
  pub fn is_dependency_type(self) -> bool {
    matches!(
      self,
      AssetType::Material
        | AssetType::Texture
        | AssetType::Shader
        | AssetType::Prefab
        | AssetType::Asset
    )
  }

  /// Types that may receive a dedicated dependency bundle.
  pub fn allows_single_bundle(self) -> bool {
    matches!(self, AssetType::Texture | AssetType::Prefab | AssetType::Asset)
  }
}

/// Immutable description of one asset at classification time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetDescriptor {
  path: String,
  size: u64,
  category: AssetCategory,
  asset_type: AssetType,
  role: AssetRole,
}

impl AssetDescriptor {
  /// Classify a path against the rules, deriving its category and type.
  ///
  /// Backslash separators are normalised to forward slashes before any rule is applied, so
  /// descriptors built from Windows paths behave identically to their Unix counterparts.
  pub fn classify(path: &str, size: u64, rules: &NamingRules) -> Self {
    let path = normalize_path(path);
    let category = asset_category(&path, rules);
    let asset_type = asset_type(&path, rules);
    Self {
      path,
      size,
      category,
      asset_type,
      role: AssetRole::Primary,
    }
  }

  /// Same descriptor, marked as reached through another asset.
  pub fn as_dependency(self) -> Self {
    self.with_role(AssetRole::Dependency)
  }

  /// Same descriptor with an explicit role.
  pub fn with_role(mut self, role: AssetRole) -> Self {
    self.role = role;
    self
  }

  /// Normalised asset path.
  pub fn path(&self) -> &str {
    &self.path
  }

  /// File size in bytes.
  pub fn size(&self) -> u64 {
    self.size
  }

  /// Category derived from the root directory.
  pub fn category(&self) -> AssetCategory {
    self.category
  }

  /// Type derived from the extension.
  pub fn asset_type(&self) -> AssetType {
    self.asset_type
  }

  /// Role supplied by the caller.
  pub fn role(&self) -> AssetRole {
    self.role
  }

  /// Lowercased file name without its extension.
  pub fn file_stem(&self) -> String {
    file_stem(&self.path).to_lowercase()
  }

  /// True when dependency sharing rules decide this asset's bundle.
  pub fn is_dependency_candidate(&self) -> bool {
    self.role == AssetRole::Dependency
      && self.category.allows_dependency_grouping()
      && self.asset_type.is_dependency_type()
  }
}

/// File name of a slash separated path with the last extension removed.
pub(crate) fn file_stem(path: &str) -> &str {
  let name = path.rsplit('/').next().unwrap_or(path);
  match name.rfind('.') {
    Some(0) | None => name,
    Some(index) => &name[..index],
  }
}

/// Canonical bundle name assigned to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BundleName(String);

impl BundleName {
  /// Wrap a raw bundle name.
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  /// Borrow the name.
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Take ownership of the underlying string.
  pub fn into_string(self) -> String {
    self.0
  }
}

impl fmt::Display for BundleName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for BundleName {
  fn as_ref(&self) -> &str {
    &self.0
  }
}
