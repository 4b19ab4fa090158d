//! Ordered rule tables that classify asset paths.
//!
//! Each table is an explicit list evaluated top to bottom, so precedence lives in data rather
//! than in the order of `if` branches. Paths are compared with forward slashes; callers go
//! through [`normalize_path`] first.

mod bucket;
mod prefix;

pub use bucket::bucket_index;
pub use prefix::{LocationNaming, PrefixRule, PrefixTable, RuleMatch};

use crate::config::NamingRules;
use crate::models::{AssetCategory, AssetType};

/// Replace backslash separators so rules written with `/` apply to Windows paths.
pub fn normalize_path(path: &str) -> String {
  path.replace('\\', "/")
}

/// True when `path` is `root` itself or lies below it.
///
/// An empty root matches nothing.
pub fn is_under_root(path: &str, root: &str) -> bool {
  let root = root.trim_end_matches('/');
  if root.is_empty() {
    return false;
  }
  match path.strip_prefix(root) {
    Some(rest) => rest.is_empty() || rest.starts_with('/'),
    None => false,
  }
}

/// ASCII case-insensitive suffix test against a set of extensions.
pub fn matches_any_suffix(path: &str, suffixes: &[String]) -> bool {
  suffixes.iter().any(|suffix| ends_with_ignore_case(path, suffix))
}

fn ends_with_ignore_case(path: &str, suffix: &str) -> bool {
  if suffix.is_empty() || suffix.len() > path.len() {
    return false;
  }
  path
    .as_bytes()
    .get(path.len() - suffix.len()..)
    .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix.as_bytes()))
}

/// Extension rules in precedence order.
fn type_rules(rules: &NamingRules) -> [(&[String], AssetType); 5] {
  let extensions = &rules.extensions;
  [
    (extensions.shader.as_slice(), AssetType::Shader),
    (extensions.material.as_slice(), AssetType::Material),
    (extensions.texture.as_slice(), AssetType::Texture),
    (extensions.prefab.as_slice(), AssetType::Prefab),
    (extensions.asset.as_slice(), AssetType::Asset),
  ]
}

/// Root rules in precedence order.
fn category_rules(rules: &NamingRules) -> [(&str, AssetCategory); 3] {
  let roots = &rules.roots;
  [
    (roots.model.as_str(), AssetCategory::Model),
    (roots.scene.as_str(), AssetCategory::Scene),
    (roots.ui.as_str(), AssetCategory::UI),
  ]
}

/// Determine the asset type from the file extension; first matching set wins.
pub fn asset_type(path: &str, rules: &NamingRules) -> AssetType {
  type_rules(rules)
    .into_iter()
    .find(|(suffixes, _)| matches_any_suffix(path, suffixes))
    .map_or(AssetType::Other, |(_, asset_type)| asset_type)
}

/// Determine the category from the root directory; first matching root wins.
pub fn asset_category(path: &str, rules: &NamingRules) -> AssetCategory {
  category_rules(rules)
    .into_iter()
    .find(|(root, _)| is_under_root(path, root))
    .map_or(AssetCategory::Other, |(_, category)| category)
}
