//! Naming rule configuration: prefixes, directory roots, extension sets and thresholds.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NamingError, NamingResult};

/// File names searched for by [`NamingRules::discover`], in priority order.
pub const DEFAULT_CONFIG_FILES: [&str; 3] =
  ["abnamer.config.json", "abnamer.config.yaml", "abnamer.config.yml"];

const MIB: u64 = 1024 * 1024;

/// Complete rule set used to classify assets and derive bundle names.
///
/// Every field has a default matching the stock project layout, so a configuration file only
/// needs to list the values it overrides. Rules are read-only once loaded and are passed
/// explicitly into [`crate::Resolver`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingRules {
  /// Bundle name prefixes.
  pub prefixes: BundlePrefixes,
  /// Directory roots that decide an asset's category and subtype.
  pub roots: ResourceRoots,
  /// File extension sets per asset type.
  pub extensions: ExtensionSets,
  /// Size limits above which a dependency gets its own bundle.
  pub thresholds: SizeThresholds,
  /// Number of shared buckets dependencies are hashed into.
  pub bucket_count: u32,
}

/// Bundle name prefixes per category and subtype.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BundlePrefixes {
  /// Marker appended to dependency-only bundles.
  pub dependency_marker: String,
  /// Name of the single bundle holding every shader.
  pub shader: String,
  /// Generic model prefix.
  pub model: String,
  /// Model effects prefix.
  pub model_fx: String,
  /// Character model prefix.
  pub model_character: String,
  /// Weapon model prefix.
  pub model_weapon: String,
  /// Monster model prefix.
  pub model_monster: String,
  /// Miscellaneous model prefix.
  pub model_other: String,
  /// Dedicated model dependency prefix.
  pub model_dep: String,
  /// Shared model texture bucket prefix.
  pub model_dep_common_texture: String,
  /// Scene prefix.
  pub scene: String,
  /// Dedicated scene dependency prefix.
  pub scene_dep: String,
  /// Dedicated scene material dependency prefix.
  pub scene_dep_material: String,
  /// Shared scene texture bucket prefix.
  pub scene_dep_common_texture: String,
  /// Shared scene asset bucket prefix.
  pub scene_dep_common_asset: String,
  /// Shared scene prefab bundle.
  pub scene_dep_common_prefab: String,
  /// UI prefix, followed by the UI sub-directory name.
  pub ui: String,
  /// Large UI image prefix, followed by the file name.
  pub ui_big_image: String,
}

impl Default for BundlePrefixes {
  fn default() -> Self {
    Self {
      dependency_marker: "_dep_".into(),
      shader: "shader".into(),
      model: "model_".into(),
      model_fx: "model_fx".into(),
      model_character: "model_role_".into(),
      model_weapon: "model_weapon_".into(),
      model_monster: "model_monster_".into(),
      model_other: "model_other_".into(),
      model_dep: "model_dep_".into(),
      model_dep_common_texture: "model_dep_common_tex_".into(),
      scene: "scene_".into(),
      scene_dep: "scene_dep_".into(),
      scene_dep_material: "scene_dep_mat_".into(),
      scene_dep_common_texture: "scene_dep_common_tex_".into(),
      scene_dep_common_asset: "scene_dep_common_asset_".into(),
      scene_dep_common_prefab: "scene_dep_common_prefab_".into(),
      ui: "ui_".into(),
      ui_big_image: "ui_big_image_".into(),
    }
  }
}

/// Directory roots, written with forward slashes and no trailing separator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceRoots {
  /// Root of all model content.
  pub model: String,
  /// Model effects.
  pub model_fx: String,
  /// Character models.
  pub model_character: String,
  /// Weapon models.
  pub model_weapon: String,
  /// Monster models.
  pub model_monster: String,
  /// Miscellaneous models.
  pub model_other: String,
  /// Root of all scene content.
  pub scene: String,
  /// Root of all UI content.
  pub ui: String,
  /// Large UI images, nested under the UI root.
  pub ui_big_image: String,
}

impl Default for ResourceRoots {
  fn default() -> Self {
    Self {
      model: "Assets/ResModel".into(),
      model_fx: "Assets/ResModel/Effects".into(),
      model_character: "Assets/ResModel/Character".into(),
      model_weapon: "Assets/ResModel/Weapon".into(),
      model_monster: "Assets/ResModel/Monster".into(),
      model_other: "Assets/ResModel/Other".into(),
      scene: "Assets/ResScene".into(),
      ui: "Assets/ResUI".into(),
      ui_big_image: "Assets/ResUI/big_image".into(),
    }
  }
}

/// Extension suffixes per asset type, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtensionSets {
  /// Shader sources.
  pub shader: Vec<String>,
  /// Materials.
  pub material: Vec<String>,
  /// Textures.
  pub texture: Vec<String>,
  /// Prefabs and meshes.
  pub prefab: Vec<String>,
  /// Serialized assets.
  pub asset: Vec<String>,
  /// Scripts, which are never bundled.
  pub script: Vec<String>,
}

impl Default for ExtensionSets {
  fn default() -> Self {
    fn list(values: &[&str]) -> Vec<String> {
      values.iter().map(|value| (*value).to_string()).collect()
    }

    Self {
      shader: list(&[".shader"]),
      material: list(&[".mat"]),
      texture: list(&[
        ".tga", ".png", ".psd", ".tif", ".tiff", ".dds", ".jpeg", ".jpg", ".gif", ".bmp",
        ".exr", ".hdr",
      ]),
      prefab: list(&[".prefab", ".fbx", ".obj"]),
      asset: list(&[".asset"]),
      script: list(&[".cs"]),
    }
  }
}

/// Byte sizes above which a dependency is bundled on its own.
///
/// Comparisons are strict: an asset exactly at the limit still goes to a shared bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SizeThresholds {
  /// Model dependencies.
  pub model: u64,
  /// Scene dependencies.
  pub scene: u64,
  /// Scene materials and prefabs.
  pub material: u64,
}

impl Default for SizeThresholds {
  fn default() -> Self {
    Self {
      model: MIB,
      scene: MIB,
      material: MIB / 5,
    }
  }
}

impl Default for NamingRules {
  fn default() -> Self {
    Self {
      prefixes: BundlePrefixes::default(),
      roots: ResourceRoots::default(),
      extensions: ExtensionSets::default(),
      thresholds: SizeThresholds::default(),
      bucket_count: 5,
    }
  }
}

impl NamingRules {
  /// Look for a rules file in `dir`, falling back to defaults when none exists.
  ///
  /// A file that exists but cannot be read or parsed is reported as an error.
  pub fn discover(dir: &Path) -> NamingResult<Self> {
    match Self::find_config_file(dir) {
      Some(path) => Self::from_path(&path),
      None => {
        tracing::debug!(dir = %dir.display(), "no naming rules file found, using defaults");
        Ok(Self::default())
      }
    }
  }

  /// First existing candidate from [`DEFAULT_CONFIG_FILES`] inside `dir`.
  pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_FILES
      .iter()
      .map(|name| dir.join(name))
      .find(|candidate| candidate.is_file())
  }

  /// Read rules from a JSON or YAML file, chosen by extension.
  pub fn from_path(path: &Path) -> NamingResult<Self> {
    let format = RulesFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| NamingError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let rules = format.parse(path, &content)?;
    tracing::debug!(path = %path.display(), "loaded naming rules");
    Ok(rules)
  }

  /// Serialise the rules as prettified JSON.
  pub fn to_json_pretty(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }

  /// True when `path` ends with one of the script extensions.
  pub fn is_script(&self, path: &str) -> bool {
    crate::classify::matches_any_suffix(path, &self.extensions.script)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RulesFormat {
  Json,
  Yaml,
}

impl RulesFormat {
  fn from_path(path: &Path) -> NamingResult<Self> {
    let extension = path
      .extension()
      .and_then(|value| value.to_str())
      .map(str::to_ascii_lowercase);
    match extension.as_deref() {
      Some("json") => Ok(Self::Json),
      Some("yaml" | "yml") => Ok(Self::Yaml),
      _ => Err(NamingError::UnsupportedFormat {
        path: path.to_path_buf(),
      }),
    }
  }

  fn parse(self, path: &Path, content: &str) -> NamingResult<NamingRules> {
    match self {
      Self::Json => serde_json::from_str(content).map_err(|source| NamingError::Json {
        path: path.to_path_buf(),
        source,
      }),
      Self::Yaml => serde_yaml::from_str(content).map_err(|source| NamingError::Yaml {
        path: path.to_path_buf(),
        source,
      }),
    }
  }
}
