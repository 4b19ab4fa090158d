//! Bundle name resolution.
//!
//! A [`Resolver`] borrows an immutable [`NamingRules`] and maps asset descriptors to bundle
//! names. Primary assets are named after their location. Dependencies outside the UI tree are
//! either given a dedicated bundle when they are large, or hashed into one of a fixed number of
//! shared buckets. Resolution never fails: assets that fit no rule get `None` and the caller
//! decides whether to bundle them at all.

use crate::classify::{PrefixTable, bucket_index};
use crate::config::NamingRules;
use crate::models::{AssetCategory, AssetDescriptor, AssetType, BundleName};

/// Resolve a single descriptor against a rule set.
///
/// Convenience wrapper around [`Resolver`]; prefer building one resolver when naming many
/// assets with the same rules.
pub fn resolve(descriptor: &AssetDescriptor, rules: &NamingRules) -> Option<BundleName> {
  Resolver::new(rules).resolve(descriptor)
}

/// Applies naming rules to asset descriptors.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
  rules: &'a NamingRules,
  locations: PrefixTable<'a>,
}

impl<'a> Resolver<'a> {
  /// Create a resolver for the provided rules.
  pub fn new(rules: &'a NamingRules) -> Self {
    Self {
      rules,
      locations: PrefixTable::from_rules(rules),
    }
  }

  /// Rules this resolver applies.
  pub fn rules(&self) -> &'a NamingRules {
    self.rules
  }

  /// Location rule table in evaluation order.
  pub fn locations(&self) -> &PrefixTable<'a> {
    &self.locations
  }

  /// Build a primary-role descriptor for `path`.
  pub fn classify(&self, path: &str, size: u64) -> AssetDescriptor {
    AssetDescriptor::classify(path, size, self.rules)
  }

  /// Bundle name for the descriptor, or `None` when no rule assigns one.
  pub fn resolve(&self, descriptor: &AssetDescriptor) -> Option<BundleName> {
    if descriptor.path().is_empty() {
      return None;
    }

    let name = if descriptor.is_dependency_candidate() {
      self.dependency_name(descriptor)
    } else {
      self.location_name(descriptor.path())
    };

    if name.is_none() {
      tracing::debug!(
        path = descriptor.path(),
        category = ?descriptor.category(),
        asset_type = ?descriptor.asset_type(),
        role = ?descriptor.role(),
        "no bundle name assigned"
      );
    }
    name
  }

  /// Name derived purely from where the asset lives.
  ///
  /// Shaders always map to the shader bundle. UI assets are grouped per top-level UI folder,
  /// except large images, which are named per file. Paths outside every root get `None`.
  pub fn location_name(&self, path: &str) -> Option<BundleName> {
    if path.is_empty() {
      return None;
    }
    self.locations.name_for(path).map(BundleName::new)
  }

  /// Name for a dependency, choosing between a dedicated bundle and a shared bucket.
  pub fn dependency_name(&self, descriptor: &AssetDescriptor) -> Option<BundleName> {
    if self.needs_single_bundle(descriptor) {
      self.single_dependency_name(descriptor)
    } else {
      self.shared_dependency_name(descriptor)
    }
  }

  /// True when the dependency is large enough to get a bundle of its own.
  pub fn needs_single_bundle(&self, descriptor: &AssetDescriptor) -> bool {
    let thresholds = &self.rules.thresholds;
    match descriptor.category() {
      AssetCategory::Model => descriptor.size() > thresholds.model,
      AssetCategory::Scene => descriptor.size() > thresholds.scene,
      AssetCategory::UI | AssetCategory::Other => false,
    }
  }

  fn single_dependency_name(&self, descriptor: &AssetDescriptor) -> Option<BundleName> {
    if !descriptor.asset_type().allows_single_bundle() {
      return None;
    }
    let prefixes = &self.rules.prefixes;
    let prefix = match descriptor.category() {
      AssetCategory::Model => &prefixes.model_dep,
      AssetCategory::Scene => &prefixes.scene_dep,
      AssetCategory::UI | AssetCategory::Other => return None,
    };
    Some(BundleName::new(format!("{prefix}{}", descriptor.file_stem())))
  }

  fn shared_dependency_name(&self, descriptor: &AssetDescriptor) -> Option<BundleName> {
    let prefix = self.shared_prefix(descriptor.category(), descriptor.asset_type())?;
    let index = self.bucket_index(descriptor.path())?;
    Some(BundleName::new(format!("{prefix}{index}")))
  }

  /// Prefix of the shared bucket for a category and type, if that pair is grouped at all.
  pub fn shared_prefix(&self, category: AssetCategory, asset_type: AssetType) -> Option<&'a str> {
    let prefixes = &self.rules.prefixes;
    let prefix = match (category, asset_type) {
      (AssetCategory::Model, AssetType::Texture) => &prefixes.model_dep_common_texture,
      (AssetCategory::Scene, AssetType::Texture) => &prefixes.scene_dep_common_texture,
      (AssetCategory::Scene, AssetType::Asset) => &prefixes.scene_dep_common_asset,
      _ => return None,
    };
    Some(prefix.as_str())
  }

  /// Shared bucket a path falls into.
  pub fn bucket_index(&self, path: &str) -> Option<u32> {
    bucket_index(path, self.rules.bucket_count)
  }

  /// Scene material dependency: dedicated above the material size limit, else the shared
  /// scene texture bundle.
  pub fn scene_dep_material_name(&self, file_stem: &str, size: u64) -> BundleName {
    let prefixes = &self.rules.prefixes;
    if size > self.rules.thresholds.material {
      BundleName::new(format!("{}{}", prefixes.scene_dep_material, file_stem.to_lowercase()))
    } else {
      BundleName::new(prefixes.scene_dep_common_texture.clone())
    }
  }

  /// Scene prefab dependency: above the material size limit it is named like a material
  /// dependency, else it goes to the shared scene prefab bundle.
  pub fn scene_dep_prefab_name(&self, file_stem: &str, size: u64) -> BundleName {
    if size > self.rules.thresholds.material {
      self.scene_dep_material_name(file_stem, size)
    } else {
      BundleName::new(self.rules.prefixes.scene_dep_common_prefab.clone())
    }
  }

  /// Check an externally supplied name against the top-level prefixes.
  ///
  /// An empty name counts as valid since it means "no bundle". Empty prefixes in the rules
  /// are ignored rather than accepting every name.
  pub fn is_valid_name(&self, name: &str) -> bool {
    if name.is_empty() {
      return true;
    }
    let prefixes = &self.rules.prefixes;
    [
      &prefixes.model,
      &prefixes.scene,
      &prefixes.ui,
      &prefixes.shader,
    ]
    .into_iter()
    .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
  }

  /// True when the name carries the dependency marker.
  pub fn is_dependency_name(&self, name: &str) -> bool {
    let marker = &self.rules.prefixes.dependency_marker;
    !name.is_empty() && !marker.is_empty() && name.contains(marker.as_str())
  }

  /// Append the dependency marker to a bundle name.
  pub fn with_dependency_suffix(&self, name: &BundleName) -> BundleName {
    BundleName::new(format!(
      "{}{}",
      name.as_str(),
      self.rules.prefixes.dependency_marker
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const MIB: u64 = 1024 * 1024;

  fn rules() -> NamingRules {
    NamingRules::default()
  }

  fn name(resolver: &Resolver<'_>, descriptor: &AssetDescriptor) -> Option<String> {
    resolver.resolve(descriptor).map(BundleName::into_string)
  }

  #[test]
  fn character_model_is_named_after_file() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    let hero = resolver.classify("Assets/ResModel/Character/hero_01.fbx", 1024);
    assert_eq!(hero.asset_type(), AssetType::Prefab);
    assert_eq!(hero.category(), AssetCategory::Model);
    assert_eq!(name(&resolver, &hero).as_deref(), Some("model_role_hero_01"));
  }

  #[test]
  fn big_images_beat_generic_ui() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    for size in [0, 10, 50 * MIB] {
      let splash = resolver.classify("Assets/ResUI/big_image/splash.png", size);
      assert_eq!(name(&resolver, &splash).as_deref(), Some("ui_big_image_splash"));
    }
    let icon = resolver.classify("Assets/ResUI/Bag/icon.png", 10);
    assert_eq!(name(&resolver, &icon).as_deref(), Some("ui_bag"));
  }

  #[test]
  fn shaders_ignore_directories() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    for path in [
      "Assets/ResModel/Character/Toon.shader",
      "Assets/ResUI/Common/ui.shader",
      "Assets/Shaders/Water.SHADER",
    ] {
      let shader = resolver.classify(path, 100);
      assert_eq!(name(&resolver, &shader).as_deref(), Some("shader"));
    }
  }

  #[test]
  fn model_threshold_is_strict() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    let path = "Assets/ResModel/Character/tex/hero_01_d.png";

    let at_limit = resolver.classify(path, MIB).as_dependency();
    assert!(!resolver.needs_single_bundle(&at_limit));
    assert_eq!(name(&resolver, &at_limit).as_deref(), Some("model_dep_common_tex_3"));

    let over_limit = resolver.classify(path, MIB + 1).as_dependency();
    assert!(resolver.needs_single_bundle(&over_limit));
    assert_eq!(name(&resolver, &over_limit).as_deref(), Some("model_dep_hero_01_d"));
  }

  #[test]
  fn scene_dependencies_use_scene_buckets() {
    let rules = rules();
    let resolver = Resolver::new(&rules);

    let grass = resolver.classify("Assets/ResScene/forest/grass.png", 10).as_dependency();
    assert_eq!(name(&resolver, &grass).as_deref(), Some("scene_dep_common_tex_3"));

    let terrain = resolver
      .classify("Assets/ResScene/forest/terrain.asset", 10)
      .as_dependency();
    assert_eq!(name(&resolver, &terrain).as_deref(), Some("scene_dep_common_asset_1"));

    let big = resolver
      .classify("Assets/ResScene/forest/Terrain.asset", 2 * MIB)
      .as_dependency();
    assert_eq!(name(&resolver, &big).as_deref(), Some("scene_dep_terrain"));
  }

  #[test]
  fn ungrouped_pairs_yield_nothing() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    let cases = [
      ("Assets/ResModel/Character/hero.mat", 10),
      ("Assets/ResModel/Character/hero.prefab", 10),
      ("Assets/ResScene/forest/tree.prefab", 10),
      ("Assets/ResScene/forest/lit.shader", 10),
      ("Assets/ResScene/forest/big.mat", 2 * MIB),
      ("Assets/Plugins/noise.png", 10),
    ];
    for (path, size) in cases {
      let dependency = resolver.classify(path, size).as_dependency();
      assert_eq!(name(&resolver, &dependency), None, "{path}");
    }
  }

  #[test]
  fn ui_dependencies_fall_back_to_location_naming() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    let icon = resolver.classify("Assets/ResUI/Bag/icon.png", 10).as_dependency();
    assert_eq!(name(&resolver, &icon).as_deref(), Some("ui_bag"));
  }

  #[test]
  fn unmatched_extensions_use_location_naming() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    let clip = resolver.classify("Assets/ResScene/forest/Wind.ogg", 10);
    assert_eq!(clip.asset_type(), AssetType::Other);
    assert_eq!(name(&resolver, &clip).as_deref(), Some("scene_wind"));

    let dependency = clip.as_dependency();
    assert!(!dependency.is_dependency_candidate());
    assert_eq!(name(&resolver, &dependency).as_deref(), Some("scene_wind"));
  }

  #[test]
  fn empty_and_outside_paths_have_no_name() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    let empty = resolver.classify("", 0);
    assert_eq!(empty.category(), AssetCategory::Other);
    assert_eq!(empty.asset_type(), AssetType::Other);
    assert_eq!(resolver.resolve(&empty), None);
    assert_eq!(resolver.resolve(&empty.clone().as_dependency()), None);

    let plugin = resolver.classify("Assets/Plugins/lib.prefab", 10);
    assert_eq!(resolver.resolve(&plugin), None);
  }

  #[test]
  fn resolution_is_deterministic() {
    let rules = rules();
    let path = "Assets/ResScene/forest/grass.png";
    let first = resolve(&AssetDescriptor::classify(path, 10, &rules).as_dependency(), &rules);
    for _ in 0..10 {
      let again = resolve(&AssetDescriptor::classify(path, 10, &rules).as_dependency(), &rules);
      assert_eq!(again, first);
    }
  }

  #[test]
  fn zero_buckets_disable_shared_names() {
    let mut rules = rules();
    rules.bucket_count = 0;
    let resolver = Resolver::new(&rules);
    let grass = resolver.classify("Assets/ResScene/forest/grass.png", 10).as_dependency();
    assert_eq!(resolver.resolve(&grass), None);
  }

  #[test]
  fn custom_rules_change_names() {
    let mut rules = rules();
    rules.roots.model_character = "Game/Heroes".into();
    rules.roots.model = "Game".into();
    rules.prefixes.model_character = "hero_".into();
    let resolver = Resolver::new(&rules);
    let knight = resolver.classify("Game/Heroes/Knight.prefab", 10);
    assert_eq!(name(&resolver, &knight).as_deref(), Some("hero_knight"));
  }

  #[test]
  fn empty_prefixes_concatenate_without_failing() {
    let mut rules = rules();
    rules.prefixes.scene = String::new();
    let resolver = Resolver::new(&rules);
    let level = resolver.classify("Assets/ResScene/Level1.unity", 10);
    assert_eq!(name(&resolver, &level).as_deref(), Some("level1"));
  }

  #[test]
  fn validity_checks_top_level_prefixes() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    assert!(resolver.is_valid_name(""));
    assert!(resolver.is_valid_name("model_role_hero"));
    assert!(resolver.is_valid_name("scene_dep_common_tex_1"));
    assert!(resolver.is_valid_name("ui_bag"));
    assert!(resolver.is_valid_name("shader"));
    assert!(!resolver.is_valid_name("hero"));
    assert!(!resolver.is_valid_name("Model_role_hero"));
  }

  #[test]
  fn dependency_suffix_round_trips_through_marker_check() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    let base = BundleName::new("model_role_hero");
    assert!(!resolver.is_dependency_name(base.as_str()));

    let suffixed = resolver.with_dependency_suffix(&base);
    assert_eq!(suffixed.as_str(), "model_role_hero_dep_");
    assert!(resolver.is_dependency_name(suffixed.as_str()));
    assert!(resolver.is_dependency_name("scene_dep_common_tex_2"));
    assert!(!resolver.is_dependency_name(""));
  }

  #[test]
  fn scene_material_and_prefab_helpers() {
    let rules = rules();
    let resolver = Resolver::new(&rules);
    let limit = rules.thresholds.material;

    assert_eq!(resolver.scene_dep_material_name("Rock", limit).as_str(), "scene_dep_common_tex_");
    assert_eq!(resolver.scene_dep_material_name("Rock", limit + 1).as_str(), "scene_dep_mat_rock");

    assert_eq!(resolver.scene_dep_prefab_name("Tree", limit).as_str(), "scene_dep_common_prefab_");
    assert_eq!(resolver.scene_dep_prefab_name("Tree", limit + 1).as_str(), "scene_dep_mat_tree");
  }
}
