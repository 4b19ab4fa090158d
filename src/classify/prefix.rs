//! Location based bundle naming: which prefix applies to a path, and what follows it.

use crate::classify::{is_under_root, matches_any_suffix};
use crate::config::NamingRules;
use crate::models::file_stem;

/// Condition a path must satisfy for a [`PrefixRule`] to apply.
#[derive(Debug, Clone, Copy)]
pub enum RuleMatch<'a> {
  /// The path ends with one of the extensions.
  Extension(&'a [String]),
  /// The path lies under the directory root.
  Root(&'a str),
}

/// What is appended to the prefix once a rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationNaming<'a> {
  /// The prefix is the whole bundle name.
  PrefixOnly,
  /// Lowercased file name without extension.
  FileStem,
  /// Lowercased name of the first directory below `root`.
  FirstSubdirectory {
    /// Directory the sub-directory is taken relative to.
    root: &'a str,
  },
}

/// One row of the location table.
#[derive(Debug, Clone, Copy)]
pub struct PrefixRule<'a> {
  /// Condition selecting the row.
  pub matcher: RuleMatch<'a>,
  /// Prefix the bundle name starts with.
  pub prefix: &'a str,
  /// Suffix strategy.
  pub naming: LocationNaming<'a>,
}

impl PrefixRule<'_> {
  fn matches(&self, path: &str) -> bool {
    match self.matcher {
      RuleMatch::Extension(suffixes) => matches_any_suffix(path, suffixes),
      RuleMatch::Root(root) => is_under_root(path, root),
    }
  }

  fn name_for(&self, path: &str) -> Option<String> {
    let tail = match self.naming {
      LocationNaming::PrefixOnly => String::new(),
      LocationNaming::FileStem => file_stem(path).to_lowercase(),
      LocationNaming::FirstSubdirectory { root } => first_subdirectory(path, root)?.to_lowercase(),
    };
    Some(format!("{}{}", self.prefix, tail))
  }
}

/// Ordered location rules; the first row whose condition holds decides the name.
///
/// More specific roots come before the roots that contain them, so the large UI image folder
/// wins over the UI root and model sub-roots win over the model root.
#[derive(Debug, Clone)]
pub struct PrefixTable<'a> {
  rows: Vec<PrefixRule<'a>>,
}

impl<'a> PrefixTable<'a> {
  /// Build the table from the rule set.
  pub fn from_rules(rules: &'a NamingRules) -> Self {
    let prefixes = &rules.prefixes;
    let roots = &rules.roots;
    let by_stem = |root: &'a String, prefix: &'a String| PrefixRule {
      matcher: RuleMatch::Root(root.as_str()),
      prefix: prefix.as_str(),
      naming: LocationNaming::FileStem,
    };

    let rows = vec![
      PrefixRule {
        matcher: RuleMatch::Extension(&rules.extensions.shader),
        prefix: &prefixes.shader,
        naming: LocationNaming::PrefixOnly,
      },
      by_stem(&roots.model_fx, &prefixes.model_fx),
      by_stem(&roots.model_character, &prefixes.model_character),
      by_stem(&roots.model_weapon, &prefixes.model_weapon),
      by_stem(&roots.model_monster, &prefixes.model_monster),
      by_stem(&roots.model_other, &prefixes.model_other),
      by_stem(&roots.model, &prefixes.model),
      by_stem(&roots.scene, &prefixes.scene),
      by_stem(&roots.ui_big_image, &prefixes.ui_big_image),
      PrefixRule {
        matcher: RuleMatch::Root(&roots.ui),
        prefix: &prefixes.ui,
        naming: LocationNaming::FirstSubdirectory { root: &roots.ui },
      },
    ];

    Self { rows }
  }

  /// First row matching `path`.
  pub fn rule_for(&self, path: &str) -> Option<&PrefixRule<'a>> {
    self.rows.iter().find(|row| row.matches(path))
  }

  /// Prefix for `path`, or `None` when the path lies outside every root.
  pub fn prefix_for(&self, path: &str) -> Option<&'a str> {
    self.rule_for(path).map(|row| row.prefix)
  }

  /// Bundle name derived from the path's location.
  pub fn name_for(&self, path: &str) -> Option<String> {
    let row = self.rule_for(path)?;
    tracing::trace!(path, prefix = row.prefix, naming = ?row.naming, "location rule matched");
    row.name_for(path)
  }

  /// Rows in evaluation order.
  pub fn rows(&self) -> &[PrefixRule<'a>] {
    &self.rows
  }
}

/// First path segment below `root`, if the path continues past it.
fn first_subdirectory<'p>(path: &'p str, root: &str) -> Option<&'p str> {
  let rest = path.strip_prefix(root.trim_end_matches('/'))?;
  let rest = rest.strip_prefix('/')?;
  rest.split('/').next().filter(|segment| !segment.is_empty())
}
