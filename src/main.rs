//! Command line front end for the bundle naming rules.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bundle_namer::plan::load_plan_inputs;
use bundle_namer::{BundlePlan, NamingRules, PlanOptions, Resolver};

#[derive(Debug, Parser)]
#[command(name = "abnamer", version, about = "Resolve asset bundle names from asset paths")]
struct Cli {
  /// Rules file (.json, .yaml or .yml); defaults to abnamer.config.* in the working directory.
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Print the bundle name for one asset.
  Resolve {
    /// Asset path, e.g. Assets/ResModel/Character/hero_01.fbx.
    path: String,
    /// File size in bytes.
    #[arg(long, default_value_t = 0)]
    size: u64,
    /// Treat the asset as a dependency of another asset.
    #[arg(long)]
    dependency: bool,
    /// Append the dependency marker to the resolved name.
    #[arg(long)]
    suffix: bool,
  },
  /// Check that a bundle name starts with a known top-level prefix.
  Validate {
    /// Bundle name to check.
    name: String,
  },
  /// Group a JSON list of assets into bundles.
  Plan {
    /// JSON array of { path, size, role } records.
    input: PathBuf,
    /// Append the dependency marker to names of dependency-role assets.
    #[arg(long)]
    suffix_dependencies: bool,
  },
  /// Print the effective rules as JSON.
  Rules,
}

fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "abnamer=info,bundle_namer=info".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  match run(Cli::parse()) {
    Ok(code) => code,
    Err(err) => {
      eprintln!("Error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<ExitCode> {
  let rules = load_rules(cli.config)?;
  let resolver = Resolver::new(&rules);

  match cli.command {
    Command::Resolve {
      path,
      size,
      dependency,
      suffix,
    } => {
      let mut descriptor = resolver.classify(&path, size);
      if dependency {
        descriptor = descriptor.as_dependency();
      }
      match resolver.resolve(&descriptor) {
        Some(name) => {
          let name = if suffix {
            resolver.with_dependency_suffix(&name)
          } else {
            name
          };
          println!("{name}");
          Ok(ExitCode::SUCCESS)
        }
        None => {
          tracing::info!(path = descriptor.path(), "asset is not bundled by any rule");
          Ok(ExitCode::from(2))
        }
      }
    }
    Command::Validate { name } => {
      if resolver.is_valid_name(&name) {
        println!("valid");
        Ok(ExitCode::SUCCESS)
      } else {
        println!("invalid");
        Ok(ExitCode::FAILURE)
      }
    }
    Command::Plan {
      input,
      suffix_dependencies,
    } => {
      let inputs = load_plan_inputs(&input)?;
      let plan = BundlePlan::build(&resolver, inputs, PlanOptions { suffix_dependencies });
      let json = serde_json::to_string_pretty(&plan).context("failed to serialise bundle plan")?;
      println!("{json}");
      Ok(ExitCode::SUCCESS)
    }
    Command::Rules => {
      let json = rules
        .to_json_pretty()
        .context("failed to serialise naming rules")?;
      println!("{json}");
      Ok(ExitCode::SUCCESS)
    }
  }
}

fn load_rules(config: Option<PathBuf>) -> Result<NamingRules> {
  match config {
    Some(path) => NamingRules::from_path(&path)
      .with_context(|| format!("failed to load rules from {}", path.display())),
    None => {
      let cwd = std::env::current_dir().context("failed to read working directory")?;
      NamingRules::discover(&cwd).context("failed to load rules")
    }
  }
}
