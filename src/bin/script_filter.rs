//! Command line front-end for classifying and filtering wiki script lists.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lightweight_script::{
  AuthLevel, PathRuleSet, PluginConfig, RequestDispatcher, RequestType, ScriptBucketFilter,
  ScriptClassification, ScriptDescriptor, ScriptEntry, plan_metaheader,
};

#[derive(Debug, Parser)]
#[command(name = "script-filter", version, about = "Split wiki script lists into admin and user bundles")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Reduce a JSON script list to the bucket selected by the request type.
  Filter {
    /// Raw value of the `type` request parameter.
    #[arg(long = "type")]
    request_type: Option<String>,
    /// JSON array of script paths or descriptors; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// JSON or YAML rule override file.
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Directory holding the plugin configuration file, consulted when `--rules` is absent.
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
  },
  /// Print the bucket of each script path.
  Classify {
    /// Script paths to classify.
    #[arg(required = true)]
    paths: Vec<String>,
    /// JSON or YAML rule override file.
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Directory holding the plugin configuration file, consulted when `--rules` is absent.
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
  },
  /// Plan the page header scripts for a viewer.
  Header {
    /// Permission level of the viewer.
    #[arg(long, default_value_t = 0)]
    auth: u16,
    /// Cache-busting seed for the admin include.
    #[arg(long)]
    seed: String,
    /// Directory holding the plugin configuration file.
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
    /// JSON array of header script descriptors; stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  match cli.command {
    Command::Filter {
      request_type,
      input,
      rules,
      config_dir,
    } => {
      let rules = load_rules(rules.as_deref(), &config_dir)?;
      let request_type = RequestType::from_param(request_type.as_deref());
      let scripts: Vec<ScriptEntry> = read_json(input.as_deref())?;
      let selected =
        RequestDispatcher::new(ScriptBucketFilter::new(&rules)).select(&scripts, request_type);
      info!(
        %request_type,
        total = scripts.len(),
        kept = selected.len(),
        "filtered script list"
      );
      println!("{}", serde_json::to_string_pretty(&selected)?);
    }
    Command::Classify {
      paths,
      rules,
      config_dir,
    } => {
      let rules = load_rules(rules.as_deref(), &config_dir)?;
      let filter = ScriptBucketFilter::new(&rules);
      for path in paths {
        println!("{}\t{}", filter.bucket(&path), path);
      }
    }
    Command::Header {
      auth,
      seed,
      config_dir,
      input,
    } => {
      let config = PluginConfig::discover(&config_dir);
      let scripts: Vec<ScriptDescriptor> = read_json(input.as_deref())?;
      let plan = plan_metaheader(scripts, AuthLevel(auth), &config.header_context(seed));
      println!("{}", serde_json::to_string_pretty(&plan)?);
    }
  }

  Ok(())
}

/// Rules from `--rules` when given, otherwise whatever the plugin configuration in `config_dir` names.
fn load_rules(path: Option<&Path>, config_dir: &Path) -> Result<PathRuleSet> {
  match path {
    Some(path) => {
      debug!(path = %path.display(), "loading rule overrides");
      PathRuleSet::load_required(path)
        .with_context(|| format!("failed to load rules from {}", path.display()))
    }
    None => PluginConfig::discover(config_dir)
      .load_rules(config_dir)
      .with_context(|| format!("failed to load rules configured in {}", config_dir.display())),
  }
}

fn read_json<T: serde::de::DeserializeOwned>(input: Option<&Path>) -> Result<T> {
  let text = match input {
    Some(path) => {
      fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    }
    None => {
      let mut buffer = String::new();
      io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
      buffer
    }
  };
  serde_json::from_str(&text).context("failed to parse script list JSON")
}
