//! convcat CLI entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use convcat_foundation::{EnforcementPolicy, NameKind, Result};
use convcat_runtime::commands::{describe_policy, entities_to_csv, normalize_names, run_entities};
use convcat_runtime::{RunConfig, logging};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "convcat")]
#[command(version)]
#[command(about = "Compile entity catalogs for a conversational platform, enforcing its naming rules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); later files override earlier ones
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    config: Vec<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level or filter (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert entity catalog files into entities JSON
    Entities(EntitiesArgs),

    /// Convert entities JSON back into entity catalog files
    EntitiesToCsv {
        /// Entities JSON file
        input: PathBuf,

        /// Directory for the catalog files
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: PathBuf,
    },

    /// Print the canonical form of names
    Name(NameArgs),
}

/// Naming flags shared by every command that normalizes names.
#[derive(Args)]
struct PolicyArgs {
    /// Name policy: hard, soft, or soft_verbose
    #[arg(long, value_name = "POLICY")]
    policy: Option<String>,

    /// Soft name policy: correct names without error
    #[arg(short, long)]
    soft: bool,
}

#[derive(Args)]
struct EntitiesArgs {
    /// Directory or file with entity catalogs (repeatable)
    #[arg(short = 'e', long = "entities", value_name = "PATH")]
    entities: Vec<PathBuf>,

    /// Directory or file with generated entity catalogs (repeatable)
    #[arg(short = 'g', long = "generated-entities", value_name = "PATH")]
    generated_entities: Vec<PathBuf>,

    /// Directory where outputs are stored
    #[arg(short = 'd', long = "outputs-directory", value_name = "DIR")]
    outputs_directory: Option<PathBuf>,

    /// File name of the entities JSON (stdout if omitted)
    #[arg(short = 'o', long = "outputs-entities", value_name = "FILE")]
    outputs_entities: Option<PathBuf>,

    /// Regex and replacement for entity names, e.g. '-' '_' or '$special' '\L'
    #[arg(
        short = 'n',
        long = "entities-name-check",
        num_args = 2,
        value_names = ["PATTERN", "REPLACEMENT"],
        allow_hyphen_values = true
    )]
    name_check: Vec<String>,

    /// Enable fuzzy matching for every entity
    #[arg(long)]
    fuzzy: bool,

    /// File-name pattern catalog files must match (repeatable)
    #[arg(long = "pattern", value_name = "GLOB")]
    patterns: Vec<String>,

    #[command(flatten)]
    policy: PolicyArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Entity,
    Intent,
    Code,
}

impl From<KindArg> for NameKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Entity => NameKind::Entity,
            KindArg::Intent => NameKind::Intent,
            KindArg::Code => NameKind::Code,
        }
    }
}

#[derive(Args)]
struct NameArgs {
    /// Kind of name; intent subnames are joined into one name
    #[arg(short, long, value_enum, default_value = "entity")]
    kind: KindArg,

    /// Regex and replacement applied after the platform rule
    #[arg(
        short = 'n',
        long = "name-check",
        num_args = 2,
        value_names = ["PATTERN", "REPLACEMENT"],
        allow_hyphen_values = true
    )]
    name_check: Vec<String>,

    #[command(flatten)]
    policy: PolicyArgs,

    /// Names to normalize
    #[arg(required = true)]
    names: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log.as_deref(), cli.verbose) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = RunConfig::load(&cli.config)?;

    match cli.command {
        Commands::Entities(args) => {
            info!("STARTING: entities");
            let config = apply_entities_args(config, args);
            log_policy(config.policy()?);
            let catalog = run_entities(&config, &mut io::stdout().lock())?;
            info!(entities = catalog.len(), "FINISHING: entities");
        }
        Commands::EntitiesToCsv { input, output_dir } => {
            entities_to_csv(&input, &output_dir)?;
        }
        Commands::Name(args) => {
            let kind = NameKind::from(args.kind);
            let mut config = apply_policy_args(config, &args.policy);
            let rules = pairs(&args.name_check);
            if !rules.is_empty() {
                match kind {
                    NameKind::Intent => config.intent_rules = rules,
                    _ => config.entity_rules = rules,
                }
            }
            for name in normalize_names(&config.naming()?, kind, &args.names)? {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn log_policy(policy: EnforcementPolicy) {
    info!("Name policy '{policy}': {}", describe_policy(policy));
}

fn apply_policy_args(mut config: RunConfig, args: &PolicyArgs) -> RunConfig {
    if let Some(policy) = &args.policy {
        config.name_policy = Some(policy.clone());
    } else if args.soft {
        config.name_policy = Some(EnforcementPolicy::Soft.to_string());
    }
    config
}

fn apply_entities_args(config: RunConfig, args: EntitiesArgs) -> RunConfig {
    let mut config = apply_policy_args(config, &args.policy);

    if !args.entities.is_empty() {
        config.entities = Some(args.entities);
    }
    if !args.generated_entities.is_empty() {
        config.generated_entities = args.generated_entities;
    }
    if args.outputs_directory.is_some() {
        config.outputs_directory = args.outputs_directory;
    }
    if args.outputs_entities.is_some() {
        config.outputs_entities = args.outputs_entities;
    }
    let rules = pairs(&args.name_check);
    if !rules.is_empty() {
        config.entity_rules = rules;
    }
    if args.fuzzy {
        config.fuzzy_match = true;
    }
    if !args.patterns.is_empty() {
        config.patterns = args.patterns;
    }
    config
}

fn pairs(values: &[String]) -> Vec<(String, String)> {
    values
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}
