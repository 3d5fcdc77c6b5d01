//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use overmodel_core::ConfigCompiler;
use overmodel_core::model::Rule;
use overmodel_fs::{NormalizedPath, OvermodelPath};

/// overmodel - Render layered configuration models into live files
#[derive(Parser, Debug)]
#[command(name = "overmodel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compile the models and apply rendered templates to their targets
    ///
    /// Targets edited since the last apply are left alone unless named
    /// with --accept.
    ///
    /// Examples:
    ///   overmodel apply -m models/base -m models/site -r env=prod
    ///   overmodel apply -m models --accept etc/app.conf
    ///   overmodel apply -m models --dry-run --json
    Apply(ApplyArgs),

    /// Print the compiled configuration tree
    Compile(CompileArgs),
}

/// Model selection shared by every command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ModelArgs {
    /// Model root directory; later roots override earlier ones
    #[arg(short = 'm', long = "model-dir", value_name = "DIR")]
    pub model_dirs: Vec<PathBuf>,

    /// Select a model variant, e.g. env=prod
    #[arg(short = 'r', long = "rule", value_name = "SEGMENT=VALUE", value_parser = parse_rule)]
    pub rules: Vec<Rule>,
}

impl ModelArgs {
    pub fn compiler(&self) -> ConfigCompiler {
        ConfigCompiler::new(
            self.model_dirs.iter().map(NormalizedPath::new).collect(),
            self.rules.clone(),
        )
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Directory holding templates (files/) and snapshots (.files/)
    #[arg(
        short = 'c',
        long,
        value_name = "DIR",
        env = "OVERMODEL_CONFIG_DIR",
        default_value = OvermodelPath::DefaultConfigDir.as_str()
    )]
    pub config_dir: PathBuf,

    /// Directory the target paths are relative to
    #[arg(short = 't', long, value_name = "DIR", default_value = ".")]
    pub target_root: PathBuf,

    /// Overwrite this target even if it was edited since the last apply
    #[arg(short = 'a', long, value_name = "PATH")]
    pub accept: Vec<String>,

    /// Check and render, but write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CompileArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

fn parse_rule(raw: &str) -> Result<Rule, String> {
    Rule::parse(raw).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_apply_defaults() {
        let cli = Cli::try_parse_from(["overmodel", "apply", "-m", "models"]).unwrap();
        let Some(Commands::Apply(args)) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.model.model_dirs, vec![PathBuf::from("models")]);
        assert!(args.model.rules.is_empty());
        assert_eq!(args.target_root, PathBuf::from("."));
        assert!(!args.dry_run);
    }

    #[test]
    fn parse_repeated_flags() {
        let cli = Cli::try_parse_from([
            "overmodel", "apply", "--model-dir", "a", "--model-dir", "b", "--rule", "env=prod",
            "--rule", "region=eu", "--accept", "etc/app.conf", "--accept", "etc/db.conf",
        ])
        .unwrap();
        let Some(Commands::Apply(args)) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(args.model.model_dirs.len(), 2);
        assert_eq!(
            args.model.rules,
            vec![Rule::new("env", "prod"), Rule::new("region", "eu")]
        );
        assert_eq!(args.accept, vec!["etc/app.conf", "etc/db.conf"]);
    }

    #[test]
    fn parse_rejects_malformed_rule() {
        let result = Cli::try_parse_from(["overmodel", "apply", "-m", "models", "-r", "prod"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_compile_format() {
        let cli = Cli::try_parse_from(["overmodel", "compile", "-m", "m", "--format", "yaml"])
            .unwrap();
        let Some(Commands::Compile(args)) = cli.command else {
            panic!("expected compile");
        };
        assert_eq!(args.format, OutputFormat::Yaml);
    }

    #[test]
    fn parse_verbose_is_global() {
        let cli = Cli::try_parse_from(["overmodel", "compile", "-m", "m", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
