// SPDX-License-Identifier: PMPL-1.0-or-later
//! Markupcheck CLI - HTML accessibility and markup checks

use clap::{Args, Parser, Subcommand, ValueEnum};
use markupcheck::config::{load_config, Config};
use markupcheck::report::{generate_report, OutputFormat};
use markupcheck::{rules, scanner, Category, Checker};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Accessibility and markup checks for HTML documents
#[derive(Parser)]
#[command(name = "markupcheck")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every HTML file under a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        #[command(flatten)]
        opts: CheckOpts,
    },

    /// Check a single HTML file
    Analyze {
        /// File to analyze
        file: PathBuf,

        #[command(flatten)]
        opts: CheckOpts,
    },

    /// List the rule catalog
    Rules {
        /// Only list rules of these categories
        #[arg(long, value_enum)]
        category: Vec<CategoryArg>,
    },
}

#[derive(Args)]
struct CheckOpts {
    /// Categories to run (all when omitted)
    #[arg(long, value_enum)]
    category: Vec<CategoryArg>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: FormatArg,

    /// Configuration file (TOML or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Stop each file's run at the first failing rule
    #[arg(long)]
    fail_fast: bool,

    /// Reject documents the parser had to repair
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

impl CheckOpts {
    /// Config file settings, overridden by command-line flags
    fn checker(&self) -> anyhow::Result<Checker> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if !self.category.is_empty() {
            config.categories = self.category.iter().map(|c| (*c).into()).collect();
        }
        config.fail_fast |= self.fail_fast;
        config.strict_parsing |= self.strict;

        Ok(Checker::new(config))
    }
}

/// Rule category CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    /// Structural errors
    Errors,
    /// Usability warnings
    Warnings,
    /// Optional improvements
    Advice,
    /// Removed elements and attributes
    Obsolete,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Errors => Category::Errors,
            CategoryArg::Warnings => Category::Warnings,
            CategoryArg::Advice => Category::Advice,
            CategoryArg::Obsolete => Category::Obsolete,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("markupcheck=debug")
    } else {
        EnvFilter::new("markupcheck=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { dir, opts } => {
            init_logging(opts.verbose);
            let violations = scanner::scan_directory(&dir, &opts.checker()?)?;
            let report = generate_report(&violations, opts.format.into());
            write_output(&report, opts.output.as_deref())?;

            if violations.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Analyze { file, opts } => {
            init_logging(opts.verbose);
            let violations = scanner::scan_file(&file, &opts.checker()?)?;
            let report = generate_report(&violations, opts.format.into());
            write_output(&report, opts.output.as_deref())?;

            if violations.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Rules { category } => {
            let selected: Vec<Category> = if category.is_empty() {
                Category::ALL.to_vec()
            } else {
                category.into_iter().map(Category::from).collect()
            };

            for rule in rules::all().filter(|r| selected.contains(&r.category)) {
                println!("{:<30} {:<9} {}", rule.id, rule.category.to_string(), rule.description);
                println!("    {}", rule.selector);
            }
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&std::path::Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
