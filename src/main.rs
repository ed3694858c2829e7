use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use esm2cjs::files::{transform_file, transform_tree};
use esm2cjs::options::{config, OptionsFile};
use esm2cjs::{transform, TransformOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "esm2cjs")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Rewrite ES module import/export statements to CommonJS", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a file, a directory, or stdin (`-`)
    Transform(TransformArgs),
    /// Show version information
    Version,
}

#[derive(Args)]
struct TransformArgs {
    /// Source file, directory, or `-` for stdin
    input: PathBuf,

    /// Output file or directory (defaults to stdout for single inputs)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pattern matched against every module path
    #[arg(long = "match", value_name = "PATTERN")]
    match_pattern: Option<String>,

    /// Replacement for the matched part of a path ($1, $& ... allowed)
    #[arg(long, value_name = "TEMPLATE")]
    replace_by: Option<String>,

    /// Pattern flags: g, i, m, s
    #[arg(long)]
    flags: Option<String>,

    /// Match the pattern as a literal string
    #[arg(long)]
    escape_regexp: bool,

    /// JSON options file; command line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl TransformArgs {
    fn options(&self) -> Result<TransformOptions> {
        let mut file = match &self.config {
            Some(path) => config::parse_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => OptionsFile::default(),
        };
        if self.match_pattern.is_some() {
            file.match_pattern = self.match_pattern.clone();
        }
        if self.replace_by.is_some() {
            file.replace_by = self.replace_by.clone();
        }
        if self.flags.is_some() {
            file.flags = self.flags.clone();
        }
        file.escape_regexp |= self.escape_regexp;
        Ok(file.into_options()?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(Commands::Transform(args)) => run_transform(args),
        Some(Commands::Version) => {
            println!("esm2cjs v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("esm2cjs - ES module to CommonJS rewriter");
            println!("Run 'esm2cjs transform <FILE>' to rewrite a file");
            println!("Run 'esm2cjs --help' for more information");
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "esm2cjs=debug" } else { "esm2cjs=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_transform(args: &TransformArgs) -> Result<()> {
    let options = args.options()?;

    if args.input.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return emit(&transform(&source, &options), args.output.as_deref());
    }

    if args.input.is_dir() {
        let Some(output) = &args.output else {
            bail!("transforming a directory requires --output <DIR>");
        };
        let report = transform_tree(&args.input, output, &options)
            .with_context(|| format!("failed to transform {}", args.input.display()))?;
        println!(
            "Transformed {} file(s) into {} ({} imports, {} exports)",
            report.transformed.len(),
            output.display(),
            report.totals.imports,
            report.totals.exports,
        );
        for (path, reason) in &report.failed {
            println!("  failed: {}: {}", path.display(), reason);
        }
        if !report.failed.is_empty() {
            bail!("{} file(s) failed", report.failed.len());
        }
        return Ok(());
    }

    let output = transform_file(&args.input, &options)
        .with_context(|| format!("failed to transform {}", args.input.display()))?;
    emit(&output, args.output.as_deref())
}

fn emit(output: &str, target: Option<&Path>) -> Result<()> {
    match target {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, output).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            io::stdout().write_all(output.as_bytes())?;
            Ok(())
        }
    }
}
