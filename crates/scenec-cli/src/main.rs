//! scenec command-line front end.
//!
//! Usage:
//!   scenec compile <input.json> [-o DIR] [--name N] [--flavor html|jsx] [--prefix P] [--root ID]
//!   scenec file-key <url>

mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use scenec::{CompileOptions, CompiledOutput, MarkupFlavor, Severity};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "scenec", version)]
#[command(about = "Compile design-document scene graphs into markup and CSS")]
struct Cli {
    /// Log compile stages at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a JSON design document
    Compile(CompileArgs),
    /// Print the file key (and node id) of a design-file URL
    FileKey {
        url: String,
    },
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Path to the JSON document
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Component name; defaults to the input file stem
    #[arg(long)]
    name: Option<String>,

    /// Markup flavor (html or jsx)
    #[arg(long)]
    flavor: Option<MarkupFlavor>,

    /// Class name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Compile only the subtree rooted at this node id
    #[arg(long)]
    root: Option<String>,

    /// Leave hidden nodes out of the markup
    #[arg(long)]
    omit_hidden: bool,

    /// Add data-node-id attributes
    #[arg(long)]
    node_ids: bool,

    /// Also write the compiled output as JSON
    #[arg(long)]
    json: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Compile(args) => run_compile(args),
        Command::FileKey { url } => run_file_key(&url),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Merge the config file and flags; flags win.
fn resolve_options(args: &CompileArgs) -> Result<(CompileOptions, PathBuf)> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let has_name = config.has_component_name();
    let out_dir = args
        .out_dir
        .clone()
        .or(config.out_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut options = config.options;

    if let Some(name) = &args.name {
        options.component_name = name.clone();
    } else if !has_name {
        if let Some(stem) = args.input.file_stem() {
            options.component_name = stem.to_string_lossy().into_owned();
        }
    }
    if let Some(flavor) = args.flavor {
        options.flavor = flavor;
    }
    if let Some(prefix) = &args.prefix {
        options.class_prefix = Some(prefix.clone());
    }
    if let Some(root) = &args.root {
        options.root_node = Some(root.clone());
    }
    if args.omit_hidden {
        options.include_hidden = false;
    }
    if args.node_ids {
        options.emit_node_ids = true;
    }
    Ok((options, out_dir))
}

fn run_compile(args: CompileArgs) -> Result<()> {
    let (options, out_dir) = resolve_options(&args)?;
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let output = match scenec::compile_with_options(&raw, &options) {
        Ok(output) => output,
        Err(err) => {
            for diagnostic in err.validation_diagnostics().unwrap_or_default() {
                eprintln!("{}", diagnostic);
            }
            return Err(err).with_context(|| format!("failed to compile {}", args.input.display()));
        }
    };

    for diagnostic in output.diagnostics.iter() {
        eprintln!("{}", diagnostic);
    }
    let warnings = output.diagnostics.with_severity(Severity::Warning).count();
    if warnings > 0 {
        warn!(warnings, "compiled with approximations");
    }

    write_outputs(&output, &out_dir, args.json)
}

fn write_outputs(output: &CompiledOutput, out_dir: &Path, json: bool) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut files = vec![
        (output.module_file_name(), output.render_module()?),
        (output.stylesheet_file_name(), output.to_css()),
    ];
    if json {
        files.push((
            format!("{}.json", output.component_name()),
            output.to_json()?,
        ));
    }

    for (name, contents) in files {
        let path = out_dir.join(&name);
        fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn run_file_key(url: &str) -> Result<()> {
    let key = scenec::extract_file_key(url)
        .with_context(|| format!("no design file key in `{}`", url))?;
    match scenec::extract_node_id(url) {
        Some(node_id) => println!("{} {}", key, node_id),
        None => println!("{}", key),
    }
    Ok(())
}
