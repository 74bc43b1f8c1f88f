use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swagdoc_core::config::{self, CONFIG_FILE_NAME, DocSettings};
use swagdoc_core::document::Document;
use swagdoc_core::parse;
use swagdoc_core::resolve::RequestContext;
use swagdoc_core::tree::RouteTree;
use swagdoc_core::Documentation;
use swagdoc_markdown::MarkdownNotes;

#[derive(Parser)]
#[command(name = "swagdoc", about = "Swagger 1.1 documentation for mounted APIs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the index document, or one resource document
    Render {
        /// Path to the API definition (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Resource to render instead of the index
        #[arg(short, long)]
        resource: Option<String>,

        /// Scheme of the simulated request
        #[arg(long, default_value = "http")]
        scheme: String,

        /// Host of the simulated request
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Port of the simulated request (defaults to the scheme's port)
        #[arg(long)]
        port: Option<u16>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: RenderFormat,
    },

    /// Validate an API definition against the documentation settings
    Validate {
        /// Path to the API definition
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Serve the documentation over HTTP
    Serve {
        /// Path to the API definition
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:9292")]
        addr: SocketAddr,
    },

    /// Initialize a new swagdoc configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum RenderFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            resource,
            scheme,
            host,
            port,
            format,
        } => {
            let port = port.unwrap_or(if scheme.eq_ignore_ascii_case("https") { 443 } else { 80 });
            let ctx = RequestContext::new(scheme, host, port);
            cmd_render(input, resource, &ctx, format)
        }

        Commands::Validate { input } => cmd_validate(input),

        Commands::Serve { input, addr } => cmd_serve(input, addr),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swagdoc", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<DocSettings>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_tree(path: &Path) -> Result<RouteTree> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let definition = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };

    let tree = definition
        .into_builder()?
        .build()
        .with_context(|| format!("invalid API definition {}", path.display()))?;
    Ok(tree)
}

/// Load the configured API and build the documentation engine for it.
fn load_docs(input: Option<PathBuf>) -> Result<Documentation> {
    let settings = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&settings.input));
    let tree = load_tree(&input)?;

    let config = settings
        .into_config()
        .with_context(|| format!("invalid settings in {CONFIG_FILE_NAME}"))?;
    let docs = Documentation::new(tree, config)
        .with_context(|| format!("cannot document {}", input.display()))?;
    Ok(docs.with_notes_renderer(MarkdownNotes::new()))
}

fn cmd_render(
    input: Option<PathBuf>,
    resource: Option<String>,
    ctx: &RequestContext,
    format: RenderFormat,
) -> Result<()> {
    let docs = load_docs(input)?;
    let assembler = docs.assembler();

    let document: Document = match resource {
        Some(name) => assembler.resource(&name, ctx)?.into(),
        None => assembler.index(ctx).into(),
    };

    match format {
        RenderFormat::Json => println!("{}", serde_json::to_string_pretty(&document)?),
        RenderFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&document)?),
    }
    Ok(())
}

fn cmd_validate(input: Option<PathBuf>) -> Result<()> {
    let docs = load_docs(input)?;
    let ctx = RequestContext::new("http", "localhost", 80);
    let index = docs.assembler().index(&ctx);

    eprintln!("Valid API definition");
    eprintln!("  Mounts: {}", docs.tree().frames().len() - 1);
    eprintln!("  Endpoints: {}", docs.tree().endpoints().len());
    eprintln!("  Documentation root: {}", docs.routes().root());
    eprintln!("  Resources:");
    for api in &index.apis {
        eprintln!("    {}", api.path);
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_serve(input: Option<PathBuf>, addr: SocketAddr) -> Result<()> {
    let docs = Arc::new(load_docs(input)?);

    let runtime = tokio::runtime::Runtime::new().context("failed to start the tokio runtime")?;
    runtime.block_on(swagdoc_server::serve(docs, addr))?;
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
