//! Command-line interface for xsdgraph

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use xsdgraph::config::AppConfig;
#[cfg(feature = "cli")]
use xsdgraph::dot::to_dot;
#[cfg(feature = "cli")]
use xsdgraph::extract::SchemaGraphExtractor;
#[cfg(feature = "cli")]
use xsdgraph::loaders::Loader;
#[cfg(feature = "cli")]
use xsdgraph::logging::init_logging;
#[cfg(feature = "cli")]
use xsdgraph::{Category, Session};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsdgraph")]
#[command(author, version, about = "Render import/export element graphs of XSD schemas", long_about = None)]
struct Cli {
    /// Log level or filter directive (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: compact, pretty, json
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract both graphs from a schema and render them to images
    Render {
        /// Path to the XSD schema file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Directory for the rendered images (defaults to the executable's directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Configuration file (TOML)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Graphviz layout program
        #[arg(long)]
        engine: Option<String>,

        /// Image format passed to Graphviz
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Show the elements and graphs of a schema without rendering
    Inspect {
        /// Path to the XSD schema file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Configuration file (TOML)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the DOT source of one graph
    Dot {
        /// Path to the XSD schema file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Graph to print: import or export
        #[arg(long, default_value = "import")]
        category: String,

        /// Configuration file (TOML)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level.as_deref(), cli.log_format.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Render {
            schema,
            output_dir,
            config,
            engine,
            format,
        } => cmd_render(&schema, output_dir, config.as_deref(), engine, format),
        Commands::Inspect {
            schema,
            config,
            json,
        } => cmd_inspect(&schema, config.as_deref(), json),
        Commands::Dot {
            schema,
            category,
            config,
        } => cmd_dot(&schema, &category, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn load_config(path: Option<&Path>) -> xsdgraph::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::default()),
    }
}

#[cfg(feature = "cli")]
fn cmd_render(
    schema: &Path,
    output_dir: Option<PathBuf>,
    config_path: Option<&Path>,
    engine: Option<String>,
    format: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;

    // Command-line flags win over the configuration file
    if let Some(dir) = output_dir {
        config.render.output_dir = Some(dir);
    }
    if let Some(engine) = engine {
        config.render.engine = engine;
    }
    if let Some(format) = format {
        config.render.format = format;
    }

    let mut session = Session::from_config(&config)?;
    let opened = session.open(schema)?;

    for image in &opened.images {
        println!("{}: {}", image.label(), image.path.display());
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_inspect(
    schema: &Path,
    config_path: Option<&Path>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let document = Loader::new()
        .with_limits(config.limits)
        .load_document(schema)?;

    let root = document.root();
    let element_count = root.descendants().count();
    let named_count = root.descendants().filter(|e| e.name().is_some()).count();
    let graphs = SchemaGraphExtractor::new().extract(root);

    if json_output {
        let output = serde_json::json!({
            "source": schema.display().to_string(),
            "statistics": {
                "elements": element_count,
                "namedElements": named_count,
            },
            "graphs": graphs.to_json(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("xsdgraph v{}", xsdgraph::VERSION);
    println!();
    println!("Schema: {}", schema.display());
    println!("  Elements: {}", element_count);
    println!("  Named Elements: {}", named_count);

    for graph in graphs.iter() {
        println!();
        println!("=== {} Graph ===", graph.category().label());
        println!("  Nodes: {}", graph.node_count());
        println!("  Edges: {}", graph.edge_count());
        for node in graph.nodes() {
            println!("  {}", node);
        }
        for (from, to) in graph.edges() {
            println!("  {} -> {}", from, to);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_dot(
    schema: &Path,
    category: &str,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let category: Category = category.parse()?;
    let config = load_config(config_path)?;
    let document = Loader::new()
        .with_limits(config.limits)
        .load_document(schema)?;

    let graphs = SchemaGraphExtractor::new().extract(document.root());
    print!("{}", to_dot(graphs.get(category), &config.render));

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
