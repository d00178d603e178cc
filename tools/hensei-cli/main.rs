use clap::{Parser, ValueEnum};
use hensei::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI-side mirror of the built-in dialects for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DialectCli {
    Python,
    Typescript,
}

impl From<DialectCli> for DialectChoice {
    fn from(value: DialectCli) -> Self {
        match value {
            DialectCli::Python => DialectChoice::Python,
            DialectCli::Typescript => DialectChoice::TypeScript,
        }
    }
}

/// Compiles a visual-editor workflow export into source code
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the editor snapshot JSON file
    snapshot_path: String,

    /// Optional path to a compiler options JSON file
    options_path: Option<String>,

    /// The target language
    #[arg(short, long, value_enum, default_value_t = DialectCli::Python)]
    dialect: DialectCli,

    /// Write the generated source here instead of stdout. A path without an
    /// extension gets the dialect's one
    #[arg(short, long)]
    output: Option<String>,

    /// Print the output format, dependency order and timings to stderr
    #[arg(short, long)]
    explain: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hensei=info,warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Loading ---
    let load_start = Instant::now();
    let snapshot = EditorSnapshot::from_file(&cli.snapshot_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load snapshot '{}': {}",
            cli.snapshot_path, e
        ))
    });
    let options = match &cli.options_path {
        Some(path) => CompilerOptions::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load options '{}': {}", path, e))
        }),
        None => CompilerOptions::default(),
    };
    let workflow = snapshot
        .into_workflow()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert snapshot: {}", e)));
    let load_duration = load_start.elapsed();
    debug!(
        nodes = workflow.nodes.len(),
        edges = workflow.edges.len(),
        "Snapshot loaded"
    );

    // --- 2. Compilation ---
    let dialect = DialectChoice::from(cli.dialect);
    let compile_start = Instant::now();
    let compiler = Compiler::builder().dialect(dialect).options(options).build();
    let compiled = compiler.compile(&workflow);
    let compile_duration = compile_start.elapsed();

    // --- 3. Output ---
    match &cli.output {
        Some(path) => {
            let mut path = Path::new(path).to_path_buf();
            if path.extension().is_none() {
                path.set_extension(compiler.dialect().file_extension());
            }
            fs::write(&path, &compiled.source).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path.display(), e))
            });
            info!(path = %path.display(), dialect = %dialect, "Generated source written");
        }
        None => print!("{}", compiled.source),
    }

    if cli.explain {
        let total_duration = total_start.elapsed();
        eprintln!("\n--- Compilation Summary ---");
        eprintln!("Dialect:          {}", compiled.dialect);
        eprintln!("Output Format:    {}", compiled.format);
        eprintln!("Nodes:            {}", workflow.nodes.len());
        eprintln!("Edges:            {}", workflow.edges.len());
        eprintln!("Emitted Nodes:    {}", compiled.emitted_nodes);
        eprintln!("Dependency Order: {}", compiled.order.join(" -> "));
        eprintln!("\n--- Performance Summary ---");
        eprintln!("File Loading:     {:?}", load_duration);
        eprintln!("Compilation:      {:?}", compile_duration);
        eprintln!("-----------------------------");
        eprintln!("Total Execution:  {:?}", total_duration);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
