//! MockServer type generator CLI
//!
//! Compiles a directory of JSON Schema fragments into TypeScript declarations.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mockserver_typegen::{EmitOptions, Pipeline, QuoteStyle, DEFAULT_NAMESPACE};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "mockserver-typegen")]
#[command(about = "Compile MockServer JSON Schema fragments into TypeScript declarations")]
#[command(version)]
struct Cli {
    /// Directory holding one schema fragment per file
    src_path: PathBuf,

    /// File that receives the generated declarations (overwritten)
    new_file_path: PathBuf,

    /// Directory both paths are relative to
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Namespace wrapping the emitted declarations
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Quote style for string literals and quoted property names
    #[arg(long, value_enum, default_value_t = QuoteStyle::Single)]
    quote_style: QuoteStyle,

    /// Omit the separator after the last member of each object type
    #[arg(long)]
    no_trailing_separator: bool,

    /// Only emit definitions reachable from an unreferenced definition
    #[arg(long)]
    prune_unreachable: bool,

    /// Omit the "generated file" banner comment
    #[arg(long)]
    no_banner: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, default_value = "info")]
    log_level: Level,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: cannot initialize logging: {}", e);
        return ExitCode::from(2);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

async fn run(cli: Cli) -> Result<(), u8> {
    let src = cli.base_dir.join(&cli.src_path);
    let dest = cli.base_dir.join(&cli.new_file_path);

    let options = EmitOptions::default()
        .quote_style(cli.quote_style)
        .trailing_separator(!cli.no_trailing_separator)
        .retain_unreachable(!cli.prune_unreachable)
        .banner(!cli.no_banner);
    let pipeline = Pipeline::new(cli.namespace).with_emit_options(options);

    let summary = pipeline.run(&src, &dest).await.map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    info!(
        definitions = summary.definitions,
        declarations = summary.declarations.len(),
        output = %summary.output.display(),
        "Done"
    );
    Ok(())
}
