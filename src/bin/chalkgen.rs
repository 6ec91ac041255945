//! chalkgen - generates the C++ colour bindings from the colour table.
//!
//! Usage:
//!   chalkgen declarations [--output <path>] [--async] [--stdout]
//!   chalkgen definitions [--output <path>] [--colors red,green]

use std::path::PathBuf;

use anyhow::Context;
use chainwrap::chalk::{Color, Generator, SourceKind};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chalkgen")]
#[command(about = "Generates C++ terminal colour bindings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one function declaration per colour
    Declarations(GenerateArgs),
    /// Write one function definition per colour
    Definitions(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// File to write the generated source to
    #[arg(short, long, default_value = "chalk.inc")]
    output: PathBuf,

    /// Only generate these colours, in this order
    #[arg(short, long, value_delimiter = ',')]
    colors: Vec<Color>,

    /// Run the generation through the asynchronous pipeline
    #[arg(long = "async")]
    asynchronous: bool,

    /// Print the source instead of writing it
    #[arg(long)]
    stdout: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Declarations(args) => run(SourceKind::Declarations, args).await,
        Commands::Definitions(args) => run(SourceKind::Definitions, args).await,
    }
}

async fn run(kind: SourceKind, args: GenerateArgs) -> anyhow::Result<()> {
    let mut generator = Generator::new(kind, args.output);
    if !args.colors.is_empty() {
        generator = generator.with_colors(args.colors);
    }

    if args.stdout {
        println!("{}", generator.render());
        return Ok(());
    }

    let path = generator.output().display().to_string();
    if args.asynchronous {
        generator
            .generate_async()
            .await
            .with_context(|| format!("generating {path}"))?;
    } else {
        generator
            .generate()
            .with_context(|| format!("generating {path}"))?;
    }
    Ok(())
}
