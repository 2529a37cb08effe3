use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use lancaster::{read_stream, to_json, LancasterError, Reader, StreamConfig};
use lancaster_compiler::compile_schema_file;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "lancaster")]
#[command(about = "Decode streams of consecutive Avro binary values", long_about = None)]
struct Cli {
    /// Log decoder activity to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a binary stream and print one JSON document per value
    Decode {
        /// Avro JSON schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// Binary input file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON file with stream settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Bytes requested per read, overriding the config file
        #[arg(short, long, env = "LANCASTER_BUFFER_SIZE")]
        buffer_size: Option<usize>,

        /// Pretty-print each JSON document
        #[arg(short, long)]
        pretty: bool,
    },

    /// Compile and verify a schema file
    Check {
        /// Avro JSON schema file
        #[arg(short, long)]
        schema: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn main() -> Result<(), LancasterError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Decode {
            schema,
            input,
            config,
            buffer_size,
            pretty,
        } => {
            let mut config = match config {
                Some(path) => StreamConfig::from_file(path)?,
                None => StreamConfig::default(),
            };
            if let Some(buffer_size) = buffer_size {
                config = config.with_buffer_size(*buffer_size);
            }
            debug!(?config, "stream settings");

            let mut reader = Reader::from_schema(Arc::new(compile_schema_file(schema)?));
            let source: Box<dyn Read> = match input {
                Some(path) => Box::new(File::open(path)?),
                None => Box::new(io::stdin().lock()),
            };

            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            let mut count = 0usize;
            for value in read_stream(&mut reader, source, config) {
                let json = to_json(&value?);
                if *pretty {
                    serde_json::to_writer_pretty(&mut out, &json).map_err(io::Error::from)?;
                } else {
                    serde_json::to_writer(&mut out, &json).map_err(io::Error::from)?;
                }
                writeln!(out)?;
                count += 1;
            }
            out.flush()?;
            info!(values = count, "decoded stream");
            Ok(())
        }

        Commands::Check { schema } => {
            let compiled = compile_schema_file(schema)?;
            let root = compiled
                .node(compiled.root())
                .map_or("unknown", |node| node.kind());
            println!(
                "{}: {} nodes, root type {}",
                schema.display(),
                compiled.len(),
                root
            );
            Ok(())
        }
    }
}
