pub mod buffer;
pub mod builder;
pub mod catalog;
pub mod cli;
pub mod codes;
pub mod data;
pub mod record;
pub mod server;
pub mod similarity;
pub mod tokenizer;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    buffer::ResponseBuffer,
    catalog::Catalog,
    cli::{Cli, Commands, QueryArgs, ServeArgs},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("swapmatch", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => handle_serve(&args),
        Commands::Query(args) => handle_query(&args),
    }
}

fn handle_serve(args: &ServeArgs) -> Result<()> {
    let delimiter = resolve_delimiter(args.delimiter);
    info!(
        "Loading '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(delimiter)
    );
    let catalog = Catalog::load(&args.input, delimiter, args.limit)
        .with_context(|| format!("Loading catalog from {:?}", args.input))?;
    ensure!(
        !catalog.is_empty(),
        "No records loaded from {:?}; refusing to serve",
        args.input
    );
    server::serve(&catalog, args.port)
}

fn handle_query(args: &QueryArgs) -> Result<()> {
    let delimiter = resolve_delimiter(args.delimiter);
    let catalog = Catalog::load(&args.input, delimiter, args.limit)
        .with_context(|| format!("Loading catalog from {:?}", args.input))?;
    let query = builder::swap_from_query(&args.query).context("Parsing query")?;
    let Some(nearest) = similarity::nearest(&query, &catalog) else {
        anyhow::bail!("No records loaded from {:?}; nothing to match", args.input);
    };
    let mut response = ResponseBuffer::new();
    nearest.to_wire(&mut response).context("Serializing response")?;
    println!("{}", response.as_str());
    Ok(())
}

fn resolve_delimiter(provided: Option<u8>) -> char {
    provided.unwrap_or(b',') as char
}

pub(crate) fn printable_delimiter(delimiter: char) -> String {
    match delimiter {
        '\t' => "\\t".to_string(),
        other => other.to_string(),
    }
}
