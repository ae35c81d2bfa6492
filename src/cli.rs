use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Nearest-match search over swap trade disclosures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a disclosure file and serve nearest-match queries over TCP
    Serve(ServeArgs),
    /// Load a disclosure file and answer a single query from the command line
    Query(QueryArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Input disclosure file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// TCP port to listen on
    #[arg(short, long, default_value_t = 9999)]
    pub port: u16,
    /// Limit number of records loaded from the input file
    #[arg(long)]
    pub limit: Option<usize>,
    /// Field delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Input disclosure file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Query message of the form `Header1:Value1;Header2:Value2;`
    #[arg(short, long)]
    pub query: String,
    /// Limit number of records loaded from the input file
    #[arg(long)]
    pub limit: Option<usize>,
    /// Field delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_names_resolve_to_bytes() {
        assert_eq!(parse_delimiter("comma"), Ok(b','));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("|"), Ok(b'|'));
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
