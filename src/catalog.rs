use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result, bail};
use itertools::Itertools;
use log::{debug, info};

use crate::{
    builder::{self, HeaderLayout},
    record::Swap,
    tokenizer::{self, TokenizerLimits},
};

/// Ordered record collection built once from a file and read-only for the
/// rest of the process life.
#[derive(Debug, Default)]
pub struct Catalog {
    swaps: Vec<Swap>,
}

impl Catalog {
    /// The first line is the header row; each subsequent non-blank line
    /// becomes one record. `limit` caps how many records are read when set.
    pub fn load(path: &Path, delimiter: char, limit: Option<usize>) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Opening disclosure file {path:?}"))?;
        let mut lines = BufReader::new(file).lines();
        let header_line = match lines.next() {
            Some(line) => line.with_context(|| format!("Reading header line of {path:?}"))?,
            None => bail!("Disclosure file {path:?} is empty"),
        };
        let limits = TokenizerLimits::default();
        let headers = tokenizer::split_line(&header_line, delimiter, limits)
            .context("Tokenizing header line")?;
        debug!("header row: {}", headers.iter().join(" | "));
        let layout = HeaderLayout::from_headers(&headers);

        let mut swaps = Vec::new();
        for (index, line) in lines.enumerate() {
            if let Some(limit) = limit
                && swaps.len() >= limit
            {
                info!("Record limit of {limit} reached; stopping");
                break;
            }
            let line_number = index + 2;
            let line =
                line.with_context(|| format!("Reading line {line_number} of {path:?}"))?;
            if line.trim().is_empty() {
                continue;
            }
            let fields = tokenizer::split_line(&line, delimiter, limits)
                .with_context(|| format!("Tokenizing line {line_number}"))?;
            let swap = builder::swap_from_fields(&layout, &fields)
                .with_context(|| format!("Building record from line {line_number}"))?;
            swaps.push(swap);
        }
        info!("Loaded {} record(s) from {:?}", swaps.len(), path);
        Ok(Self { swaps })
    }

    pub fn from_records(swaps: Vec<Swap>) -> Self {
        Self { swaps }
    }

    pub fn records(&self) -> &[Swap] {
        &self.swaps
    }

    pub fn len(&self) -> usize {
        self.swaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty()
    }
}
