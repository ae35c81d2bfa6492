//! Builds disclosure records from tokenized file lines and from protocol
//! query messages. Both paths resolve headers through the same table and
//! assign values through the same routine.
//!
//! The duplicated leg columns (two floating-rate index columns, two
//! payment-frequency columns) are handled in two phases: the scan only
//! captures raw leg values plus which physical slot supplied the reference
//! rate, and a resolution step decides which leg is floating once the whole
//! line is known.

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};

use crate::{
    codes::{
        ActionType, BlockTradeFlag, Currency, PaymentFrequency, ReferenceRate, TransactionType,
        VenueType,
    },
    data::{self, DateError},
    record::{Column, Swap, resolve_header},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegSlot {
    Leg1,
    Leg2,
}

// Raw leg captures accumulated during the scan phase.
#[derive(Debug, Default)]
struct LegCapture {
    ref_rate: Option<(LegSlot, ReferenceRate)>,
    freq_leg1: Option<String>,
    freq_leg2: Option<String>,
}

impl LegCapture {
    // The leg whose index column carried the reference rate floats, the
    // other leg pays fixed. With no reference-rate capture, leg 2 is assumed
    // floating.
    fn resolve(self, swap: &mut Swap) {
        let (floating, fixed) = match self.ref_rate {
            Some((LegSlot::Leg1, _)) => (self.freq_leg1, self.freq_leg2),
            _ => (self.freq_leg2, self.freq_leg1),
        };
        if let Some((_, rate)) = self.ref_rate {
            swap.ref_rate = rate;
        }
        if let Some(raw) = floating {
            swap.float_pay_freq = PaymentFrequency::classify(&raw);
        }
        if let Some(raw) = fixed {
            swap.fixed_pay_freq = PaymentFrequency::classify(&raw);
        }
    }
}

/// Positional attribute layout, resolved once per file from its header row.
#[derive(Debug, Clone)]
pub struct HeaderLayout {
    columns: Vec<Option<Column>>,
}

impl HeaderLayout {
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let columns = headers
            .iter()
            .map(|header| {
                let resolved = resolve_header(header.as_ref());
                if resolved.is_none() {
                    debug!("header '{}' is not recognized; skipping", header.as_ref());
                }
                resolved
            })
            .collect();
        Self { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Build a record from one data line's fields, positionally matched against
/// the resolved header layout. Empty fields are skipped, so a line with
/// fewer populated fields than headers still produces a record with the
/// missing attributes at their sentinel defaults.
pub fn swap_from_fields(layout: &HeaderLayout, fields: &[String]) -> Result<Swap> {
    let mut swap = Swap::default();
    let mut legs = LegCapture::default();
    for (column, raw) in layout.columns.iter().zip(fields) {
        let Some(column) = column else { continue };
        if raw.is_empty() {
            continue;
        }
        apply(&mut swap, &mut legs, *column, raw)?;
    }
    legs.resolve(&mut swap);
    Ok(swap)
}

/// Parse one `Header:Value;...` query message into a partial record. Pairs
/// with no `:` separator, unknown headers, and empty values are skipped.
pub fn swap_from_query(message: &str) -> Result<Swap> {
    let mut swap = Swap::default();
    let mut legs = LegCapture::default();
    for pair in message.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let Some((header, value)) = pair.split_once(':') else {
            warn!("query pair '{pair}' has no ':' separator; skipping");
            continue;
        };
        let Some(column) = resolve_header(header) else {
            debug!("query header '{header}' is not recognized; skipping");
            continue;
        };
        if value.is_empty() {
            continue;
        }
        apply(&mut swap, &mut legs, column, value)?;
    }
    legs.resolve(&mut swap);
    Ok(swap)
}

fn apply(swap: &mut Swap, legs: &mut LegCapture, column: Column, raw: &str) -> Result<()> {
    match column {
        Column::Id => swap.id = data::parse_integer_or_zero(raw),
        Column::StartDate => swap.start_date = date_field(raw, START_DATE_WHAT)?,
        Column::EndDate => swap.end_date = date_field(raw, END_DATE_WHAT)?,
        Column::TradeTime => swap.trade_time = timestamp_field(raw)?,
        Column::FixedRate => swap.fixed_rate = data::parse_real_or_zero(raw),
        Column::Notional => swap.notional = data::parse_real_or_zero(raw),
        Column::Action => swap.action = ActionType::classify(raw),
        Column::Transaction => swap.transaction = TransactionType::classify(raw),
        Column::BlockTrade => swap.block_trade = BlockTradeFlag::classify(raw),
        Column::Venue => swap.venue = VenueType::classify(raw),
        Column::Currency => swap.currency = Currency::classify(raw),
        Column::RefRateLeg1 => {
            legs.ref_rate = Some((LegSlot::Leg1, ReferenceRate::classify(raw)));
        }
        Column::RefRateLeg2 => {
            legs.ref_rate = Some((LegSlot::Leg2, ReferenceRate::classify(raw)));
        }
        Column::PayFreqLeg1 => legs.freq_leg1 = Some(raw.to_string()),
        Column::PayFreqLeg2 => legs.freq_leg2 = Some(raw.to_string()),
        Column::RefRate => swap.ref_rate = ReferenceRate::classify(raw),
        Column::FloatPayFreq => swap.float_pay_freq = PaymentFrequency::classify(raw),
        Column::FixedPayFreq => swap.fixed_pay_freq = PaymentFrequency::classify(raw),
    }
    Ok(())
}

const START_DATE_WHAT: &str = "effective date";
const END_DATE_WHAT: &str = "expiration date";

fn date_field(raw: &str, what: &str) -> Result<Option<chrono::NaiveDate>> {
    match data::parse_date(raw) {
        Ok(date) => Ok(Some(date)),
        Err(err @ DateError::BadWidth { .. }) => {
            Err(anyhow!(err)).with_context(|| format!("parsing {what}"))
        }
        Err(err) => {
            warn!("{what}: {err}; leaving unset");
            Ok(None)
        }
    }
}

fn timestamp_field(raw: &str) -> Result<Option<chrono::NaiveDateTime>> {
    match data::parse_timestamp(raw) {
        Ok(timestamp) => Ok(Some(timestamp)),
        Err(err @ DateError::BadWidth { .. }) => {
            Err(anyhow!(err)).context("parsing execution timestamp")
        }
        Err(err) => {
            warn!("execution timestamp: {err}; leaving unset");
            Ok(None)
        }
    }
}
