use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    buffer::{BufferError, ResponseBuffer},
    codes::{
        ActionType, BlockTradeFlag, Currency, PaymentFrequency, ReferenceRate, TransactionType,
        VenueType,
    },
    data,
};

pub const ID_HEADER: &str = "Dissemination ID";
pub const START_DATE_HEADER: &str = "Effective Date";
pub const END_DATE_HEADER: &str = "Expiration Date";
pub const TRADE_TIME_HEADER: &str = "Execution Timestamp";
pub const FIXED_RATE_1_HEADER: &str = "Fixed Rate 1";
pub const FIXED_RATE_2_HEADER: &str = "Fixed Rate 2";
pub const NOTIONAL_HEADER: &str = "Notional Amount 1";
pub const ACTION_HEADER: &str = "Action";
pub const TRANSACTION_HEADER: &str = "Transaction Type";
pub const BLOCK_TRADE_HEADER: &str = "Block Trade Election Indicator";
pub const VENUE_HEADER: &str = "Execution Venue Type";
pub const REF_RATE_LEG1_HEADER: &str = "Leg 1 - Floating Rate Index";
pub const REF_RATE_LEG2_HEADER: &str = "Leg 2 - Floating Rate Index";
pub const CURRENCY_HEADER: &str = "Notional Currency 1";
pub const PAY_FREQ_LEG1_HEADER: &str = "Payment Frequency Period 1";
pub const PAY_FREQ_LEG2_HEADER: &str = "Payment Frequency Period 2";
pub const FLOAT_PAY_FREQ_HEADER: &str = "Floating Payment Frequency";
pub const FIXED_PAY_FREQ_HEADER: &str = "Fixed Payment Frequency";
pub const REF_RATE_HEADER: &str = "Ref Rate";

/// Attribute identity a physical column resolves to. The leg-scoped variants
/// identify the slot a value came from; which slot ends up fixed vs. floating
/// is decided per record by the builder, after the whole line has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    StartDate,
    EndDate,
    TradeTime,
    FixedRate,
    Notional,
    Action,
    Transaction,
    BlockTrade,
    Venue,
    RefRateLeg1,
    RefRateLeg2,
    Currency,
    PayFreqLeg1,
    PayFreqLeg2,
    FloatPayFreq,
    FixedPayFreq,
    RefRate,
}

// Exact, case-sensitive lookup; unknown headers return None.
pub fn resolve_header(name: &str) -> Option<Column> {
    match name {
        ID_HEADER => Some(Column::Id),
        START_DATE_HEADER => Some(Column::StartDate),
        END_DATE_HEADER => Some(Column::EndDate),
        TRADE_TIME_HEADER => Some(Column::TradeTime),
        FIXED_RATE_1_HEADER | FIXED_RATE_2_HEADER => Some(Column::FixedRate),
        NOTIONAL_HEADER => Some(Column::Notional),
        ACTION_HEADER => Some(Column::Action),
        TRANSACTION_HEADER => Some(Column::Transaction),
        BLOCK_TRADE_HEADER => Some(Column::BlockTrade),
        VENUE_HEADER => Some(Column::Venue),
        REF_RATE_LEG1_HEADER => Some(Column::RefRateLeg1),
        REF_RATE_LEG2_HEADER => Some(Column::RefRateLeg2),
        CURRENCY_HEADER => Some(Column::Currency),
        PAY_FREQ_LEG1_HEADER => Some(Column::PayFreqLeg1),
        PAY_FREQ_LEG2_HEADER => Some(Column::PayFreqLeg2),
        FLOAT_PAY_FREQ_HEADER => Some(Column::FloatPayFreq),
        FIXED_PAY_FREQ_HEADER => Some(Column::FixedPayFreq),
        REF_RATE_HEADER => Some(Column::RefRate),
        _ => None,
    }
}

/// One interest-rate-swap trade disclosure.
///
/// Numeric fields use 0 as the "unset" sentinel and date fields use `None`;
/// both states are also what value-level parse failures resolve to, so a
/// populated record cannot distinguish "absent in source" from "present but
/// invalid". The similarity engine relies on exactly this: sentinel
/// attributes in a query are excluded from scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Swap {
    pub id: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub trade_time: Option<NaiveDateTime>,
    pub fixed_rate: f64,
    pub notional: f64,
    pub ref_rate: ReferenceRate,
    pub fixed_pay_freq: PaymentFrequency,
    pub float_pay_freq: PaymentFrequency,
    pub currency: Currency,
    pub action: ActionType,
    pub transaction: TransactionType,
    pub block_trade: BlockTradeFlag,
    pub venue: VenueType,
}

impl Swap {
    /// Serialize to the `Header:Value;` wire form. Emitted headers are the
    /// same canonical strings the query parser accepts and every value is in
    /// the lexical form the field parsers read back, so a response re-parses
    /// to the record it came from.
    pub fn to_wire(&self, buffer: &mut ResponseBuffer) -> Result<(), BufferError> {
        append_pair(buffer, ID_HEADER, &self.id.to_string())?;
        append_pair(buffer, START_DATE_HEADER, &option_date(self.start_date))?;
        append_pair(buffer, END_DATE_HEADER, &option_date(self.end_date))?;
        append_pair(buffer, TRADE_TIME_HEADER, &option_timestamp(self.trade_time))?;
        append_pair(buffer, FIXED_RATE_1_HEADER, &self.fixed_rate.to_string())?;
        append_pair(buffer, NOTIONAL_HEADER, &self.notional.to_string())?;
        append_pair(buffer, REF_RATE_HEADER, self.ref_rate.label())?;
        append_pair(buffer, FIXED_PAY_FREQ_HEADER, self.fixed_pay_freq.code())?;
        append_pair(buffer, FLOAT_PAY_FREQ_HEADER, self.float_pay_freq.code())?;
        Ok(())
    }

    pub fn wire_string(&self) -> Result<String, BufferError> {
        let mut buffer = ResponseBuffer::new();
        self.to_wire(&mut buffer)?;
        Ok(buffer.as_str().to_string())
    }
}

fn option_date(date: Option<NaiveDate>) -> String {
    date.map(data::format_date).unwrap_or_default()
}

fn option_timestamp(timestamp: Option<NaiveDateTime>) -> String {
    timestamp.map(data::format_timestamp).unwrap_or_default()
}

fn append_pair(
    buffer: &mut ResponseBuffer,
    header: &str,
    value: &str,
) -> Result<(), BufferError> {
    buffer.append(header)?;
    buffer.append(":")?;
    buffer.append(value)?;
    buffer.append(";")
}
