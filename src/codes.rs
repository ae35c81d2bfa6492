use std::fmt;

/// Floating-rate benchmark backing a swap leg.
///
/// Classification is substring-based and priority-ordered: labels routinely
/// carry several keywords at once ("USD SOFR COMPOUND TERM"), and the first
/// matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceRate {
    SofrCompound,
    SofrTerm,
    Libor,
    Cpi,
    Unrecognized(String),
}

impl ReferenceRate {
    pub fn classify(input: &str) -> Self {
        let upper = input.to_ascii_uppercase();
        if upper.contains("SOFR") && upper.contains("COMPOUND") {
            Self::SofrCompound
        } else if upper.contains("SOFR") && upper.contains("TERM") {
            Self::SofrTerm
        } else if upper.contains("CPI") {
            Self::Cpi
        } else if upper.contains("LIBOR") {
            Self::Libor
        } else {
            Self::Unrecognized(upper)
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    // Labels reclassify to the same variant; the round-trip tests rely on it.
    pub fn label(&self) -> &str {
        match self {
            Self::SofrCompound => "SOFR COMPOUND",
            Self::SofrTerm => "SOFR TERM",
            Self::Libor => "LIBOR",
            Self::Cpi => "CPI",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl Default for ReferenceRate {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl fmt::Display for ReferenceRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
    Unrecognized(String),
}

impl PaymentFrequency {
    pub fn classify(input: &str) -> Self {
        match input {
            "1M" => Self::Monthly,
            "3M" => Self::Quarterly,
            "6M" => Self::Semiannual,
            "1Y" => Self::Annual,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Monthly => "1M",
            Self::Quarterly => "3M",
            Self::Semiannual => "6M",
            Self::Annual => "1Y",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl Default for PaymentFrequency {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Eur,
    Unrecognized(String),
}

impl Currency {
    pub fn classify(input: &str) -> Self {
        match input {
            "USD" => Self::Usd,
            "EUR" => Self::Eur,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionType {
    New,
    Cancel,
    Correct,
    Unrecognized(String),
}

impl ActionType {
    pub fn classify(input: &str) -> Self {
        match input {
            "NEW" => Self::New,
            "CANCEL" => Self::Cancel,
            "CORRECT" => Self::Correct,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl Default for ActionType {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionType {
    Trade,
    Amendment,
    Termination,
    Unrecognized(String),
}

impl TransactionType {
    pub fn classify(input: &str) -> Self {
        match input {
            "Trade" => Self::Trade,
            "Amendment" => Self::Amendment,
            "Termination" => Self::Termination,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl Default for TransactionType {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockTradeFlag {
    Yes,
    No,
    Unrecognized(String),
}

impl BlockTradeFlag {
    pub fn classify(input: &str) -> Self {
        match input {
            "Y" => Self::Yes,
            "N" => Self::No,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl Default for BlockTradeFlag {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueType {
    On,
    Off,
    Unrecognized(String),
}

impl VenueType {
    pub fn classify(input: &str) -> Self {
        match input {
            "ON" => Self::On,
            "OFF" => Self::Off,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl Default for VenueType {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}
