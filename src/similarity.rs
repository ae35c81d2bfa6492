//! Weighted nearest-record search over the catalog.
//!
//! Every comparison produces a vector of eight per-attribute distances,
//! which a weight set derived from the query collapses into one weighted
//! squared distance. The scan is a full O(n) pass per query with no index
//! or pruning; adequate for catalogs of a few thousand records.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{catalog::Catalog, record::Swap};

/// Weight for enumerated attributes the query specifies. Large enough that
/// an enumerated mismatch outweighs any plausible numeric gap.
pub const CATEGORY_WEIGHT: f64 = 1_000_000.0;

const DAYS_PER_YEAR: f64 = 365.0;
const DAYS_PER_MONTH: f64 = 30.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

fn ymd(date: Option<NaiveDate>) -> (i32, i32, i32) {
    // An unset date contributes all-zero components, so a record missing a
    // date the query specifies scores far from any real date.
    date.map(|d| (d.year(), d.month() as i32, d.day() as i32))
        .unwrap_or_default()
}

/// Flat day-count gap: years at 365 days, months at 30, days at 1, each
/// component differenced independently. Not calendar arithmetic; the
/// approximation is the metric's definition.
pub fn date_distance(a: Option<NaiveDate>, b: Option<NaiveDate>) -> f64 {
    let (ay, am, ad) = ymd(a);
    let (by, bm, bd) = ymd(b);
    f64::from((ay - by).abs()) * DAYS_PER_YEAR
        + f64::from((am - bm).abs()) * DAYS_PER_MONTH
        + f64::from((ad - bd).abs())
}

/// Date distance in seconds plus independent clock-component gaps.
pub fn timestamp_distance(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> f64 {
    let clock = |t: Option<NaiveDateTime>| {
        t.map(|t| (t.hour() as i32, t.minute() as i32, t.second() as i32))
            .unwrap_or_default()
    };
    let (ah, am, asec) = clock(a);
    let (bh, bm, bsec) = clock(b);
    date_distance(a.map(|t| t.date()), b.map(|t| t.date())) * SECONDS_PER_DAY
        + f64::from((ah - bh).abs()) * SECONDS_PER_HOUR
        + f64::from((am - bm).abs()) * SECONDS_PER_MINUTE
        + f64::from((asec - bsec).abs())
}

fn category_distance<T: PartialEq>(a: &T, b: &T) -> f64 {
    if a == b { 0.0 } else { 1.0 }
}

/// Per-attribute distances for one query/candidate comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceVector {
    pub start_date: f64,
    pub end_date: f64,
    pub trade_time: f64,
    pub fixed_rate: f64,
    pub notional: f64,
    pub ref_rate: f64,
    pub fixed_pay_freq: f64,
    pub float_pay_freq: f64,
}

impl DistanceVector {
    pub fn between(query: &Swap, candidate: &Swap) -> Self {
        Self {
            start_date: date_distance(query.start_date, candidate.start_date),
            end_date: date_distance(query.end_date, candidate.end_date),
            trade_time: timestamp_distance(query.trade_time, candidate.trade_time),
            fixed_rate: (query.fixed_rate - candidate.fixed_rate).abs(),
            notional: (query.notional - candidate.notional).abs(),
            ref_rate: category_distance(&query.ref_rate, &candidate.ref_rate),
            fixed_pay_freq: category_distance(&query.fixed_pay_freq, &candidate.fixed_pay_freq),
            float_pay_freq: category_distance(&query.float_pay_freq, &candidate.float_pay_freq),
        }
    }
}

/// Per-attribute weights; zero removes an attribute from scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceWeights {
    pub start_date: f64,
    pub end_date: f64,
    pub trade_time: f64,
    pub fixed_rate: f64,
    pub notional: f64,
    pub ref_rate: f64,
    pub fixed_pay_freq: f64,
    pub float_pay_freq: f64,
}

impl DistanceWeights {
    // Sentinel attributes weigh 0, date/time/numeric attributes 1, and
    // enumerated attributes CATEGORY_WEIGHT.
    pub fn for_query(query: &Swap) -> Self {
        let presence = |present: bool| if present { 1.0 } else { 0.0 };
        let category = |present: bool| if present { CATEGORY_WEIGHT } else { 0.0 };
        Self {
            start_date: presence(query.start_date.is_some()),
            end_date: presence(query.end_date.is_some()),
            trade_time: presence(query.trade_time.is_some()),
            fixed_rate: presence(query.fixed_rate != 0.0),
            notional: presence(query.notional != 0.0),
            ref_rate: category(query.ref_rate.is_recognized()),
            fixed_pay_freq: category(query.fixed_pay_freq.is_recognized()),
            float_pay_freq: category(query.float_pay_freq.is_recognized()),
        }
    }
}

/// Weighted squared distance over the full coordinate vector.
pub fn weighted_l2(vector: &DistanceVector, weights: &DistanceWeights) -> f64 {
    vector.start_date * vector.start_date * weights.start_date
        + vector.end_date * vector.end_date * weights.end_date
        + vector.trade_time * vector.trade_time * weights.trade_time
        + vector.fixed_rate * vector.fixed_rate * weights.fixed_rate
        + vector.notional * vector.notional * weights.notional
        + vector.ref_rate * vector.ref_rate * weights.ref_rate
        + vector.fixed_pay_freq * vector.fixed_pay_freq * weights.fixed_pay_freq
        + vector.float_pay_freq * vector.float_pay_freq * weights.float_pay_freq
}

/// Scan for the record minimizing the weighted squared distance to `query`.
/// Ties keep the record with the lowest catalog index. Returns `None` only
/// for an empty catalog.
pub fn nearest<'a>(query: &Swap, catalog: &'a Catalog) -> Option<&'a Swap> {
    let weights = DistanceWeights::for_query(query);
    let mut best: Option<(&Swap, f64)> = None;
    for candidate in catalog.records() {
        let distance = weighted_l2(&DistanceVector::between(query, candidate), &weights);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(swap, _)| swap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{PaymentFrequency, ReferenceRate};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn date_distance_uses_flat_component_counts() {
        // one year, one month, one day apart: 365 + 30 + 1
        assert_eq!(date_distance(date(2022, 2, 2), date(2021, 1, 1)), 396.0);
        // month wrap is NOT calendar-aware: Dec vs Jan of the next year is
        // 365 years-days plus 11 months-days
        assert_eq!(
            date_distance(date(2021, 12, 31), date(2022, 1, 31)),
            365.0 + 330.0
        );
    }

    #[test]
    fn timestamp_distance_adds_clock_components() {
        let a = date(2022, 9, 10).unwrap().and_hms_opt(20, 15, 56);
        let b = date(2022, 9, 10).unwrap().and_hms_opt(19, 14, 55);
        assert_eq!(timestamp_distance(a, b), 3600.0 + 60.0 + 1.0);
    }

    #[test]
    fn unset_side_scores_far_from_real_dates() {
        let gap = date_distance(date(2022, 9, 10), None);
        assert_eq!(gap, 2022.0 * 365.0 + 9.0 * 30.0 + 10.0);
    }

    #[test]
    fn weights_track_query_presence() {
        let query = Swap {
            notional: 100.0,
            ref_rate: ReferenceRate::Libor,
            ..Swap::default()
        };
        let weights = DistanceWeights::for_query(&query);
        assert_eq!(weights.notional, 1.0);
        assert_eq!(weights.ref_rate, CATEGORY_WEIGHT);
        assert_eq!(weights.fixed_rate, 0.0);
        assert_eq!(weights.start_date, 0.0);
        assert_eq!(weights.fixed_pay_freq, 0.0);
    }

    fn notional_catalog(values: &[f64]) -> Catalog {
        Catalog::from_records(
            values
                .iter()
                .map(|n| Swap {
                    notional: *n,
                    ..Swap::default()
                })
                .collect(),
        )
    }

    #[test]
    fn single_specified_attribute_drives_the_match() {
        let catalog = notional_catalog(&[100.0, 250.0, 400.0]);
        let query = Swap {
            notional: 260.0,
            ..Swap::default()
        };
        let nearest = nearest(&query, &catalog).unwrap();
        assert_eq!(nearest.notional, 250.0);
    }

    #[test]
    fn ties_keep_the_lowest_catalog_index() {
        let catalog = notional_catalog(&[200.0, 300.0]);
        let query = Swap {
            notional: 250.0,
            ..Swap::default()
        };
        // both candidates are 50 away; the first one wins
        assert_eq!(nearest(&query, &catalog).unwrap().notional, 200.0);
    }

    #[test]
    fn specified_category_dominates_numeric_gaps() {
        let near_notional = Swap {
            notional: 250.0,
            ref_rate: ReferenceRate::Libor,
            ..Swap::default()
        };
        let right_rate = Swap {
            notional: 350.0,
            ref_rate: ReferenceRate::SofrCompound,
            ..Swap::default()
        };
        let catalog = Catalog::from_records(vec![near_notional, right_rate]);
        let query = Swap {
            notional: 250.0,
            ref_rate: ReferenceRate::SofrCompound,
            ..Swap::default()
        };
        // a rate mismatch costs 1e6; the 100-notional gap costs only 1e4
        assert_eq!(nearest(&query, &catalog).unwrap().notional, 350.0);
    }

    #[test]
    fn unspecified_frequencies_do_not_penalize_candidates() {
        let candidate = Swap {
            notional: 100.0,
            fixed_pay_freq: PaymentFrequency::Semiannual,
            float_pay_freq: PaymentFrequency::Quarterly,
            ..Swap::default()
        };
        let catalog = Catalog::from_records(vec![candidate]);
        let query = Swap {
            notional: 90.0,
            ..Swap::default()
        };
        assert_eq!(nearest(&query, &catalog).unwrap().notional, 100.0);
    }

    #[test]
    fn empty_catalog_has_no_nearest() {
        let catalog = Catalog::from_records(Vec::new());
        assert!(nearest(&Swap::default(), &catalog).is_none());
    }
}
