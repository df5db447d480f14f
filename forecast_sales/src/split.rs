//! Temporal train/test splitting

use crate::series::TimeSeries;
use chrono::Months;

/// The two halves of a temporal split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    /// Observations at or before the cutoff
    pub train: TimeSeries,
    /// Observations strictly after the cutoff
    pub test: TimeSeries,
}

/// Split a series at a cutoff a fixed number of calendar months before its end
///
/// The cutoff is `test_window_months` months before the last observation;
/// train takes everything at or before it, test everything after. A zero
/// window sends the whole series to train. The split always succeeds and
/// every observation lands in exactly one half, in the original order. A
/// window longer than the observed span leaves train empty, which the
/// pipeline rejects before fitting.
pub fn train_test_split(series: &TimeSeries, test_window_months: u32) -> SplitResult {
    if series.is_empty() || test_window_months == 0 {
        return SplitResult {
            train: series.clone(),
            test: TimeSeries::empty(),
        };
    }

    let last = match series.last_timestamp() {
        Some(last) => last,
        None => {
            return SplitResult {
                train: series.clone(),
                test: TimeSeries::empty(),
            }
        }
    };

    // First index strictly after the cutoff; an uncomputable cutoff lies
    // before any representable date, so everything is test
    let split_idx = match last.checked_sub_months(Months::new(test_window_months)) {
        Some(cutoff) => series.timestamps().partition_point(|ts| *ts <= cutoff),
        None => 0,
    };

    let train = TimeSeries::from_parts_unchecked(
        series.timestamps()[..split_idx].to_vec(),
        series.values()[..split_idx].to_vec(),
    );
    let test = TimeSeries::from_parts_unchecked(
        series.timestamps()[split_idx..].to_vec(),
        series.values()[split_idx..].to_vec(),
    );

    tracing::debug!(
        train = train.len(),
        test = test.len(),
        window_months = test_window_months,
        "split series at trailing cutoff"
    );

    SplitResult { train, test }
}
