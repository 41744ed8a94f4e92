//! Top-N frequency ranking of a categorical column.

use crate::error::AerostatError;
use crate::types::summaries::CategoryCount;
use polars::prelude::*;
use std::collections::HashMap;

/// Returns the `n` most frequent non-missing values of `column`, descending
/// by count. Ties keep the order in which the values were first encountered
/// in the data, so rankings are stable across reruns.
pub fn top_categories(
    frame: LazyFrame,
    column: &str,
    n: usize,
) -> Result<Vec<CategoryCount>, AerostatError> {
    let df = frame.select([col(column)]).collect()?;
    let ca = df.column(column)?.str()?;

    // Counting in Rust rather than with a group-by keeps the
    // first-encountered tie-break exact.
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();
    for value in ca.into_iter().flatten() {
        match counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                order.push(value.to_string());
                counts.insert(value.to_string(), 1);
            }
        }
    }

    let mut ranked: Vec<CategoryCount> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            CategoryCount { value, count }
        })
        .collect();
    // Stable sort preserves first-encountered order among equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    Ok(ranked)
}
