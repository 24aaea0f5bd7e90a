// src/stats.rs
//! Dashboard aggregation. Pure derivations over already-fetched rows,
//! recomputed in full on every dashboard load.

use crate::models::ApplicationStatus;
use serde::Serialize;
use std::collections::HashMap;

/// Dashboard shows at most this many category buckets.
pub const CATEGORY_TOP_N: usize = 8;
/// Dashboard shows at most this many location buckets.
pub const LOCATION_TOP_N: usize = 6;
/// Location stats are computed over a sample of the catalog, not all of it.
pub const LOCATION_SAMPLE_CAP: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub count: u64,
    pub pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub count: u64,
}

/// Missing or blank categories all land in one bucket.
pub fn normalize_category(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => "Other".to_string(),
    }
}

/// Location bucket key: everything before the first comma, trimmed.
/// "New York, NY" and "New York, United States" count as one bucket.
pub fn normalize_location(raw: Option<&str>) -> String {
    let head = raw
        .and_then(|l| l.split(',').next())
        .map(str::trim)
        .unwrap_or("");
    if head.is_empty() {
        "Unknown".to_string()
    } else {
        head.to_string()
    }
}

/// Count values by key, keeping first-seen order so equal counts have a
/// stable tiebreak after the descending sort.
fn count_grouped(keys: impl Iterator<Item = String>) -> Vec<(String, u64)> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for key in keys {
        let entry = counts.entry(key.clone()).or_insert(0);
        if *entry == 0 {
            order.push(key);
        }
        *entry += 1;
    }
    let mut grouped: Vec<(String, u64)> = order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect();
    grouped.sort_by(|a, b| b.1.cmp(&a.1));
    grouped
}

fn pct_of(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Top categories across the catalog. Percentages are shares of the
/// *displayed* groups: the denominator is the sum after truncating to the
/// top 8, so cutting the tail shifts every shown percentage. That matches
/// the shipped dashboard and is kept as-is.
pub fn category_breakdown(categories: &[Option<String>]) -> Vec<BreakdownEntry> {
    let grouped = count_grouped(
        categories
            .iter()
            .map(|c| normalize_category(c.as_deref())),
    );
    let shown: Vec<(String, u64)> = grouped.into_iter().take(CATEGORY_TOP_N).collect();
    let displayed_total: u64 = shown.iter().map(|(_, n)| n).sum();
    shown
        .into_iter()
        .map(|(name, count)| BreakdownEntry {
            pct: pct_of(count, displayed_total),
            name,
            count,
        })
        .collect()
}

/// Application counts per status. Statuses with no applications are simply
/// absent, never reported as zero.
pub fn status_breakdown(statuses: &[ApplicationStatus]) -> Vec<StatusCount> {
    let grouped = count_grouped(statuses.iter().map(|s| s.as_str().to_string()));
    grouped
        .into_iter()
        .map(|(name, count)| StatusCount {
            // keys came from as_str, parsing back cannot fail
            status: name.parse().unwrap_or(ApplicationStatus::Saved),
            count,
        })
        .collect()
}

/// Top hiring locations over a capped sample of the catalog. Unlike the
/// category view, percentages here are shares of the full sampled set:
/// the denominator is summed before truncating to the top 6.
pub fn location_breakdown(locations: &[Option<String>]) -> Vec<BreakdownEntry> {
    let sample = &locations[..locations.len().min(LOCATION_SAMPLE_CAP)];
    let grouped = count_grouped(sample.iter().map(|l| normalize_location(l.as_deref())));
    let sampled_total: u64 = grouped.iter().map(|(_, n)| n).sum();
    grouped
        .into_iter()
        .take(LOCATION_TOP_N)
        .map(|(name, count)| BreakdownEntry {
            pct: pct_of(count, sampled_total),
            name,
            count,
        })
        .collect()
}
