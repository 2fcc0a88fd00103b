//! Aggregate statistics over logged workouts.
//!
//! Pure functions over a snapshot of the category map:
//! - Total minutes and the motivation tier they fall into
//! - Per-category totals and their percentage share

use crate::{Category, CategoryMap, Motivation, MotivationTier, Progress, Summary};
use std::collections::BTreeMap;

/// Minutes at which the tier moves from low to medium
pub const MEDIUM_THRESHOLD_MINUTES: u64 = 30;

/// Minutes at which the tier moves from medium to high
pub const HIGH_THRESHOLD_MINUTES: u64 = 60;

/// Pick the motivation tier for a number of logged minutes
///
/// Buckets are `[0, 30)`, `[30, 60)` and `[60, ∞)`.
pub fn motivation_for(total_time: u64) -> Motivation {
    let tier = if total_time < MEDIUM_THRESHOLD_MINUTES {
        MotivationTier::Low
    } else if total_time < HIGH_THRESHOLD_MINUTES {
        MotivationTier::Medium
    } else {
        MotivationTier::High
    };

    Motivation {
        tier,
        message: tier.message().to_string(),
    }
}

/// Sum of durations in one category
fn category_total(workouts: &CategoryMap, category: Category) -> u64 {
    workouts
        .get(&category)
        .map(|entries| entries.iter().map(|e| u64::from(e.duration)).sum())
        .unwrap_or(0)
}

/// Total minutes plus a motivational message
pub fn summarize(workouts: CategoryMap) -> Summary {
    let total_time = Category::ALL
        .iter()
        .map(|&c| category_total(&workouts, c))
        .sum();

    Summary {
        motivation: motivation_for(total_time),
        total_time,
        workouts,
    }
}

/// Per-category totals and percentages
///
/// Percentages are rounded to one decimal place and are all zero when
/// nothing has been logged.
pub fn compute_progress(workouts: &CategoryMap) -> Progress {
    let totals: BTreeMap<Category, u64> = Category::ALL
        .iter()
        .map(|&c| (c, category_total(workouts, c)))
        .collect();
    let total_time: u64 = totals.values().sum();

    let percentages = totals
        .iter()
        .map(|(&c, &minutes)| {
            let pct = if total_time > 0 {
                round_one_decimal(minutes as f64 / total_time as f64 * 100.0)
            } else {
                0.0
            };
            (c, pct)
        })
        .collect();

    Progress {
        totals,
        percentages,
        total_time,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
