//! Score aggregation and readiness statistics.
//!
//! Everything here is a pure function of the tracker state. "No data" is
//! `None`, never a zero score.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Category, ScoreEntry, TrackerState, TARGET_BAND};
use crate::quotes;

/// Band at or above which a score counts as excellent.
pub const EXCELLENT_BAND: f64 = 7.5;

/// Band at or above which a score counts as good progress.
pub const GOOD_PROGRESS_BAND: f64 = 6.0;

/// Round to one decimal place, ties to even (6.25 -> 6.2, 6.75 -> 6.8).
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

fn mean(scores: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = scores.fold((0.0, 0usize), |(sum, n), s| (sum + s, n + 1));
    if n == 0 {
        None
    } else {
        Some(round1(sum / n as f64))
    }
}

/// Most recent score (entries are kept in date order).
pub fn latest(entries: &[ScoreEntry]) -> Option<f64> {
    entries.last().map(|e| e.score)
}

/// Mean score rounded to one decimal.
pub fn average(entries: &[ScoreEntry]) -> Option<f64> {
    mean(entries.iter().map(|e| e.score))
}

/// Highest score.
pub fn best(entries: &[ScoreEntry]) -> Option<f64> {
    entries.iter().map(|e| e.score).reduce(f64::max)
}

/// Mean across every category, rounded to one decimal.
pub fn overall_average(state: &TrackerState) -> Option<f64> {
    mean(state.scores.all().map(|e| e.score))
}

/// Number of categories whose latest score is at target.
pub fn readiness(state: &TrackerState) -> usize {
    Category::ALL
        .iter()
        .filter(|&&c| latest(state.scores.get(c)).is_some_and(|s| s >= TARGET_BAND))
        .count()
}

/// Readiness as a percentage of the four skills.
pub fn readiness_percent(ready: usize) -> u32 {
    (ready * 100 / Category::ALL.len()) as u32
}

/// Category with the lowest latest score.
///
/// An untested category ranks below any tested one. Ties go to the earliest
/// category in enumeration order, and with no data at all the answer is
/// listening.
pub fn weakest_category(state: &TrackerState) -> Category {
    if state.scores.is_empty() {
        return Category::Listening;
    }
    Category::ALL
        .into_iter()
        .min_by(|&a, &b| {
            let la = latest(state.scores.get(a));
            let lb = latest(state.scores.get(b));
            la.partial_cmp(&lb).unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(Category::Listening)
}

/// Days from `today` until `target`, clamped at zero.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days().max(0)
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

/// Coarse performance tier for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusTier {
    Excellent,
    TargetReached,
    GoodProgress,
    NeedsWork,
}

/// Tier plus the label shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub tier: StatusTier,
    pub icon: &'static str,
    pub label: &'static str,
}

/// Classify a score. `None` means nothing has been recorded yet.
pub fn status_for(score: Option<f64>) -> Status {
    let (tier, icon, label) = match score {
        Some(s) if s >= EXCELLENT_BAND => (StatusTier::Excellent, "🔥", "Excellent"),
        Some(s) if s >= TARGET_BAND => (StatusTier::TargetReached, "🎯", "Target Reached"),
        Some(s) if s >= GOOD_PROGRESS_BAND => (StatusTier::GoodProgress, "📈", "Good Progress"),
        Some(s) if s > 0.0 => (StatusTier::NeedsWork, "💪", "Keep Practicing"),
        _ => (StatusTier::NeedsWork, "📚", "Start Testing"),
    };
    Status { tier, icon, label }
}

// ---------------------------------------------------------------------------
// Progress over time
// ---------------------------------------------------------------------------

/// One point on a category's progress chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    /// "Test 1", "Test 2", ...
    pub label: String,
    pub date: NaiveDate,
    pub score: f64,
}

/// Chart series for a category, oldest first.
pub fn progress_series(entries: &[ScoreEntry]) -> Vec<ProgressPoint> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| ProgressPoint {
            label: format!("Test {}", i + 1),
            date: e.date,
            score: e.score,
        })
        .collect()
}

/// Change between the first and latest score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "direction", content = "delta", rename_all = "lowercase")]
pub enum Trend {
    Improving(f64),
    Declining(f64),
    Stable,
}

/// `None` until a category has at least two entries.
pub fn trend(entries: &[ScoreEntry]) -> Option<Trend> {
    if entries.len() < 2 {
        return None;
    }
    let first = entries.first()?.score;
    let last = entries.last()?.score;
    let delta = round1(last - first);
    Some(if delta > 0.0 {
        Trend::Improving(delta)
    } else if delta < 0.0 {
        Trend::Declining(delta)
    } else {
        Trend::Stable
    })
}

// ---------------------------------------------------------------------------
// Dashboard snapshot
// ---------------------------------------------------------------------------

/// What to practise next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    /// Every skill's latest score is at target.
    AllStrong,
    /// The weakest skill, with its latest score if it has one.
    Focus {
        category: Category,
        current: Option<f64>,
    },
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::AllStrong => write!(f, "All skills strong!"),
            Recommendation::Focus { category, .. } => write!(f, "Focus on {category}"),
        }
    }
}

pub fn recommendation(state: &TrackerState) -> Recommendation {
    let weakest = weakest_category(state);
    let current = latest(state.scores.get(weakest));
    match current {
        Some(s) if s >= TARGET_BAND => Recommendation::AllStrong,
        _ => Recommendation::Focus {
            category: weakest,
            current,
        },
    }
}

/// Per-category figures for the summary cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub latest: Option<f64>,
    pub best: Option<f64>,
    pub average: Option<f64>,
    pub count: usize,
    pub status: Status,
    pub trend: Option<Trend>,
}

impl CategorySummary {
    pub fn compute(category: Category, entries: &[ScoreEntry]) -> Self {
        let latest = latest(entries);
        Self {
            category,
            latest,
            best: best(entries),
            average: average(entries),
            count: entries.len(),
            status: status_for(latest),
            trend: trend(entries),
        }
    }
}

/// Everything the dashboard shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub target_date: NaiveDate,
    pub days_left: i64,
    pub quote: &'static str,
    pub categories: Vec<CategorySummary>,
    pub overall_average: Option<f64>,
    pub overall_status: Status,
    pub total_tests: usize,
    pub readiness: usize,
    pub readiness_percent: u32,
    pub weakest: Category,
    pub recommendation: Recommendation,
}

pub fn dashboard(state: &TrackerState, today: NaiveDate) -> Dashboard {
    let categories: Vec<CategorySummary> = Category::ALL
        .iter()
        .map(|&c| CategorySummary::compute(c, state.scores.get(c)))
        .collect();
    let overall = overall_average(state);
    let ready = readiness(state);

    Dashboard {
        today,
        target_date: state.target_date,
        days_left: days_until(state.target_date, today),
        quote: quotes::quote_for(today),
        categories,
        overall_average: overall,
        overall_status: status_for(overall),
        total_tests: state.scores.total_count(),
        readiness: ready,
        readiness_percent: readiness_percent(ready),
        weakest: weakest_category(state),
        recommendation: recommendation(state),
    }
}
