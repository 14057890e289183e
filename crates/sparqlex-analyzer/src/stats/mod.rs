//! Usage statistics of SPARQL algebra features across many queries.
//!
//! [`FeatureCounter`] walks one tree per call and folds the per-query tally
//! into a [`Statistics`] snapshot. [`StatisticsReport`] renders a snapshot as
//! Markdown.

mod counter;
mod report;


pub use counter::FeatureCounter;
pub use report::StatisticsReport;

use indexmap::IndexMap;
use serde::Serialize;
use sparqlex_core::AggregateKind;

pub(crate) const FEATURE_COUNT: usize = 18;

/// A tracked algebra feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    StatementPatterns,
    Filters,
    Optionals,
    PropertyPaths,
    Services,
    Unions,
    Minus,
    Exists,
    Groups,
    Orders,
    Aggregates,
    Avg,
    Count,
    GroupConcat,
    Max,
    Min,
    Sample,
    Sum,
}

impl Feature {
    /// Every feature, in report order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::StatementPatterns,
        Feature::Filters,
        Feature::Optionals,
        Feature::PropertyPaths,
        Feature::Services,
        Feature::Unions,
        Feature::Minus,
        Feature::Exists,
        Feature::Groups,
        Feature::Orders,
        Feature::Aggregates,
        Feature::Avg,
        Feature::Count,
        Feature::GroupConcat,
        Feature::Max,
        Feature::Min,
        Feature::Sample,
        Feature::Sum,
    ];

    /// Row label used in the Markdown report.
    pub fn label(self) -> &'static str {
        match self {
            Feature::StatementPatterns => "Statement patterns",
            Feature::Filters => "Filter",
            Feature::Optionals => "Optional",
            Feature::PropertyPaths => "Property path",
            Feature::Services => "Service",
            Feature::Unions => "Union",
            Feature::Minus => "Minus",
            Feature::Exists => "Exists",
            Feature::Groups => "Group",
            Feature::Orders => "Order",
            Feature::Aggregates => "Aggregate",
            Feature::Avg => " - Average",
            Feature::Count => " - Count",
            Feature::GroupConcat => " - GroupConcat",
            Feature::Max => " - Max",
            Feature::Min => " - Min",
            Feature::Sample => " - Sample",
            Feature::Sum => " - Sum",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl From<AggregateKind> for Feature {
    fn from(kind: AggregateKind) -> Self {
        match kind {
            AggregateKind::Count => Feature::Count,
            AggregateKind::Sum => Feature::Sum,
            AggregateKind::Avg => Feature::Avg,
            AggregateKind::Min => Feature::Min,
            AggregateKind::Max => Feature::Max,
            AggregateKind::Sample => Feature::Sample,
            AggregateKind::GroupConcat => Feature::GroupConcat,
        }
    }
}

/// Running totals for one feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureCount {
    /// Sum of occurrences over all processed queries.
    pub occurrences: u64,
    /// Number of queries in which the feature occurred at least once.
    pub queries_containing: u64,
}

/// Aggregate snapshot over every processed query.
///
/// Merging is pointwise addition, so snapshots from independent workers can
/// be combined in any order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    features: IndexMap<Feature, FeatureCount>,
    distinct_variables: u64,
    distinct_constants: u64,
    total_queries: u64,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            features: Feature::ALL
                .iter()
                .map(|&f| (f, FeatureCount::default()))
                .collect(),
            distinct_variables: 0,
            distinct_constants: 0,
            total_queries: 0,
        }
    }
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, feature: Feature) -> FeatureCount {
        self.features.get(&feature).copied().unwrap_or_default()
    }

    /// Every feature with its totals, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, FeatureCount)> + '_ {
        self.features.iter().map(|(&f, &c)| (f, c))
    }

    /// Sum over queries of the number of distinct variables per query.
    pub fn distinct_variables(&self) -> u64 {
        self.distinct_variables
    }

    /// Sum over queries of the number of distinct constants per query.
    pub fn distinct_constants(&self) -> u64 {
        self.distinct_constants
    }

    pub fn total_queries(&self) -> u64 {
        self.total_queries
    }

    pub fn merge(&mut self, other: &Statistics) {
        for (feature, count) in other.iter() {
            let entry = self.features.entry(feature).or_default();
            entry.occurrences += count.occurrences;
            entry.queries_containing += count.queries_containing;
        }
        self.distinct_variables += other.distinct_variables;
        self.distinct_constants += other.distinct_constants;
        self.total_queries += other.total_queries;
    }

    /// Fold one query's local tally into the totals.
    fn record_query(&mut self, local: &[u64; FEATURE_COUNT], variables: u64, constants: u64) {
        for feature in Feature::ALL {
            let n = local[feature.index()];
            let entry = self.features.entry(feature).or_default();
            entry.occurrences += n;
            if n > 0 {
                entry.queries_containing += 1;
            }
        }
        self.distinct_variables += variables;
        self.distinct_constants += constants;
        self.total_queries += 1;
    }
}
