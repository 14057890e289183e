//! Markdown rendering of a [`Statistics`] snapshot.

use std::fmt::Write;

use super::{Feature, FeatureCount, Statistics};

pub struct StatisticsReport<'s> {
    stats: &'s Statistics,
    notes: bool,
}

impl<'s> StatisticsReport<'s> {
    pub fn new(stats: &'s Statistics) -> Self {
        Self { stats, notes: true }
    }

    /// Include the explanatory paragraphs between the tables.
    pub fn with_notes(mut self, value: bool) -> Self {
        self.notes = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_features(w)?;
        writeln!(w)?;
        self.format_terms(w)
    }

    fn format_features(&self, w: &mut impl Write) -> std::fmt::Result {
        let queries = self.stats.total_queries();
        let patterns = self.stats.get(Feature::StatementPatterns).occurrences;

        writeln!(w, "# Statistics for SPARQL algebra features in use")?;
        writeln!(w)?;
        if self.notes {
            writeln!(
                w,
                "Some basic statistics on SPARQL algebra features, as determined after parsing."
            )?;
            writeln!(w)?;
        }
        writeln!(
            w,
            "Statistics are collected over {queries} queries. Using {} statement patterns per query.",
            average(patterns, queries)
        )?;
        writeln!(w)?;
        writeln!(w, "| Type | Count | Queries |")?;
        writeln!(w, "|------|-------|-----|")?;
        for (feature, count) in self.stats.iter() {
            format_row(w, feature, count)?;
        }
        if self.notes {
            writeln!(w)?;
            writeln!(w, "Note describe queries may have zero statement patterns.")?;
        }
        Ok(())
    }

    fn format_terms(&self, w: &mut impl Write) -> std::fmt::Result {
        let queries = self.stats.total_queries();
        let variables = self.stats.distinct_variables();
        let constants = self.stats.distinct_constants();

        writeln!(w, "# Statistics for SPARQL variables and constants")?;
        writeln!(w)?;
        if self.notes {
            writeln!(
                w,
                "This is distinct constants and variables. Two uses of the same IRI predicate \
                 in multiple triple patterns count as one constant."
            )?;
            writeln!(w)?;
        }
        writeln!(w, "|  | Count | Avg |")?;
        writeln!(w, "|------|-------|-----|")?;
        let variables_avg = average(variables, queries);
        let constants_avg = average(constants, queries);
        writeln!(w, "| Variables | {variables} | {variables_avg} |")?;
        writeln!(w, "| Constants | {constants} | {constants_avg} |")
    }
}

fn format_row(w: &mut impl Write, feature: Feature, count: FeatureCount) -> std::fmt::Result {
    writeln!(
        w,
        "| {} | {} | {} |",
        feature.label(),
        count.occurrences,
        count.queries_containing
    )
}

/// `total / queries` with at most two fraction digits, trailing zeros dropped.
pub(crate) fn average(total: u64, queries: u64) -> String {
    if queries == 0 {
        return "0".to_string();
    }
    let mut s = format!("{:.2}", total as f64 / queries as f64);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}
