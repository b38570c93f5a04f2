//! Projection of a completed analysis into a display-ready model.
//!
//! Two severity scales live here and are intentionally kept apart:
//! [`Interpretation`] has three tiers and only reads the overall percentage,
//! [`ColorTier`] has four tiers and colors the meter and every match.

use std::f64::consts::PI;

use shared::domain::{AnalysisResult, SentenceMatch, SourceMatch};

pub const METER_RADIUS: f64 = 45.0;

pub fn meter_circumference() -> f64 {
    2.0 * PI * METER_RADIUS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTier {
    Green,
    Yellow,
    Orange,
    Red,
}

impl ColorTier {
    /// Any input maps to a tier; values at or above 50, and NaN, are red.
    pub fn for_percent(percent: f64) -> Self {
        if percent < 15.0 {
            ColorTier::Green
        } else if percent < 30.0 {
            ColorTier::Yellow
        } else if percent < 50.0 {
            ColorTier::Orange
        } else {
            ColorTier::Red
        }
    }

    pub fn for_similarity(similarity: f64) -> Self {
        Self::for_percent(similarity * 100.0)
    }

    pub fn hex(self) -> &'static str {
        match self {
            ColorTier::Green => "#4CAF50",
            ColorTier::Yellow => "#FFC107",
            ColorTier::Orange => "#FF9800",
            ColorTier::Red => "#F44336",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpretation {
    Low,
    Moderate,
    High,
}

impl Interpretation {
    pub fn for_percent(percent: f64) -> Self {
        if percent < 15.0 {
            Interpretation::Low
        } else if percent < 30.0 {
            Interpretation::Moderate
        } else {
            Interpretation::High
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Interpretation::Low => "Low similarity",
            Interpretation::Moderate => "Moderate similarity",
            Interpretation::High => "High similarity",
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            Interpretation::Low => {
                "Your content appears mostly original. Any matches are likely common phrases or coincidental similarities."
            }
            Interpretation::Moderate => {
                "Some portions of your text match existing content. Consider revising the highlighted sections."
            }
            Interpretation::High => {
                "Significant portions of your text match existing content. Careful review and revision is recommended."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub overall_percentage: f64,
    pub overall_label: String,
    pub sources_count: usize,
    pub total_matches: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meter {
    pub circumference: f64,
    pub dash_offset: f64,
    pub color: ColorTier,
}

impl Meter {
    pub fn for_percent(percent: f64) -> Self {
        let circumference = meter_circumference();
        Self {
            circumference,
            dash_offset: circumference * (1.0 - percent / 100.0),
            color: ColorTier::for_percent(percent),
        }
    }
}

/// Outbound link opened in a new browsing context without an opener reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub href: String,
    pub text: String,
}

impl ExternalLink {
    pub const TARGET: &'static str = "_blank";
    pub const REL: &'static str = "noopener noreferrer";
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityBadge {
    pub percent: u32,
    pub color: ColorTier,
}

impl SimilarityBadge {
    pub fn label(&self) -> String {
        format!("{}% similar", self.percent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub sentence: String,
    pub source_text: String,
    pub bar_width_percent: f64,
    pub percent: u32,
    pub color: ColorTier,
}

impl MatchRow {
    pub fn label(&self) -> String {
        format!("{}% match", self.percent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceCard {
    pub link: ExternalLink,
    pub avg_similarity: f64,
    pub badge: SimilarityBadge,
    pub matches: Vec<MatchRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceList {
    NoMatches,
    Sources(Vec<SourceCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub summary: Summary,
    pub interpretation: Interpretation,
    pub meter: Meter,
    pub sources: SourceList,
}

pub fn percent_label(similarity: f64) -> u32 {
    (similarity * 100.0).round().max(0.0) as u32
}

pub fn render(result: &AnalysisResult) -> DisplayModel {
    let percentage = result.overall_percentage;

    let summary = Summary {
        overall_percentage: percentage,
        overall_label: format!("{}%", percentage.round()),
        sources_count: result.results.len(),
        total_matches: result.total_matches,
    };

    let sources = if result.results.is_empty() {
        SourceList::NoMatches
    } else {
        let mut ordered: Vec<&SourceMatch> = result.results.iter().collect();
        // Order among equal scores is not part of the contract.
        ordered.sort_unstable_by(|a, b| b.avg_similarity.total_cmp(&a.avg_similarity));
        SourceList::Sources(ordered.into_iter().map(source_card).collect())
    };

    DisplayModel {
        summary,
        interpretation: Interpretation::for_percent(percentage),
        meter: Meter::for_percent(percentage),
        sources,
    }
}

fn source_card(source: &SourceMatch) -> SourceCard {
    SourceCard {
        link: ExternalLink {
            href: source.url.clone(),
            text: source.title.clone(),
        },
        avg_similarity: source.avg_similarity,
        badge: SimilarityBadge {
            percent: percent_label(source.avg_similarity),
            color: ColorTier::for_similarity(source.avg_similarity),
        },
        matches: source.matched_sentences.iter().map(match_row).collect(),
    }
}

fn match_row(m: &SentenceMatch) -> MatchRow {
    MatchRow {
        sentence: m.sentence.clone(),
        source_text: m.source_text.clone(),
        bar_width_percent: m.similarity * 100.0,
        percent: percent_label(m.similarity),
        color: ColorTier::for_similarity(m.similarity),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
