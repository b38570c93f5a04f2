use super::*;
use crate::test_support::{sample_result, sentence, source};

#[test]
fn moderate_overall_score_example() {
    let model = render(&sample_result());

    assert_eq!(model.interpretation, Interpretation::Moderate);
    assert_eq!(model.meter.color, ColorTier::Yellow);
    let expected_offset = 2.0 * PI * 45.0 * (1.0 - 0.22);
    assert!((model.meter.dash_offset - expected_offset).abs() < 1e-9);
    assert!((model.meter.circumference - 2.0 * PI * 45.0).abs() < 1e-12);
    assert_eq!(model.summary.overall_label, "22%");
    assert_eq!(model.summary.sources_count, 2);
    assert_eq!(model.summary.total_matches, 3);
}

#[test]
fn interpretation_and_color_scales_stay_distinct() {
    // 40 is "high" on the three-tier scale but only orange on the color scale.
    assert_eq!(Interpretation::for_percent(40.0), Interpretation::High);
    assert_eq!(ColorTier::for_percent(40.0), ColorTier::Orange);

    assert_eq!(Interpretation::for_percent(14.99), Interpretation::Low);
    assert_eq!(Interpretation::for_percent(15.0), Interpretation::Moderate);
    assert_eq!(Interpretation::for_percent(29.99), Interpretation::Moderate);
    assert_eq!(Interpretation::for_percent(30.0), Interpretation::High);

    assert_eq!(ColorTier::for_percent(0.0), ColorTier::Green);
    assert_eq!(ColorTier::for_percent(15.0), ColorTier::Yellow);
    assert_eq!(ColorTier::for_percent(30.0), ColorTier::Orange);
    assert_eq!(ColorTier::for_percent(49.99), ColorTier::Orange);
    assert_eq!(ColorTier::for_percent(50.0), ColorTier::Red);
    assert_eq!(ColorTier::for_percent(100.0), ColorTier::Red);
}

#[test]
fn every_similarity_in_unit_range_maps_to_a_tier_and_rounded_label() {
    for step in 0..=1000 {
        let similarity = step as f64 / 1000.0;
        let tier = ColorTier::for_similarity(similarity);
        let percent = similarity * 100.0;
        let expected = if percent < 15.0 {
            ColorTier::Green
        } else if percent < 30.0 {
            ColorTier::Yellow
        } else if percent < 50.0 {
            ColorTier::Orange
        } else {
            ColorTier::Red
        };
        assert_eq!(tier, expected, "similarity {similarity}");
        assert_eq!(percent_label(similarity), percent.round() as u32);
    }
}

#[test]
fn sources_are_ordered_by_average_similarity_descending() {
    let inputs = [
        vec![0.1, 0.9, 0.5, 0.7],
        vec![0.9, 0.7, 0.5, 0.1],
        vec![0.1, 0.5, 0.7, 0.9],
        vec![0.5, 0.5, 0.95, 0.0],
    ];

    for scores in inputs {
        let result = AnalysisResult {
            overall_percentage: 10.0,
            total_matches: scores.len() as u64,
            results: scores
                .iter()
                .enumerate()
                .map(|(i, score)| source(&format!("https://s{i}.example"), *score, Vec::new()))
                .collect(),
        };
        let SourceList::Sources(cards) = render(&result).sources else {
            panic!("expected sources");
        };
        let rendered: Vec<f64> = cards.iter().map(|c| c.avg_similarity).collect();
        let mut expected = scores.clone();
        expected.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(rendered, expected);
    }
}

#[test]
fn source_card_links_badge_and_match_rows() {
    let SourceList::Sources(cards) = render(&sample_result()).sources else {
        panic!("expected sources");
    };
    let top = &cards[0];

    assert_eq!(top.link.href, "https://example.org/high");
    assert_eq!(top.link.text, "Title for https://example.org/high");
    assert_eq!(ExternalLink::TARGET, "_blank");
    assert_eq!(ExternalLink::REL, "noopener noreferrer");
    assert_eq!(top.badge.percent, 81);
    assert_eq!(top.badge.color, ColorTier::Red);
    assert_eq!(top.badge.label(), "81% similar");

    assert_eq!(top.matches.len(), 2);
    let row = &top.matches[1];
    assert_eq!(row.sentence, "gamma");
    assert_eq!(row.source_text, "source of gamma");
    assert_eq!(row.percent, 72);
    assert!((row.bar_width_percent - 72.0).abs() < 1e-9);
    assert_eq!(row.label(), "72% match");
    assert_eq!(row.color, ColorTier::Red);
}

#[test]
fn low_similarity_match_uses_green_and_rounds_half_up() {
    let result = AnalysisResult {
        overall_percentage: 3.4,
        total_matches: 1,
        results: vec![source(
            "https://example.org",
            0.125,
            vec![sentence("x", 0.125)],
        )],
    };
    let model = render(&result);
    assert_eq!(model.summary.overall_label, "3%");
    assert_eq!(model.interpretation, Interpretation::Low);
    assert_eq!(model.meter.color, ColorTier::Green);

    let SourceList::Sources(cards) = model.sources else {
        panic!("expected sources");
    };
    assert_eq!(cards[0].matches[0].percent, 13);
    assert_eq!(cards[0].matches[0].color, ColorTier::Green);
}

#[test]
fn empty_results_render_no_matches_state() {
    let result = AnalysisResult {
        overall_percentage: 0.0,
        total_matches: 0,
        results: Vec::new(),
    };
    let model = render(&result);

    assert_eq!(model.sources, SourceList::NoMatches);
    assert_eq!(model.summary.sources_count, 0);
    assert_eq!(model.meter.color, ColorTier::Green);
    assert!((model.meter.dash_offset - meter_circumference()).abs() < 1e-12);
}

#[test]
fn color_tiers_carry_hex_codes() {
    assert_eq!(ColorTier::Green.hex(), "#4CAF50");
    assert_eq!(ColorTier::Yellow.hex(), "#FFC107");
    assert_eq!(ColorTier::Orange.hex(), "#FF9800");
    assert_eq!(ColorTier::Red.hex(), "#F44336");
}
