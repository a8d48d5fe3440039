// tests/turtle_geometry.rs
use glam::DVec2;
use lsys_turtle::{
    Angle, EvaluationStrategy, Grammar, Interpreter, PathCommand, PathRecorder, Preset,
    RenderConfig, render,
};
use pretty_assertions::assert_eq;

const EPS: f64 = 1e-9;

fn draw(grammar: &Grammar) -> Vec<PathCommand> {
    let mut calls = Vec::new();
    render(grammar, &mut calls).unwrap();
    calls
}

fn draw_with(grammar: &Grammar, strategy: EvaluationStrategy) -> Vec<PathCommand> {
    let mut calls = Vec::new();
    Interpreter::new(RenderConfig::default().with_strategy(strategy))
        .render(grammar, &mut calls)
        .unwrap();
    calls
}

fn assert_same_path(a: &[PathCommand], b: &[PathCommand]) {
    assert_eq!(a.len(), b.len(), "path lengths differ");
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        let same_kind = matches!(
            (x, y),
            (PathCommand::MoveTo(_), PathCommand::MoveTo(_))
                | (PathCommand::LineTo(_), PathCommand::LineTo(_))
        );
        assert!(same_kind, "call {i}: {x:?} vs {y:?}");
        assert!(
            x.point().abs_diff_eq(y.point(), EPS),
            "call {i}: {x:?} vs {y:?}"
        );
    }
}

#[test]
fn test_axiom_only_draws_up() {
    let grammar = Grammar::new("F")
        .with_step_length(10.0)
        .with_evaluation_depth(0);

    // Heading 0 points along +Y.
    assert_eq!(
        draw(&grammar),
        vec![
            PathCommand::MoveTo(DVec2::ZERO),
            PathCommand::LineTo(DVec2::new(0.0, 10.0)),
        ]
    );
}

#[test]
fn test_positive_turn_goes_right() {
    let grammar = Grammar::new("F+F")
        .with_turn_angle(Angle::from_degrees(90.0))
        .with_step_length(1.0);
    let calls = draw(&grammar);

    assert_eq!(calls.len(), 3);
    assert_same_path(
        &calls,
        &[
            PathCommand::MoveTo(DVec2::ZERO),
            PathCommand::LineTo(DVec2::new(0.0, 1.0)),
            PathCommand::LineTo(DVec2::new(1.0, 1.0)),
        ],
    );
}

#[test]
fn test_branch_restores_position_and_heading() {
    let grammar = Grammar::new("[+F]F").with_step_length(10.0);
    let calls = draw(&grammar);

    // Restoring is always a move back to the saved point.
    assert_eq!(calls[2], PathCommand::MoveTo(DVec2::ZERO));
    assert_eq!(calls[3], PathCommand::LineTo(DVec2::new(0.0, 10.0)));
    assert!(calls[1].point().abs_diff_eq(DVec2::new(10.0, 0.0), EPS));
}

#[test]
fn test_digit_multiplier_scales_turn() {
    let grammar = Grammar::new("3+F")
        .with_turn_angle(Angle::from_degrees(10.0))
        .with_step_length(1.0);
    let calls = draw(&grammar);

    let expected = DVec2::new(30f64.to_radians().sin(), 30f64.to_radians().cos());
    assert!(calls[1].point().abs_diff_eq(expected, EPS));
}

#[test]
fn test_multiplier_applies_to_left_turns() {
    let grammar = Grammar::new("12-F")
        .with_turn_angle(Angle::from_degrees(7.5))
        .with_step_length(2.0);
    let calls = draw(&grammar);

    assert!(calls[1].point().abs_diff_eq(DVec2::new(-2.0, 0.0), EPS));
}

#[test]
fn test_unmatched_pop_is_ignored() {
    let grammar = Grammar::new("]F").with_step_length(10.0);
    assert_eq!(
        draw(&grammar),
        vec![
            PathCommand::MoveTo(DVec2::ZERO),
            PathCommand::LineTo(DVec2::new(0.0, 10.0)),
        ]
    );
}

#[test]
fn test_scale_markers_shrink_steps() {
    let grammar = Grammar::new("<F>F>F")
        .with_step_length(4.0)
        .with_depth_scale(0.5);
    let ys: Vec<f64> = draw(&grammar).iter().map(|c| c.point().y).collect();

    // 4 * 0.5, then 4, then 4 / 0.5 once the depth goes negative.
    assert_eq!(ys, vec![0.0, 2.0, 6.0, 14.0]);
}

#[test]
fn test_strategies_agree_on_doubling_rule() {
    let grammar = Grammar::new("F")
        .with_rule('F', "FF")
        .with_step_length(1.0)
        .with_depth_scale(0.5)
        .with_evaluation_depth(2);

    let recursive = draw_with(&grammar, EvaluationStrategy::Recursive);
    let materialized = draw_with(&grammar, EvaluationStrategy::Materialized);

    assert_eq!(recursive.len(), 5);
    assert_same_path(&recursive, &materialized);
    // Each of the four segments is scaled twice: 1 * 0.5^2.
    assert!(recursive[4].point().abs_diff_eq(DVec2::new(0.0, 1.0), EPS));
}

#[test]
fn test_strategies_agree_on_presets() {
    for preset in Preset::ALL {
        let grammar = preset.grammar().with_evaluation_depth(3);
        let recursive = draw_with(&grammar, EvaluationStrategy::Recursive);
        let materialized = draw_with(&grammar, EvaluationStrategy::Materialized);
        assert!(recursive.len() > 1, "{} drew nothing", preset.name());
        assert_same_path(&recursive, &materialized);
    }
}

#[test]
fn test_render_is_deterministic() {
    let grammar = Preset::Tree2.grammar();
    let first = draw(&grammar);
    let second = draw(&grammar);
    assert_eq!(first, second);
}

#[test]
fn test_recorder_matches_stats() {
    let grammar = Preset::QuadricKochIsland.grammar().with_evaluation_depth(2);
    let mut recorder = PathRecorder::new();
    let stats = render(&grammar, &mut recorder).unwrap();

    assert_eq!(stats.segments as usize, recorder.segment_count());
    assert_eq!(stats.moves, 1);
    assert_eq!(stats.max_recursion, 2);

    // The island is a closed figure.
    let last = recorder.commands().last().unwrap().point();
    assert!(last.abs_diff_eq(DVec2::ZERO, 1e-6));
    let (min, max) = recorder.bounds().unwrap();
    assert!(min.x < 0.0 && max.x > 0.0);
}

#[test]
fn test_grammar_json_round_trip() {
    let grammar = Preset::PenroseTiling.grammar();
    let json = serde_json::to_string(&grammar).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for field in [
        "axiom",
        "rules",
        "initialHeading",
        "stepLength",
        "turnAngle",
        "depthScale",
        "evaluationDepth",
    ] {
        assert!(value.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(value["rules"]["F"], "");

    let back: Grammar = serde_json::from_str(&json).unwrap();
    assert_eq!(back, grammar);
}

#[test]
fn test_missing_json_fields_take_defaults() {
    let grammar: Grammar = serde_json::from_str(r#"{"axiom":"FG","rules":{"G":"GG"}}"#).unwrap();
    assert_eq!(
        grammar,
        Grammar::new("FG").with_rule('G', "GG")
    );
}

#[test]
fn test_trailing_rule_digits_only_carry_over_when_materialized() {
    let grammar = Grammar::new("A+F")
        .with_rule('A', "3")
        .with_turn_angle(Angle::from_degrees(30.0))
        .with_step_length(1.0)
        .with_evaluation_depth(1);

    // The recursive walk drops the body's pending "3"; the flat string "<3>+F" keeps it.
    let recursive = draw_with(&grammar, EvaluationStrategy::Recursive);
    let materialized = draw_with(&grammar, EvaluationStrategy::Materialized);

    let turned_30 = DVec2::new(30f64.to_radians().sin(), 30f64.to_radians().cos());
    assert!(recursive[1].point().abs_diff_eq(turned_30, EPS));
    assert!(materialized[1].point().abs_diff_eq(DVec2::new(1.0, 0.0), EPS));
}
