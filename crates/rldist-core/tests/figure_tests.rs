//! Figure generation integration tests

mod common;

use common::fixtures::{bbob_like_records, reference_archive, second_algorithm_records};
use rldist_core::{
    DataSet, EcdfConfig, EcdfError, EcdfFigures, FigureSession, FixedTargetValues,
    RunlengthTargetValues, StyleRef, StyleTable,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

// === Per-dimension panels ===

#[test]
fn test_one_figure_per_dimension() {
    let config = EcdfConfig::default();
    let figures = EcdfFigures::new(&config)
        .generate(&bbob_like_records(), &config.targets())
        .unwrap();

    assert_eq!(figures.iter().map(|f| f.dim).collect::<Vec<_>>(), vec![5, 20]);
    assert_eq!(figures[0].max_evals_factor, 200.0);
    assert_eq!(figures[1].max_evals_factor, 1500.0);
    assert_eq!(figures[0].ceiling, 200.0);
    assert_eq!(figures[1].ceiling, 1500.0);
}

#[test]
fn test_run_length_panel_contents() {
    let config = EcdfConfig::default();
    let figures = EcdfFigures::new(&config)
        .generate(&bbob_like_records(), &config.targets())
        .unwrap();
    let panel = &figures[0].run_length;

    let labels: Vec<_> = panel.series.iter().map(|s| s.label.clone().unwrap()).collect();
    assert_eq!(labels, vec!["1e+01: 2/2", "1e-01: 1/2", "1e-04: 1/2", "1e-08: 0/2"]);
    assert_eq!(panel.annotation, "f1-2,5-D");
    assert_eq!(panel.budget_lines, vec![200.0]);
    assert_eq!(panel.xmin, 1.0);
    assert!(approx(panel.xmax, 200f64.powf(1.05)));

    for (level, series) in panel.series.iter().enumerate() {
        assert_eq!(series.style, StyleRef::run_length(level));
        assert_eq!(series.runs, 4);
        assert_eq!(series.elements.len(), 1);
    }

    // loosest target: run lengths 1, 2, 5, 6 extended flat to the right limit
    let line = panel.series[0].line().unwrap();
    assert_eq!(line.x[..5], [1.0, 2.0, 5.0, 6.0, 6.0]);
    assert_eq!(line.y, vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.0]);
    assert_eq!(line.last_x(), Some(panel.xmax));

    // tightest target was never reached: nothing to draw
    assert!(panel.series[3].line().unwrap().is_empty());
}

#[test]
fn test_final_value_panel_budgets() {
    let config = EcdfConfig::default();
    let figures = EcdfFigures::new(&config)
        .generate(&bbob_like_records(), &config.targets())
        .unwrap();

    // 5-D: full budget, then 10^0 and 10^1 evaluations per dimension
    let panel = &figures[0].final_value;
    let styles: Vec<_> = panel.series.iter().map(|s| s.style).collect();
    assert_eq!(
        styles,
        vec![
            StyleRef::run_length(3),
            StyleRef::unsuccessful(0),
            StyleRef::unsuccessful(1)
        ]
    );
    assert_eq!(panel.xmin, 1.0);
    assert!(approx(panel.xmax, 1e10));
    assert_eq!(panel.annotation, "f1-2,5-D");

    let full = panel.series[0].line().unwrap();
    assert!(approx(full.x[0], 100.0));
    assert!(approx(full.x[3], 2e7));
    assert_eq!(full.last_x(), Some(panel.xmax));

    // 20-D: 1500 x dim gives three decades
    let panel = &figures[1].final_value;
    assert_eq!(panel.series.len(), 4);
    assert_eq!(panel.series[3].style.table, StyleTable::Unsuccessful);
    assert!(approx(panel.xmax, 1e11));
}

#[test]
fn test_zero_gap_is_lifted_to_target() {
    let config = EcdfConfig::default();
    let figures = EcdfFigures::new(&config)
        .generate(&bbob_like_records(), &config.targets())
        .unwrap();

    // 20-D, full budget: gaps 1e-9 and 0 relative to 1e-8
    let full = figures[1].final_value.series[0].line().unwrap();
    assert!(approx(full.x[0], 1e-8));
    assert!(approx(full.x[1], 0.1));
}

// === Aligned x-axes ===

#[test]
fn test_store_xmax_freezes_first_dimension() {
    let config = EcdfConfig {
        store_xmax: true,
        ..EcdfConfig::default()
    };
    let figures = EcdfFigures::new(&config)
        .generate(&bbob_like_records(), &config.targets())
        .unwrap();

    assert_eq!(figures[1].max_evals_factor, 1500.0);
    assert_eq!(figures[1].ceiling, 200.0);
    assert_eq!(figures[1].run_length.xmax, figures[0].run_length.xmax);
    assert_eq!(figures[1].final_value.xmax, figures[0].final_value.xmax);
}

#[test]
fn test_session_persists_across_calls_only_when_kept() {
    let config = EcdfConfig {
        store_xmax: true,
        ..EcdfConfig::default()
    };
    let figures = EcdfFigures::new(&config);
    let targets = config.targets();

    let mut session = FigureSession::new();
    figures
        .generate_with_session(&mut session, &bbob_like_records(), &targets)
        .unwrap();
    assert_eq!(session.run_length_xmax(), Some(200.0));

    let second = figures
        .generate_with_session(&mut session, &second_algorithm_records(), &targets)
        .unwrap();
    assert_eq!(second[0].max_evals_factor, 400.0);
    assert_eq!(second[0].ceiling, 200.0);

    let fresh = figures.generate(&second_algorithm_records(), &targets).unwrap();
    assert_eq!(fresh[0].ceiling, 400.0);
}

#[test]
fn test_without_store_session_is_untouched() {
    let config = EcdfConfig::default();
    let mut session = FigureSession::new();
    EcdfFigures::new(&config)
        .generate_with_session(&mut session, &bbob_like_records(), &config.targets())
        .unwrap();

    assert_eq!(session, FigureSession::default());
}

#[test]
fn test_explicit_xlimit_overrides_ceiling() {
    let config = EcdfConfig {
        runlen_xlimits_max: Some(1e4),
        ..EcdfConfig::default()
    };
    let figures = EcdfFigures::new(&config)
        .generate(&bbob_like_records(), &config.targets())
        .unwrap();

    assert!(figures.iter().all(|f| f.ceiling == 1e4));
    assert_eq!(figures[0].max_evals_factor, 200.0);
}

// === Reference overlay ===

#[test]
fn test_reference_overlay_for_tightest_default_target() {
    let config = EcdfConfig::default();
    let archive = reference_archive();
    let figures = EcdfFigures::new(&config)
        .with_reference(Some(&archive))
        .generate(&bbob_like_records(), &config.targets())
        .unwrap();

    let reference = &figures[0].run_length.reference;
    assert_eq!(reference.len(), 1);
    assert_eq!(reference[0].algorithm, "REF-1");
    let curve = &reference[0].element.curve;
    assert_eq!(curve.x[..4], [10.0, 20.0, 30.0, 30.0]);
    assert_eq!(curve.last_y(), Some(0.75));
    assert_eq!(curve.last_x(), Some(figures[0].run_length.xmax));

    // no reference data for 20-D
    assert!(figures[1].run_length.reference.is_empty());
}

#[test]
fn test_no_reference_overlay_without_archive_or_other_targets() {
    let config = EcdfConfig::default();
    let archive = reference_archive();

    let without_archive = EcdfFigures::new(&config)
        .generate(&bbob_like_records(), &config.targets())
        .unwrap();
    assert!(without_archive[0].run_length.reference.is_empty());

    let loose_targets = FixedTargetValues::new(vec![10.0, 1e-1]);
    let figures = EcdfFigures::new(&config)
        .with_reference(Some(&archive))
        .generate(&bbob_like_records(), &loose_targets)
        .unwrap();
    assert!(figures[0].run_length.reference.is_empty());
}

// === Target providers ===

#[test]
fn test_runlength_based_targets_use_factor_labels() {
    let config = EcdfConfig::default();
    let archive = reference_archive();
    let targets = RunlengthTargetValues::new(vec![0.5, 10.0])
        .with_targets(1, 5, vec![10.0, 1e-1])
        .with_targets(2, 5, vec![10.0, 1e-1])
        .with_targets(1, 20, vec![10.0, 1e-8]);

    let figures = EcdfFigures::new(&config)
        .with_reference(Some(&archive))
        .generate(&bbob_like_records(), &targets)
        .unwrap();

    let labels: Vec<_> = figures[0]
        .run_length
        .series
        .iter()
        .map(|s| s.label.clone().unwrap())
        .collect();
    assert_eq!(labels, vec!["0.5: 2/2", "10: 1/2"]);
    assert_eq!(figures[1].run_length.series[1].label.as_deref(), Some("10: 1/1"));
    assert!(figures[0].run_length.reference.is_empty());
}

#[test]
fn test_missing_target_aborts_generation() {
    let config = EcdfConfig::default();
    let targets = RunlengthTargetValues::new(vec![1.0]).with_targets(1, 5, vec![1e-1]);

    let result = EcdfFigures::new(&config).generate(&bbob_like_records(), &targets);
    assert!(matches!(result, Err(EcdfError::Target(_))));
}

#[test]
fn test_empty_collection_gives_no_figures() {
    let config = EcdfConfig::default();
    let records: Vec<DataSet> = Vec::new();
    let figures = EcdfFigures::new(&config)
        .generate(&records, &config.targets())
        .unwrap();
    assert!(figures.is_empty());
}

// === Two-algorithm comparison ===

#[test]
fn test_compare_common_dimensions() {
    let config = EcdfConfig::default();
    let archive = reference_archive();
    let figures = EcdfFigures::new(&config)
        .with_reference(Some(&archive))
        .compare(&bbob_like_records(), &second_algorithm_records(), &config.targets())
        .unwrap();

    assert_eq!(figures.len(), 1);
    let figure = &figures[0];
    assert_eq!(figure.dim, 5);
    assert_eq!(figure.max_evals_factor, 400.0);
    assert_eq!(figure.panel.budget_lines, vec![200.0, 400.0]);
    assert_eq!(figure.panel.annotation, "f1-2");
    assert_eq!(figure.panel.reference.len(), 1);

    let series = &figure.panel.series;
    assert_eq!(series.len(), 8);
    assert_eq!(series[0].label, None);
    assert_eq!(series[0].algorithm.as_deref(), Some("ALG-A"));
    assert_eq!(series[1].label.as_deref(), Some("1e+01"));
    assert_eq!(series[1].algorithm.as_deref(), Some("ALG-B"));
    assert_eq!(series[0].style, series[1].style);
    assert!(series.iter().all(|s| s.elements.len() == 2));
}

#[test]
fn test_compare_markers_extend_on_log_grid() {
    let config = EcdfConfig::default();
    let figures = EcdfFigures::new(&config)
        .compare(&bbob_like_records(), &second_algorithm_records(), &config.targets())
        .unwrap();
    let panel = &figures[0].panel;

    // ALG-A at the loosest target: one marker at 10^0, then the grid from
    // that last marker up to the right limit
    let markers = &panel.series[0].elements[1].curve;
    assert_eq!(markers.len(), 4);
    assert!(approx(markers.x[2], 10.0));
    assert!(approx(markers.x[3], 100.0));
    assert!(markers.y.iter().all(|&y| y == 0.25));

    let line = &panel.series[0].elements[0].curve;
    assert_eq!(line.last_x(), Some(panel.xmax));
}

#[test]
fn test_compare_freezes_ceiling_across_dimensions() {
    let config = EcdfConfig {
        store_xmax: true,
        ..EcdfConfig::default()
    };
    let records = bbob_like_records();
    let figures = EcdfFigures::new(&config)
        .compare(&records, &records, &config.targets())
        .unwrap();

    assert_eq!(figures.iter().map(|f| f.dim).collect::<Vec<_>>(), vec![5, 20]);
    assert_eq!(figures[1].max_evals_factor, 1500.0);
    assert_eq!(figures[1].ceiling, 200.0);
    assert_eq!(figures[1].panel.xmax, figures[0].panel.xmax);
}

#[test]
fn test_compare_session_persists_across_calls_only_when_kept() {
    let config = EcdfConfig {
        store_xmax: true,
        ..EcdfConfig::default()
    };
    let figures = EcdfFigures::new(&config);
    let targets = config.targets();
    let first = bbob_like_records();
    let second = second_algorithm_records();

    let mut session = FigureSession::new();
    let frozen = figures
        .compare_with_session(&mut session, &first, &second, &targets)
        .unwrap();
    assert_eq!(frozen[0].ceiling, 400.0);
    assert_eq!(session.run_length_xmax(), Some(400.0));

    let reused = figures
        .compare_with_session(&mut session, &first, &first, &targets)
        .unwrap();
    assert_eq!(reused[0].max_evals_factor, 200.0);
    assert_eq!(reused[0].ceiling, 400.0);

    let fresh = figures.compare(&first, &first, &targets).unwrap();
    assert_eq!(fresh[0].ceiling, 200.0);
    assert!(approx(fresh[0].panel.xmax, 200f64.powf(1.05)));
}

#[test]
fn test_compare_without_store_session_is_untouched() {
    let config = EcdfConfig::default();
    let mut session = FigureSession::new();
    let figures = EcdfFigures::new(&config)
        .compare_with_session(
            &mut session,
            &bbob_like_records(),
            &bbob_like_records(),
            &config.targets(),
        )
        .unwrap();

    assert_eq!(session, FigureSession::default());
    assert_eq!(figures[1].ceiling, 1500.0);
}

#[test]
fn test_compare_explicit_xlimit_overrides_ceiling() {
    let config = EcdfConfig {
        runlen_xlimits_max: Some(1e4),
        ..EcdfConfig::default()
    };
    let figures = EcdfFigures::new(&config)
        .compare(&bbob_like_records(), &second_algorithm_records(), &config.targets())
        .unwrap();

    assert_eq!(figures[0].max_evals_factor, 400.0);
    assert_eq!(figures[0].ceiling, 1e4);
    assert!(approx(figures[0].panel.xmax, 1e4f64.powf(1.05)));
}
