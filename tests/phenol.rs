use chem_virtual_lab::analysis::{AnalysisError, TableKind};
use chem_virtual_lab::phenol::{
    analysis,
    model::{self, MiscibilityReading},
    observation::{PhenolRow, PhenolTable},
};
use proptest::prelude::*;

/// P% 조성의 모델 행. 페놀 P ml + 물 (100-P) ml.
fn row_at(percent: f64) -> PhenolRow {
    PhenolRow::simulated(percent, 100.0 - percent)
}

fn decile_rows() -> Vec<PhenolRow> {
    (1..=9).map(|k| row_at(k as f64 * 10.0)).collect()
}

proptest! {
    #[test]
    fn reappearance_is_always_below_disappearance(p in 0.01f64..99.99) {
        let r = model::miscibility_temperatures(p);
        prop_assert!(r.reappear_c < r.disappear_c);
        prop_assert!(r.mean_c() > r.reappear_c && r.mean_c() < r.disappear_c);
    }

    #[test]
    fn lab_volumes_give_a_proper_percentage(phenol in 5.0f64..=10.0, water in 3.0f64..=36.0) {
        let p = model::percent_phenol(phenol, water);
        prop_assert!(p > 0.0 && p < 100.0);
    }
}

#[test]
fn cst_lies_strictly_inside_the_decile_rows() {
    let rows = decile_rows();
    let cst = analysis::critical_solution_point(&rows).expect("cst");
    assert!((cst.percent_phenol - 30.0).abs() < 1e-9);
    assert!((cst.temperature_c - 68.25).abs() < 1e-9);
    assert!(cst.percent_phenol > rows[0].percent_phenol);
    assert!(cst.percent_phenol < rows[rows.len() - 1].percent_phenol);
}

#[test]
fn planted_maximum_is_found() {
    let mut rows = decile_rows();
    rows.insert(
        6,
        PhenolRow::new(
            65.0,
            35.0,
            MiscibilityReading {
                disappear_c: 90.0,
                reappear_c: 88.0,
            },
        ),
    );
    let cst = analysis::critical_solution_point(&rows).expect("cst");
    assert!((cst.temperature_c - 89.0).abs() < 1e-9);
    assert!((cst.percent_phenol - 65.0).abs() < 1e-9);
}

#[test]
fn duplicate_maxima_resolve_to_the_first_row() {
    let reading = MiscibilityReading {
        disappear_c: 71.0,
        reappear_c: 69.0,
    };
    let rows = vec![
        row_at(10.0),
        PhenolRow::new(25.0, 75.0, reading),
        row_at(50.0),
        PhenolRow::new(40.0, 60.0, reading),
    ];
    let cst = analysis::critical_solution_point(&rows).expect("cst");
    assert!((cst.percent_phenol - 25.0).abs() < 1e-9);
}

#[test]
fn empty_table_reports_insufficient_data() {
    let err = analysis::critical_solution_point(&[]).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InsufficientData {
            table: TableKind::Phenol,
            required: 1,
            available: 0,
        }
    );
    assert!(analysis::mean_hysteresis_c(&[]).is_err());
}

#[test]
fn hysteresis_is_averaged_over_rows() {
    // 이력 = 2 + 0.05P → 10%: 2.5, 30%: 3.5
    let rows = vec![row_at(10.0), row_at(30.0)];
    let h = analysis::mean_hysteresis_c(&rows).expect("hysteresis");
    assert!((h - 3.0).abs() < 1e-9);
}

#[test]
fn unknown_sample_is_located_on_both_branches() {
    let rows = decile_rows();
    let t = model::mean_temp_c(45.0);
    let est = analysis::estimate_unknown(&rows, t).expect("estimate");
    let water_rich = est.water_rich_percent.expect("water-rich branch");
    let phenol_rich = est.phenol_rich_percent.expect("phenol-rich branch");
    assert!(water_rich > 20.0 && water_rich < 30.0, "water_rich={water_rich}");
    // 30~70% 구간에서 평균 곡선은 선형이므로 정확히 되돌아온다.
    assert!((phenol_rich - 45.0).abs() < 1e-9, "phenol_rich={phenol_rich}");
    assert!(!est.above_critical());
}

#[test]
fn unknown_sample_above_cst_has_no_crossing() {
    let est = analysis::estimate_unknown(&decile_rows(), 80.0).expect("estimate");
    assert!(est.above_critical());
}

#[test]
fn unknown_estimate_needs_two_rows() {
    let err = analysis::estimate_unknown(&[row_at(30.0)], 60.0).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InsufficientData {
            required: 2,
            available: 1,
            ..
        }
    ));
}

#[test]
fn table_rejects_repeated_volume_pair_and_sorts_by_percent() {
    let mut table = PhenolTable::new();
    assert!(table.insert(PhenolRow::simulated(5.0, 35.0)));
    assert!(table.insert(PhenolRow::simulated(5.0, 3.0)));
    assert!(!table.insert(PhenolRow::simulated(5.0, 35.0)));
    assert_eq!(table.len(), 2);
    let sorted = table.by_percent();
    assert!(sorted[0].percent_phenol < sorted[1].percent_phenol);
    assert!((sorted[0].water_ml - 35.0).abs() < 1e-12);
}

#[test]
fn unknown_branches_split_at_the_reported_cst_row() {
    let reading = MiscibilityReading {
        disappear_c: 71.0,
        reappear_c: 69.0,
    };
    let rows = vec![
        row_at(10.0),
        PhenolRow::new(40.0, 60.0, reading),
        row_at(50.0),
        PhenolRow::new(25.0, 75.0, reading),
    ];
    let cst = analysis::critical_solution_point(&rows).expect("cst");
    assert!((cst.percent_phenol - 40.0).abs() < 1e-9);

    let est = analysis::estimate_unknown(&rows, cst.temperature_c).expect("estimate");
    let phenol_rich = est.phenol_rich_percent.expect("phenol-rich branch");
    assert!((phenol_rich - cst.percent_phenol).abs() < 1e-9, "phenol_rich={phenol_rich}");
}
