use chem_virtual_lab::analysis::{AnalysisError, TableKind};
use chem_virtual_lab::quantity::snap_ml;
use chem_virtual_lab::titration::{
    analysis::{self, Endpoints},
    model::{self, ConductanceMeter},
    observation::{TitrationRow, TitrationTable},
    results,
};
use proptest::prelude::*;

fn volumes() -> impl DoubleEndedIterator<Item = f64> {
    (0..=40).map(|k| snap_ml(k as f64 * model::STEP_ML))
}

fn table_from(meter: &mut ConductanceMeter, vols: impl Iterator<Item = f64>) -> TitrationTable {
    let mut table = TitrationTable::new();
    for v in vols {
        table.insert(TitrationRow {
            naoh_ml: v,
            conductance: meter.read(v),
        });
    }
    table
}

fn noiseless_table() -> TitrationTable {
    table_from(&mut ConductanceMeter::noiseless(), volumes())
}

#[test]
fn model_values_around_the_kink() {
    assert!((model::conductance_ms(0.0) - 0.8).abs() < 1e-12);
    assert!((model::conductance_ms(4.0) - 0.4).abs() < 1e-12);
    assert!((model::conductance_ms(4.2) - 0.63).abs() < 1e-12);
    assert!((model::conductance_ms(8.0) - 1.2).abs() < 1e-12);
}

#[test]
fn derivative_is_piecewise_constant() {
    let table = noiseless_table();
    let d = analysis::slopes(&table.by_volume());
    assert_eq!(d.len(), 40);
    for &(v, s) in &d {
        let expected = if v <= 4.0 + 1e-9 {
            -0.1
        } else if (v - 4.2).abs() < 1e-9 {
            1.15
        } else {
            0.15
        };
        assert!((s - expected).abs() < 1e-9, "v={v} slope={s}");
    }
}

#[test]
fn noiseless_endpoints() {
    let ep = analysis::detect_endpoints(&noiseless_table()).expect("endpoints");
    assert!((ep.hcl_ml - 4.0).abs() < 1e-9, "hcl={}", ep.hcl_ml);
    assert!((ep.ch3cooh_ml - 4.2).abs() < 1e-9, "ch3cooh={}", ep.ch3cooh_ml);
}

#[test]
fn insertion_order_does_not_matter() {
    let mut meter = ConductanceMeter::noiseless();
    let reversed: Vec<f64> = volumes().rev().collect();
    let table = table_from(&mut meter, reversed.into_iter());
    let ep = analysis::detect_endpoints(&table).expect("endpoints");
    assert_eq!(ep, analysis::detect_endpoints(&noiseless_table()).unwrap());
}

#[test]
fn fewer_than_two_rows_is_insufficient() {
    let mut table = TitrationTable::new();
    let err = analysis::detect_endpoints(&table).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InsufficientData {
            table: TableKind::Titration,
            required: 2,
            available: 0,
        }
    );
    table.insert(TitrationRow {
        naoh_ml: 0.0,
        conductance: 0.8,
    });
    assert!(matches!(
        analysis::detect_endpoints(&table),
        Err(AnalysisError::InsufficientData { available: 1, .. })
    ));
    assert!(results::analyze(0.1, &table).is_err());
}

#[test]
fn acid_masses_from_fixed_endpoints() {
    let content = results::acid_content(
        0.1,
        &Endpoints {
            hcl_ml: 3.0,
            ch3cooh_ml: 6.0,
        },
    );
    assert!((content.hcl_mass_g - 0.1095).abs() < 1e-12);
    assert!((content.ch3cooh_mass_g - 0.18).abs() < 1e-12);
}

#[test]
fn standardization_uses_oxalic_acid_reference() {
    let n = results::naoh_normality(18.5);
    assert!((n - 25.0 * 0.05 / 18.5).abs() < 1e-15);
    assert!((results::naoh_normality(12.5) - 0.1).abs() < 1e-15);
}

#[test]
fn repeated_volume_is_not_duplicated() {
    let mut table = TitrationTable::new();
    assert!(table.insert(TitrationRow {
        naoh_ml: 1.0,
        conductance: 0.7,
    }));
    assert!(!table.insert(TitrationRow {
        naoh_ml: 1.0000001,
        conductance: 0.9,
    }));
    assert_eq!(table.len(), 1);
    assert!((table.rows()[0].conductance - 0.7).abs() < 1e-12);
}

proptest! {
    #[test]
    fn noisy_readings_stay_within_amplitude(seed in any::<u64>(), v in 0.0f64..=8.0) {
        let mut meter = ConductanceMeter::with_noise(0.01, Some(seed));
        let reading = meter.read(v);
        prop_assert!((reading - model::conductance_ms(v)).abs() <= 0.01 + 1e-12);
    }

    #[test]
    fn acetic_endpoint_survives_meter_noise(seed in any::<u64>()) {
        let mut meter = ConductanceMeter::with_noise(0.01, Some(seed));
        let ep = analysis::detect_endpoints(&table_from(&mut meter, volumes())).unwrap();
        prop_assert!((ep.ch3cooh_ml - 4.2).abs() < 1e-9);
    }

    #[test]
    fn hcl_endpoint_survives_meter_noise(seed in any::<u64>()) {
        let mut meter = ConductanceMeter::with_noise(0.01, Some(seed));
        let ep = analysis::detect_endpoints(&table_from(&mut meter, volumes())).unwrap();
        prop_assert!((ep.hcl_ml - 4.0).abs() < 1e-9, "hcl={}", ep.hcl_ml);
    }
}

#[test]
fn noisy_masses_match_the_noiseless_run() {
    let mut meter = ConductanceMeter::with_noise(0.01, Some(42));
    let (ep, content) = results::analyze(0.1, &table_from(&mut meter, volumes())).unwrap();
    assert!((ep.hcl_ml - 4.0).abs() < 1e-9);
    assert!((content.hcl_mass_g - 0.146).abs() < 1e-9);
    assert!((content.ch3cooh_mass_g - 0.012).abs() < 1e-9);
}
