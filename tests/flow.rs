use chem_virtual_lab::i18n::Translator;
use chem_virtual_lab::page::{Action, PageId};
use chem_virtual_lab::router::{self, RouteError};
use chem_virtual_lab::session::Session;
use chem_virtual_lab::titration::model::ConductanceMeter;
use chem_virtual_lab::titration::results::{self, DEFAULT_NAOH_NORMALITY};
use chem_virtual_lab::view::{Block, FieldId, FormValues, NoticeLevel, PageView};

/// 호스트처럼 화면의 기본 입력값을 그대로 제출한다.
fn press(session: &mut Session, action: Action, tr: &Translator) -> PageId {
    let form = FormValues::defaults_of(&router::view(session, tr));
    router::dispatch(session, action, &form, tr)
        .unwrap_or_else(|e| panic!("{action} on {}: {e}", session.current_page))
}

fn has_warning(view: &PageView) -> bool {
    view.blocks.iter().any(|b| {
        matches!(
            b,
            Block::Notice {
                level: NoticeLevel::Warning,
                ..
            }
        )
    })
}

/// 페놀-물 측정 반복을 끝까지 돌리고 반복 횟수를 돌려준다.
fn run_phenol_loop(session: &mut Session, tr: &Translator) -> usize {
    assert_eq!(press(session, Action::StartPhenol, tr), PageId::PhenolIntro);
    assert_eq!(press(session, Action::StartExperiment, tr), PageId::PhenolAddReagents);
    let mut iterations = 0;
    loop {
        iterations += 1;
        assert_eq!(press(session, Action::HeatMixture, tr), PageId::PhenolObserveDisappear);
        assert_eq!(
            press(session, Action::CoolMixture, tr),
            PageId::PhenolObserveReappearRecord
        );
        match press(session, Action::RecordObservation, tr) {
            PageId::PhenolAddReagents => assert!(iterations < 100, "loop never ends"),
            PageId::PhenolTable => return iterations,
            other => panic!("unexpected page {other}"),
        }
    }
}

fn run_titration_loop(session: &mut Session, tr: &Translator) -> usize {
    assert_eq!(press(session, Action::StartTitration, tr), PageId::CondIntro);
    assert_eq!(press(session, Action::StartExperiment, tr), PageId::CondStandardize);
    let form = FormValues::new().with(FieldId::NaohUsed, 12.5);
    router::dispatch(session, Action::CalculateNormality, &form, tr).expect("standardize");
    assert!(session.titration.standardized);
    assert!((session.titration.naoh_normality - 0.1).abs() < 1e-12);
    assert_eq!(press(session, Action::ProceedToTitration, tr), PageId::CondTitrate);
    let mut iterations = 0;
    loop {
        iterations += 1;
        match press(session, Action::RecordMeasurement, tr) {
            PageId::CondTitrate => assert!(iterations < 100, "loop never ends"),
            PageId::CondTable => return iterations,
            other => panic!("unexpected page {other}"),
        }
    }
}

#[test]
fn phenol_loop_records_seventeen_trials() {
    let tr = Translator::new("en");
    let mut session = Session::new();
    let iterations = run_phenol_loop(&mut session, &tr);
    assert_eq!(iterations, 17);
    assert_eq!(session.phenol.table.len(), 17);
    assert!((session.phenol.water_volume - 36.0).abs() < 1e-9);
    let waters: Vec<f64> = session.phenol.table.rows().iter().map(|r| r.water_ml).collect();
    assert!((waters[0] - 3.0).abs() < 1e-9);
    assert!((waters[16] - 35.0).abs() < 1e-9);
}

#[test]
fn last_phenol_trial_offers_finish_label() {
    let tr = Translator::new("en");
    let mut session = Session::new();
    session.current_page = PageId::PhenolObserveReappearRecord;
    session.phenol.water_volume = 35.0;
    let view = router::view(&session, &tr);
    assert_eq!(view.actions[0].label, "Record & Show Observation Table");
    session.phenol.water_volume = 33.0;
    let view = router::view(&session, &tr);
    assert_eq!(view.actions[0].label, "Record & Add More Water (+2 ml)");
}

#[test]
fn phenol_results_and_unknown_estimate() {
    let tr = Translator::new("en");
    let mut session = Session::new();
    run_phenol_loop(&mut session, &tr);
    assert_eq!(press(&mut session, Action::PlotPhaseDiagram, &tr), PageId::PhenolGraph);
    let graph = router::view(&session, &tr);
    let chart = graph.charts().next().expect("phase diagram");
    assert_eq!(chart.series[0].points.len(), 17);
    assert_eq!(chart.markers.len(), 1);

    assert_eq!(press(&mut session, Action::ShowResults, &tr), PageId::PhenolResults);
    let view = router::view(&session, &tr);
    assert!(!has_warning(&view));
    assert!(view.offers(Action::EstimateUnknown));

    let form = FormValues::new().with(FieldId::UnknownTemperature, 66.0);
    let page = router::dispatch(&mut session, Action::EstimateUnknown, &form, &tr).unwrap();
    assert_eq!(page, PageId::PhenolResults);
    assert_eq!(session.phenol.unknown_temp, Some(66.0));
    assert_eq!(press(&mut session, Action::ReturnHome, &tr), PageId::Home);
}

#[test]
fn starting_again_clears_the_previous_run() {
    let tr = Translator::new("en");
    let mut session = Session::new();
    run_phenol_loop(&mut session, &tr);
    session.current_page = PageId::Home;
    assert_eq!(press(&mut session, Action::StartPhenol, &tr), PageId::PhenolIntro);
    assert!(session.phenol.table.is_empty());
    assert!((session.phenol.water_volume - 3.0).abs() < 1e-12);
}

fn assert_titration_fresh(session: &Session) {
    assert!(session.titration.table.is_empty());
    assert_eq!(session.titration.naoh_volume_added, 0.0);
    assert!(!session.titration.standardized);
    assert_eq!(session.titration.naoh_normality, DEFAULT_NAOH_NORMALITY);
}

#[test]
fn restarting_titration_from_home_clears_the_previous_run() {
    let tr = Translator::new("en");
    let mut session = Session::with_meter(ConductanceMeter::with_noise(0.01, Some(3)));
    run_titration_loop(&mut session, &tr);
    for action in [
        Action::PlotTitrationCurve,
        Action::ShowCalculations,
        Action::ShowResults,
    ] {
        press(&mut session, action, &tr);
    }
    assert_eq!(press(&mut session, Action::ReturnHome, &tr), PageId::Home);
    assert_eq!(session.titration.table.len(), 41);

    assert_eq!(press(&mut session, Action::StartTitration, &tr), PageId::CondIntro);
    assert_titration_fresh(&session);
    assert!(session.titration.meter.is_noisy());
}

#[test]
fn starting_the_experiment_from_intro_clears_stale_state() {
    let tr = Translator::new("en");
    let mut session = Session::new();
    run_titration_loop(&mut session, &tr);
    session.current_page = PageId::CondIntro;
    assert_eq!(press(&mut session, Action::StartExperiment, &tr), PageId::CondStandardize);
    assert_titration_fresh(&session);
}

#[test]
fn titration_loop_records_forty_one_readings() {
    let tr = Translator::new("en");
    let mut session = Session::new();
    let iterations = run_titration_loop(&mut session, &tr);
    assert_eq!(iterations, 41);
    assert_eq!(session.titration.table.len(), 41);
    assert!((session.titration.naoh_volume_added - 8.0).abs() < 1e-12);

    assert_eq!(press(&mut session, Action::PlotTitrationCurve, &tr), PageId::CondGraph);
    let view = router::view(&session, &tr);
    let chart = view.charts().next().expect("titration curve");
    let xs: Vec<f64> = chart.markers.iter().map(|m| m.x).collect();
    assert_eq!(xs.len(), 2);
    assert!((xs[0] - 4.0).abs() < 1e-9 && (xs[1] - 4.2).abs() < 1e-9);
    assert!(chart.markers.iter().all(|m| m.y.is_none()));

    assert_eq!(press(&mut session, Action::ShowCalculations, &tr), PageId::CondCalc);
    assert_eq!(press(&mut session, Action::ShowResults, &tr), PageId::CondResults);
    let (_, content) = results::analyze(0.1, &session.titration.table).unwrap();
    assert!((content.hcl_mass_g - 0.146).abs() < 1e-9);
    assert!((content.ch3cooh_mass_g - 0.012).abs() < 1e-9);
    let view = router::view(&session, &tr);
    assert!(view
        .blocks
        .iter()
        .any(|b| matches!(b, Block::Notice { text, .. } if text.contains("0.1460"))));
    assert_eq!(press(&mut session, Action::ReturnHome, &tr), PageId::Home);
}

#[test]
fn proceeding_without_calculation_standardizes_from_field() {
    let tr = Translator::new("en");
    let mut session = Session::new();
    press(&mut session, Action::StartTitration, &tr);
    press(&mut session, Action::StartExperiment, &tr);
    assert!(!session.titration.standardized);
    assert_eq!(press(&mut session, Action::ProceedToTitration, &tr), PageId::CondTitrate);
    assert!(session.titration.standardized);
    assert!((session.titration.naoh_normality - 1.25 / 18.5).abs() < 1e-12);
}

#[test]
fn resubmitting_a_volume_does_not_duplicate_rows() {
    let tr = Translator::new("en");
    let mut session = Session::new();
    session.current_page = PageId::CondTitrate;
    let form = FormValues::new().with(FieldId::NaohAdded, 1.0);
    router::dispatch(&mut session, Action::RecordMeasurement, &form, &tr).unwrap();
    router::dispatch(&mut session, Action::RecordMeasurement, &form, &tr).unwrap();
    assert_eq!(session.titration.table.len(), 1);
    assert!((session.titration.naoh_volume_added - 1.2).abs() < 1e-12);
}

#[test]
fn action_not_on_page_is_rejected_without_side_effects() {
    let tr = Translator::new("en");
    let mut session = Session::new();
    let err = router::dispatch(&mut session, Action::RecordMeasurement, &FormValues::new(), &tr)
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::ActionNotOffered {
            page: PageId::Home,
            action: Action::RecordMeasurement,
        }
    );
    assert_eq!(session.current_page, PageId::Home);
    assert!(session.titration.table.is_empty());
}

#[test]
fn insufficient_data_offers_recovery() {
    let tr = Translator::new("en");
    let mut session = Session::new();

    session.current_page = PageId::PhenolGraph;
    let view = router::view(&session, &tr);
    assert!(has_warning(&view));
    assert!(!view.offers(Action::ShowResults));
    assert_eq!(
        press(&mut session, Action::BackToMeasurements, &tr),
        PageId::PhenolAddReagents
    );

    session.current_page = PageId::CondResults;
    let view = router::view(&session, &tr);
    assert!(has_warning(&view));
    assert_eq!(press(&mut session, Action::BackToMeasurements, &tr), PageId::CondTitrate);
}

#[test]
fn every_page_renders_in_korean_without_missing_strings() {
    let tr = Translator::new("ko");
    let mut session = Session::new();
    let check = |session: &Session| {
        let view = router::view(session, &tr);
        let texts = view.blocks.iter().filter_map(|b| match b {
            Block::Text(t) | Block::Notice { text: t, .. } => Some(t.as_str()),
            _ => None,
        });
        for text in std::iter::once(view.title.as_str()).chain(texts) {
            assert!(!text.contains("[누락된 문자열]"), "{}: {text}", view.page);
            assert!(!text.contains('{'), "unfilled placeholder on {}: {text}", view.page);
        }
    };
    check(&session);
    run_phenol_loop(&mut session, &tr);
    for action in [Action::PlotPhaseDiagram, Action::ShowResults] {
        check(&session);
        press(&mut session, action, &tr);
    }
    check(&session);
    session.current_page = PageId::Home;
    run_titration_loop(&mut session, &tr);
    for action in [
        Action::PlotTitrationCurve,
        Action::ShowCalculations,
        Action::ShowResults,
    ] {
        check(&session);
        press(&mut session, action, &tr);
    }
    check(&session);
}
