use crate::analysis::AnalysisError;
use crate::i18n::{keys, Translator};
use crate::page::{Action, PageId};
use crate::quantity::{reached, snap_ml};
use crate::router::{Page, RouteError};
use crate::session::Session;
use crate::view::{
    Chart, FieldBounds, FieldId, FormValues, Marker, NoticeLevel, PageView, Series, SeriesStyle,
    TableView,
};

use super::advance_naoh;
use super::analysis::{self, Endpoints};
use super::model::{MAX_ML, STEP_ML};
use super::observation::{TitrationRow, TitrationTable};
use super::results::{self, OXALIC_NORMALITY, OXALIC_VOLUME_ML};

pub const NAOH_USED_BOUNDS: FieldBounds = FieldBounds::new(0.1, 50.0, 0.1);
pub const NAOH_ADDED_BOUNDS: FieldBounds = FieldBounds::new(0.0, MAX_ML, STEP_ML);
/// 표준화 화면의 NaOH 소비량 기본값(ml).
pub const DEFAULT_NAOH_USED_ML: f64 = 18.5;

fn back_to_measurements(view: PageView, tr: &Translator, err: &AnalysisError) -> PageView {
    view.notice(NoticeLevel::Warning, err.localized(tr))
        .action(Action::BackToMeasurements, tr.t(keys::ACTION_BACK_TO_MEASUREMENTS))
}

/// NaOH 오름차순 측정 표.
pub fn table_view(table: &TitrationTable, tr: &Translator) -> TableView {
    TableView {
        headers: vec![
            tr.t(keys::COND_COL_NAOH).into(),
            tr.t(keys::COND_COL_CONDUCTANCE).into(),
        ],
        rows: table
            .by_volume()
            .iter()
            .map(|r| vec![r.naoh_ml, r.conductance])
            .collect(),
        precision: 2,
        export_name: "conductometric_titration.csv",
    }
}

/// 적정 곡선. 두 종말점을 세로선으로 표시한다.
pub fn titration_curve(table: &TitrationTable, tr: &Translator) -> Result<Chart, AnalysisError> {
    let endpoints = analysis::detect_endpoints(table)?;
    Ok(Chart {
        title: tr.t(keys::COND_CHART_TITLE).into(),
        x_label: tr.t(keys::COND_AXIS_X).into(),
        y_label: tr.t(keys::COND_AXIS_Y).into(),
        series: vec![Series {
            name: tr.t(keys::COND_SERIES).into(),
            points: table
                .by_volume()
                .iter()
                .map(|r| (r.naoh_ml, r.conductance))
                .collect(),
            style: SeriesStyle::Line,
        }],
        markers: vec![
            Marker {
                label: tr.tf(
                    keys::COND_HCL_MARKER,
                    &[("volume", format!("{:.2}", endpoints.hcl_ml))],
                ),
                x: endpoints.hcl_ml,
                y: None,
            },
            Marker {
                label: tr.tf(
                    keys::COND_CH3COOH_MARKER,
                    &[("volume", format!("{:.2}", endpoints.ch3cooh_ml))],
                ),
                x: endpoints.ch3cooh_ml,
                y: None,
            },
        ],
    })
}

pub struct Intro;

impl Page for Intro {
    fn view(&self, _session: &Session, tr: &Translator) -> PageView {
        PageView::new(PageId::CondIntro, tr.t(keys::COND_INTRO_TITLE))
            .text(tr.t(keys::COND_INTRO_AIM))
            .text(tr.t(keys::COND_INTRO_THEORY))
            .action(Action::StartExperiment, tr.t(keys::ACTION_START_EXPERIMENT))
            .action(Action::ReturnHome, tr.t(keys::ACTION_RETURN_HOME))
    }

    fn act(
        &self,
        session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::StartExperiment => {
                session.reset_titration();
                Ok(PageId::CondStandardize)
            }
            Action::ReturnHome => Ok(PageId::Home),
            other => Err(RouteError::not_offered(PageId::CondIntro, other)),
        }
    }
}

pub struct Standardize;

impl Page for Standardize {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let t = &session.titration;
        let view = PageView::new(PageId::CondStandardize, tr.t(keys::COND_STD_TITLE)).text(tr.tf(
            keys::COND_STD_TEXT,
            &[
                ("volume", format!("{OXALIC_VOLUME_ML:.1}")),
                ("normality", format!("{OXALIC_NORMALITY:.2}")),
            ],
        ));
        let normality = format!("{:.4}", t.naoh_normality);
        let view = if t.standardized {
            view.notice(
                NoticeLevel::Success,
                tr.tf(keys::COND_NORMALITY, &[("normality", normality)]),
            )
        } else {
            view.notice(
                NoticeLevel::Info,
                tr.tf(keys::COND_NORMALITY_DEFAULT, &[("normality", normality)]),
            )
        };
        view.field(
            FieldId::NaohUsed,
            tr.t(keys::COND_FIELD_NAOH_USED),
            NAOH_USED_BOUNDS,
            DEFAULT_NAOH_USED_ML,
        )
        .action(Action::CalculateNormality, tr.t(keys::ACTION_CALCULATE_NORMALITY))
        .action(Action::ProceedToTitration, tr.t(keys::ACTION_PROCEED_TO_TITRATION))
    }

    fn act(
        &self,
        session: &mut Session,
        action: Action,
        form: &FormValues,
    ) -> Result<PageId, RouteError> {
        let standardize = |session: &mut Session| {
            let used = form.read(FieldId::NaohUsed, &NAOH_USED_BOUNDS, DEFAULT_NAOH_USED_ML);
            session.titration.naoh_normality = results::naoh_normality(used);
            session.titration.standardized = true;
            tracing::info!(
                naoh_used_ml = used,
                normality = session.titration.naoh_normality,
                "NaOH standardized"
            );
        };
        match action {
            Action::CalculateNormality => {
                standardize(session);
                Ok(PageId::CondStandardize)
            }
            Action::ProceedToTitration => {
                if !session.titration.standardized {
                    standardize(session);
                }
                Ok(PageId::CondTitrate)
            }
            other => Err(RouteError::not_offered(PageId::CondStandardize, other)),
        }
    }
}

pub struct Titrate;

impl Page for Titrate {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let t = &session.titration;
        let mut view = PageView::new(PageId::CondTitrate, tr.t(keys::COND_TITRATE_TITLE)).text(
            tr.tf(
                keys::COND_PROGRESS,
                &[
                    ("count", t.table.len().to_string()),
                    ("next", format!("{:.1}", t.naoh_volume_added)),
                ],
            ),
        );
        if let Some(last) = t.table.rows().last() {
            view = view.notice(
                NoticeLevel::Info,
                tr.tf(
                    keys::COND_LAST_READING,
                    &[
                        ("volume", format!("{:.1}", last.naoh_ml)),
                        ("conductance", format!("{:.3}", last.conductance)),
                    ],
                ),
            );
        }
        if t.meter.is_noisy() {
            view = view.text(tr.t(keys::COND_NOISE_ON));
        }
        if !t.table.is_empty() {
            view = view.table(table_view(&t.table, tr));
        }
        view.field(
            FieldId::NaohAdded,
            tr.t(keys::COND_FIELD_NAOH_ADDED),
            NAOH_ADDED_BOUNDS,
            t.naoh_volume_added,
        )
        .action(Action::RecordMeasurement, tr.t(keys::ACTION_RECORD_MEASUREMENT))
    }

    fn act(
        &self,
        session: &mut Session,
        action: Action,
        form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::RecordMeasurement => {
                let t = &mut session.titration;
                let naoh_ml = snap_ml(form.read(
                    FieldId::NaohAdded,
                    &NAOH_ADDED_BOUNDS,
                    t.naoh_volume_added,
                ));
                let conductance = t.meter.read(naoh_ml);
                if !t.table.insert(TitrationRow {
                    naoh_ml,
                    conductance,
                }) {
                    tracing::debug!(naoh_ml, "duplicate titration reading ignored");
                }
                if reached(naoh_ml, MAX_ML) {
                    t.naoh_volume_added = MAX_ML;
                    return Ok(PageId::CondTable);
                }
                t.naoh_volume_added = advance_naoh(naoh_ml);
                Ok(PageId::CondTitrate)
            }
            other => Err(RouteError::not_offered(PageId::CondTitrate, other)),
        }
    }
}

pub struct ObservationTable;

impl Page for ObservationTable {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        PageView::new(PageId::CondTable, tr.t(keys::COND_TABLE_TITLE))
            .table(table_view(&session.titration.table, tr))
            .action(Action::PlotTitrationCurve, tr.t(keys::ACTION_PLOT_TITRATION_CURVE))
    }

    fn act(
        &self,
        _session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::PlotTitrationCurve => Ok(PageId::CondGraph),
            other => Err(RouteError::not_offered(PageId::CondTable, other)),
        }
    }
}

pub struct TitrationCurve;

impl Page for TitrationCurve {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let view = PageView::new(PageId::CondGraph, tr.t(keys::COND_GRAPH_TITLE));
        match titration_curve(&session.titration.table, tr) {
            Ok(chart) => view
                .chart(chart)
                .action(Action::ShowCalculations, tr.t(keys::ACTION_SHOW_CALCULATIONS)),
            Err(err) => back_to_measurements(view, tr, &err),
        }
    }

    fn act(
        &self,
        _session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::ShowCalculations => Ok(PageId::CondCalc),
            Action::BackToMeasurements => Ok(PageId::CondTitrate),
            other => Err(RouteError::not_offered(PageId::CondGraph, other)),
        }
    }
}

fn endpoint_line(endpoints: &Endpoints, tr: &Translator) -> String {
    tr.tf(
        keys::COND_CALC_ENDPOINTS,
        &[
            ("hcl", format!("{:.2}", endpoints.hcl_ml)),
            ("ch3cooh", format!("{:.2}", endpoints.ch3cooh_ml)),
        ],
    )
}

pub struct Calculations;

impl Page for Calculations {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let t = &session.titration;
        let view = PageView::new(PageId::CondCalc, tr.t(keys::COND_CALC_TITLE));
        let (endpoints, content) = match results::analyze(t.naoh_normality, &t.table) {
            Ok(v) => v,
            Err(err) => return back_to_measurements(view, tr, &err),
        };
        let n = format!("{:.4}", t.naoh_normality);
        view.text(tr.tf(keys::COND_CALC_NORMALITY, &[("normality", n.clone())]))
            .text(endpoint_line(&endpoints, tr))
            .text(tr.tf(
                keys::COND_CALC_HCL,
                &[
                    ("normality", n.clone()),
                    ("hcl", format!("{:.2}", endpoints.hcl_ml)),
                    ("result", format!("{:.4}", content.hcl_normality)),
                ],
            ))
            .text(tr.tf(
                keys::COND_CALC_CH3COOH,
                &[
                    ("normality", n),
                    ("hcl", format!("{:.2}", endpoints.hcl_ml)),
                    ("ch3cooh", format!("{:.2}", endpoints.ch3cooh_ml)),
                    ("result", format!("{:.4}", content.ch3cooh_normality)),
                ],
            ))
            .action(Action::ShowResults, tr.t(keys::ACTION_SHOW_RESULTS))
    }

    fn act(
        &self,
        _session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::ShowResults => Ok(PageId::CondResults),
            Action::BackToMeasurements => Ok(PageId::CondTitrate),
            other => Err(RouteError::not_offered(PageId::CondCalc, other)),
        }
    }
}

pub struct Results;

impl Page for Results {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let t = &session.titration;
        let view = PageView::new(PageId::CondResults, tr.t(keys::COND_RESULTS_TITLE));
        let view = match results::analyze(t.naoh_normality, &t.table) {
            Ok((endpoints, content)) => view
                .text(endpoint_line(&endpoints, tr))
                .notice(
                    NoticeLevel::Success,
                    tr.tf(
                        keys::COND_RESULT_HCL,
                        &[("mass", format!("{:.4}", content.hcl_mass_g))],
                    ),
                )
                .notice(
                    NoticeLevel::Success,
                    tr.tf(
                        keys::COND_RESULT_CH3COOH,
                        &[("mass", format!("{:.4}", content.ch3cooh_mass_g))],
                    ),
                ),
            Err(err) => back_to_measurements(view, tr, &err),
        };
        view.action(Action::ReturnHome, tr.t(keys::ACTION_RETURN_HOME))
    }

    fn act(
        &self,
        _session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::ReturnHome => Ok(PageId::Home),
            Action::BackToMeasurements => Ok(PageId::CondTitrate),
            other => Err(RouteError::not_offered(PageId::CondResults, other)),
        }
    }
}
