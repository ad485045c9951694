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

use super::analysis::{self, UnknownEstimate};
use super::model::{self, MiscibilityReading};
use super::observation::{PhenolRow, PhenolTable};
use super::{advance_water, MAX_WATER_ML};

pub const WATER_BOUNDS: FieldBounds = FieldBounds::new(3.0, MAX_WATER_ML, 0.1);
pub const PHENOL_BOUNDS: FieldBounds = FieldBounds::new(5.0, 10.0, 0.1);
pub const UNKNOWN_TEMP_BOUNDS: FieldBounds = FieldBounds::new(0.0, 100.0, 0.1);

fn current_reading(session: &Session) -> (f64, MiscibilityReading) {
    let p = &session.phenol;
    let percent = model::percent_phenol(p.phenol_volume, p.water_volume);
    (percent, model::miscibility_temperatures(percent))
}

fn mixture_line(session: &Session, tr: &Translator, percent: f64) -> String {
    tr.tf(
        keys::PHENOL_MIXTURE,
        &[
            ("phenol", format!("{:.1}", session.phenol.phenol_volume)),
            ("water", format!("{:.1}", session.phenol.water_volume)),
            ("percent", format!("{percent:.1}")),
        ],
    )
}

/// % phenol 순으로 정렬한 관측 표.
pub fn table_view(table: &PhenolTable, tr: &Translator) -> TableView {
    TableView {
        headers: vec![
            tr.t(keys::PHENOL_COL_PHENOL).into(),
            tr.t(keys::PHENOL_COL_WATER).into(),
            tr.t(keys::PHENOL_COL_PERCENT).into(),
            tr.t(keys::PHENOL_COL_DISAPPEAR).into(),
            tr.t(keys::PHENOL_COL_REAPPEAR).into(),
            tr.t(keys::PHENOL_COL_MEAN).into(),
        ],
        rows: table
            .by_percent()
            .iter()
            .map(|r| {
                vec![
                    r.phenol_ml,
                    r.water_ml,
                    r.percent_phenol,
                    r.disappear_c,
                    r.reappear_c,
                    r.mean_c,
                ]
            })
            .collect(),
        precision: 2,
        export_name: "phenol_water.csv",
    }
}

/// 상평형 그림. CST 점을 표시한다.
pub fn phase_diagram(table: &PhenolTable, tr: &Translator) -> Result<Chart, AnalysisError> {
    let cst = analysis::critical_solution_point(table.rows())?;
    let rows = table.by_percent();
    let series = |name: &str, style, f: fn(&PhenolRow) -> f64| Series {
        name: tr.t(name).into(),
        points: rows.iter().map(|r| (r.percent_phenol, f(r))).collect(),
        style,
    };
    Ok(Chart {
        title: tr.t(keys::PHENOL_CHART_TITLE).into(),
        x_label: tr.t(keys::PHENOL_AXIS_X).into(),
        y_label: tr.t(keys::PHENOL_AXIS_Y).into(),
        series: vec![
            series(keys::PHENOL_SERIES_MEAN, SeriesStyle::Line, |r| r.mean_c),
            series(keys::PHENOL_SERIES_DISAPPEAR, SeriesStyle::Points, |r| r.disappear_c),
            series(keys::PHENOL_SERIES_REAPPEAR, SeriesStyle::Points, |r| r.reappear_c),
        ],
        markers: vec![Marker {
            label: tr.tf(
                keys::PHENOL_CST_MARKER,
                &[
                    ("temp", format!("{:.1}", cst.temperature_c)),
                    ("percent", format!("{:.1}", cst.percent_phenol)),
                ],
            ),
            x: cst.percent_phenol,
            y: Some(cst.temperature_c),
        }],
    })
}

fn unknown_lines(estimate: &UnknownEstimate, tr: &Translator) -> Vec<String> {
    let mut lines = vec![tr.tf(
        keys::PHENOL_UNKNOWN_HEADING,
        &[("temp", format!("{:.1}", estimate.temperature_c))],
    )];
    if estimate.above_critical() {
        lines.push(tr.t(keys::PHENOL_UNKNOWN_ABOVE_CST).into());
        return lines;
    }
    for (value, found, none) in [
        (
            estimate.water_rich_percent,
            keys::PHENOL_UNKNOWN_WATER_RICH,
            keys::PHENOL_UNKNOWN_WATER_RICH_NONE,
        ),
        (
            estimate.phenol_rich_percent,
            keys::PHENOL_UNKNOWN_PHENOL_RICH,
            keys::PHENOL_UNKNOWN_PHENOL_RICH_NONE,
        ),
    ] {
        lines.push(match value {
            Some(p) => tr.tf(found, &[("percent", format!("{p:.1}"))]),
            None => tr.t(none).into(),
        });
    }
    lines
}

pub struct Intro;

impl Page for Intro {
    fn view(&self, _session: &Session, tr: &Translator) -> PageView {
        PageView::new(PageId::PhenolIntro, tr.t(keys::PHENOL_INTRO_TITLE))
            .text(tr.t(keys::PHENOL_INTRO_AIM))
            .text(tr.t(keys::PHENOL_INTRO_THEORY))
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
                session.reset_phenol();
                Ok(PageId::PhenolAddReagents)
            }
            Action::ReturnHome => Ok(PageId::Home),
            other => Err(RouteError::not_offered(PageId::PhenolIntro, other)),
        }
    }
}

pub struct AddReagents;

impl Page for AddReagents {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let p = &session.phenol;
        PageView::new(PageId::PhenolAddReagents, tr.t(keys::PHENOL_ADD_TITLE))
            .text(tr.tf(
                keys::PHENOL_ADD_HINT,
                &[("trial", (p.table.len() + 1).to_string())],
            ))
            .field(
                FieldId::WaterVolume,
                tr.t(keys::PHENOL_FIELD_WATER),
                WATER_BOUNDS,
                p.water_volume,
            )
            .field(
                FieldId::PhenolVolume,
                tr.t(keys::PHENOL_FIELD_PHENOL),
                PHENOL_BOUNDS,
                p.phenol_volume,
            )
            .action(Action::HeatMixture, tr.t(keys::ACTION_HEAT_MIXTURE))
    }

    fn act(
        &self,
        session: &mut Session,
        action: Action,
        form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::HeatMixture => {
                let p = &mut session.phenol;
                p.water_volume =
                    snap_ml(form.read(FieldId::WaterVolume, &WATER_BOUNDS, p.water_volume));
                p.phenol_volume =
                    snap_ml(form.read(FieldId::PhenolVolume, &PHENOL_BOUNDS, p.phenol_volume));
                p.pending_disappear_temp = None;
                p.pending_reappear_temp = None;
                Ok(PageId::PhenolObserveDisappear)
            }
            other => Err(RouteError::not_offered(PageId::PhenolAddReagents, other)),
        }
    }
}

pub struct ObserveDisappear;

impl Page for ObserveDisappear {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let (percent, reading) = current_reading(session);
        PageView::new(PageId::PhenolObserveDisappear, tr.t(keys::PHENOL_OBSERVE_TITLE))
            .text(mixture_line(session, tr, percent))
            .notice(
                NoticeLevel::Info,
                tr.tf(
                    keys::PHENOL_DISAPPEAR,
                    &[("temp", format!("{:.1}", reading.disappear_c))],
                ),
            )
            .action(Action::CoolMixture, tr.t(keys::ACTION_COOL_MIXTURE))
    }

    fn act(
        &self,
        session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::CoolMixture => {
                let (_, reading) = current_reading(session);
                session.phenol.pending_disappear_temp = Some(reading.disappear_c);
                Ok(PageId::PhenolObserveReappearRecord)
            }
            other => Err(RouteError::not_offered(PageId::PhenolObserveDisappear, other)),
        }
    }
}

pub struct ObserveReappearRecord;

impl Page for ObserveReappearRecord {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let p = &session.phenol;
        let (percent, model_reading) = current_reading(session);
        let reading = MiscibilityReading {
            disappear_c: p.pending_disappear_temp.unwrap_or(model_reading.disappear_c),
            reappear_c: model_reading.reappear_c,
        };
        let finishing = reached(advance_water(p.water_volume), MAX_WATER_ML);
        let label = if finishing {
            keys::ACTION_RECORD_AND_FINISH
        } else {
            keys::ACTION_RECORD_AND_ADD_WATER
        };
        let mut view =
            PageView::new(PageId::PhenolObserveReappearRecord, tr.t(keys::PHENOL_RECORD_TITLE))
                .text(mixture_line(session, tr, percent))
                .text(tr.tf(
                    keys::PHENOL_DISAPPEAR,
                    &[("temp", format!("{:.1}", reading.disappear_c))],
                ))
                .notice(
                    NoticeLevel::Info,
                    tr.tf(
                        keys::PHENOL_REAPPEAR,
                        &[("temp", format!("{:.1}", reading.reappear_c))],
                    ),
                )
                .text(tr.tf(
                    keys::PHENOL_MEAN,
                    &[("temp", format!("{:.1}", reading.mean_c()))],
                ));
        if !p.table.is_empty() {
            view = view.table(table_view(&p.table, tr));
        }
        view.action(Action::RecordObservation, tr.t(label))
    }

    fn act(
        &self,
        session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::RecordObservation => {
                let (_, model_reading) = current_reading(session);
                let p = &mut session.phenol;
                p.pending_reappear_temp = Some(model_reading.reappear_c);
                let reading = MiscibilityReading {
                    disappear_c: p.pending_disappear_temp.unwrap_or(model_reading.disappear_c),
                    reappear_c: model_reading.reappear_c,
                };
                let row = PhenolRow::new(p.phenol_volume, p.water_volume, reading);
                if !p.table.insert(row) {
                    tracing::debug!(
                        phenol_ml = p.phenol_volume,
                        water_ml = p.water_volume,
                        "duplicate phenol observation ignored"
                    );
                }
                p.pending_disappear_temp = None;
                p.pending_reappear_temp = None;
                p.water_volume = advance_water(p.water_volume);
                if reached(p.water_volume, MAX_WATER_ML) {
                    Ok(PageId::PhenolTable)
                } else {
                    Ok(PageId::PhenolAddReagents)
                }
            }
            other => Err(RouteError::not_offered(
                PageId::PhenolObserveReappearRecord,
                other,
            )),
        }
    }
}

pub struct ObservationTable;

impl Page for ObservationTable {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let table = &session.phenol.table;
        let view = PageView::new(PageId::PhenolTable, tr.t(keys::PHENOL_TABLE_TITLE));
        if table.is_empty() {
            let err = AnalysisError::InsufficientData {
                table: crate::analysis::TableKind::Phenol,
                required: 1,
                available: 0,
            };
            return view
                .notice(NoticeLevel::Warning, err.localized(tr))
                .action(Action::BackToMeasurements, tr.t(keys::ACTION_BACK_TO_MEASUREMENTS));
        }
        view.text(tr.tf(
            keys::PHENOL_ROWS_RECORDED,
            &[("count", table.len().to_string())],
        ))
        .table(table_view(table, tr))
        .action(Action::PlotPhaseDiagram, tr.t(keys::ACTION_PLOT_PHASE_DIAGRAM))
    }

    fn act(
        &self,
        _session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::PlotPhaseDiagram => Ok(PageId::PhenolGraph),
            Action::BackToMeasurements => Ok(PageId::PhenolAddReagents),
            other => Err(RouteError::not_offered(PageId::PhenolTable, other)),
        }
    }
}

pub struct PhaseDiagram;

impl Page for PhaseDiagram {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let view = PageView::new(PageId::PhenolGraph, tr.t(keys::PHENOL_GRAPH_TITLE));
        match phase_diagram(&session.phenol.table, tr) {
            Ok(chart) => view
                .chart(chart)
                .action(Action::ShowResults, tr.t(keys::ACTION_SHOW_RESULTS)),
            Err(err) => view
                .notice(NoticeLevel::Warning, err.localized(tr))
                .action(Action::BackToMeasurements, tr.t(keys::ACTION_BACK_TO_MEASUREMENTS)),
        }
    }

    fn act(
        &self,
        _session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::ShowResults => Ok(PageId::PhenolResults),
            Action::BackToMeasurements => Ok(PageId::PhenolAddReagents),
            other => Err(RouteError::not_offered(PageId::PhenolGraph, other)),
        }
    }
}

pub struct Results;

impl Results {
    /// 미지 시료 입력 칸의 기본값: 마지막 입력값, 없으면 합성 시료의 모델 온도.
    pub fn unknown_default(session: &Session) -> f64 {
        session
            .phenol
            .unknown_temp
            .unwrap_or_else(|| model::mean_temp_c(session.unknown_sample_percent))
    }
}

impl Page for Results {
    fn view(&self, session: &Session, tr: &Translator) -> PageView {
        let rows = session.phenol.table.rows();
        let view = PageView::new(PageId::PhenolResults, tr.t(keys::PHENOL_RESULTS_TITLE));
        let (cst, hysteresis) = match analysis::critical_solution_point(rows)
            .and_then(|cst| Ok((cst, analysis::mean_hysteresis_c(rows)?)))
        {
            Ok(v) => v,
            Err(err) => {
                return view
                    .notice(NoticeLevel::Warning, err.localized(tr))
                    .action(Action::BackToMeasurements, tr.t(keys::ACTION_BACK_TO_MEASUREMENTS))
                    .action(Action::ReturnHome, tr.t(keys::ACTION_RETURN_HOME));
            }
        };

        let mut view = view
            .notice(
                NoticeLevel::Success,
                tr.tf(
                    keys::PHENOL_RESULT_CST,
                    &[("temp", format!("{:.1}", cst.temperature_c))],
                ),
            )
            .text(tr.tf(
                keys::PHENOL_RESULT_PERCENT,
                &[("percent", format!("{:.1}", cst.percent_phenol))],
            ))
            .text(tr.tf(
                keys::PHENOL_RESULT_HYSTERESIS,
                &[("temp", format!("{hysteresis:.1}"))],
            ));

        let unknown_temp = Self::unknown_default(session);
        match analysis::estimate_unknown(rows, unknown_temp) {
            Ok(estimate) => {
                for line in unknown_lines(&estimate, tr) {
                    view = view.text(line);
                }
            }
            Err(err) => view = view.notice(NoticeLevel::Warning, err.localized(tr)),
        }

        view.field(
            FieldId::UnknownTemperature,
            tr.t(keys::PHENOL_FIELD_UNKNOWN),
            UNKNOWN_TEMP_BOUNDS,
            unknown_temp,
        )
        .action(Action::EstimateUnknown, tr.t(keys::ACTION_ESTIMATE_UNKNOWN))
        .action(Action::ReturnHome, tr.t(keys::ACTION_RETURN_HOME))
    }

    fn act(
        &self,
        session: &mut Session,
        action: Action,
        form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::EstimateUnknown => {
                let default = Self::unknown_default(session);
                session.phenol.unknown_temp = Some(form.read(
                    FieldId::UnknownTemperature,
                    &UNKNOWN_TEMP_BOUNDS,
                    default,
                ));
                Ok(PageId::PhenolResults)
            }
            Action::BackToMeasurements => Ok(PageId::PhenolAddReagents),
            Action::ReturnHome => Ok(PageId::Home),
            other => Err(RouteError::not_offered(PageId::PhenolResults, other)),
        }
    }
}
