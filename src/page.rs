use std::fmt;

/// 화면(단계) 식별자. 두 실험의 흐름을 이루는 닫힌 집합이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Home,
    PhenolIntro,
    PhenolAddReagents,
    PhenolObserveDisappear,
    PhenolObserveReappearRecord,
    PhenolTable,
    PhenolGraph,
    PhenolResults,
    CondIntro,
    CondStandardize,
    CondTitrate,
    CondTable,
    CondGraph,
    CondCalc,
    CondResults,
}

/// 어느 실험에 속한 화면인지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experiment {
    PhenolWater,
    Conductometric,
}

impl PageId {
    pub const PHENOL_FLOW: [PageId; 7] = [
        PageId::PhenolIntro,
        PageId::PhenolAddReagents,
        PageId::PhenolObserveDisappear,
        PageId::PhenolObserveReappearRecord,
        PageId::PhenolTable,
        PageId::PhenolGraph,
        PageId::PhenolResults,
    ];

    pub const TITRATION_FLOW: [PageId; 7] = [
        PageId::CondIntro,
        PageId::CondStandardize,
        PageId::CondTitrate,
        PageId::CondTable,
        PageId::CondGraph,
        PageId::CondCalc,
        PageId::CondResults,
    ];

    pub fn experiment(self) -> Option<Experiment> {
        match self {
            PageId::Home => None,
            PageId::PhenolIntro
            | PageId::PhenolAddReagents
            | PageId::PhenolObserveDisappear
            | PageId::PhenolObserveReappearRecord
            | PageId::PhenolTable
            | PageId::PhenolGraph
            | PageId::PhenolResults => Some(Experiment::PhenolWater),
            PageId::CondIntro
            | PageId::CondStandardize
            | PageId::CondTitrate
            | PageId::CondTable
            | PageId::CondGraph
            | PageId::CondCalc
            | PageId::CondResults => Some(Experiment::Conductometric),
        }
    }

    /// 로그에 쓰는 고정 이름.
    pub fn as_str(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::PhenolIntro => "phenol_intro",
            PageId::PhenolAddReagents => "phenol_add_reagents",
            PageId::PhenolObserveDisappear => "phenol_observe_disappear",
            PageId::PhenolObserveReappearRecord => "phenol_observe_reappear_record",
            PageId::PhenolTable => "phenol_table",
            PageId::PhenolGraph => "phenol_graph",
            PageId::PhenolResults => "phenol_results",
            PageId::CondIntro => "cond_intro",
            PageId::CondStandardize => "cond_standardize",
            PageId::CondTitrate => "cond_titrate",
            PageId::CondTable => "cond_table",
            PageId::CondGraph => "cond_graph",
            PageId::CondCalc => "cond_calc",
            PageId::CondResults => "cond_results",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 사용자가 누를 수 있는 동작(버튼).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    StartPhenol,
    StartTitration,
    StartExperiment,
    HeatMixture,
    CoolMixture,
    RecordObservation,
    PlotPhaseDiagram,
    ShowResults,
    EstimateUnknown,
    CalculateNormality,
    ProceedToTitration,
    RecordMeasurement,
    PlotTitrationCurve,
    ShowCalculations,
    BackToMeasurements,
    ReturnHome,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::StartPhenol => "start_phenol",
            Action::StartTitration => "start_titration",
            Action::StartExperiment => "start_experiment",
            Action::HeatMixture => "heat_mixture",
            Action::CoolMixture => "cool_mixture",
            Action::RecordObservation => "record_observation",
            Action::PlotPhaseDiagram => "plot_phase_diagram",
            Action::ShowResults => "show_results",
            Action::EstimateUnknown => "estimate_unknown",
            Action::CalculateNormality => "calculate_normality",
            Action::ProceedToTitration => "proceed_to_titration",
            Action::RecordMeasurement => "record_measurement",
            Action::PlotTitrationCurve => "plot_titration_curve",
            Action::ShowCalculations => "show_calculations",
            Action::BackToMeasurements => "back_to_measurements",
            Action::ReturnHome => "return_home",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
