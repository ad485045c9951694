use crate::config::Config;
use crate::page::PageId;
use crate::phenol::observation::PhenolTable;
use crate::titration::model::ConductanceMeter;
use crate::titration::observation::TitrationTable;
use crate::titration::results::DEFAULT_NAOH_NORMALITY;

/// 페놀-물 실험의 시작 물 부피(ml).
pub const INITIAL_WATER_ML: f64 = 3.0;
/// 페놀-물 실험의 기본 페놀 부피(ml).
pub const INITIAL_PHENOL_ML: f64 = 5.0;

/// 페놀-물 실험 진행 상태.
#[derive(Debug, Clone)]
pub struct PhenolState {
    pub table: PhenolTable,
    /// 다음 시행의 물 부피(ml), 3.0~36.0
    pub water_volume: f64,
    /// 현재 시행의 페놀 부피(ml), 5.0~10.0
    pub phenol_volume: f64,
    pub pending_disappear_temp: Option<f64>,
    pub pending_reappear_temp: Option<f64>,
    /// 결과 화면에서 마지막으로 입력한 미지 시료 혼화 온도
    pub unknown_temp: Option<f64>,
}

impl Default for PhenolState {
    fn default() -> Self {
        Self {
            table: PhenolTable::new(),
            water_volume: INITIAL_WATER_ML,
            phenol_volume: INITIAL_PHENOL_ML,
            pending_disappear_temp: None,
            pending_reappear_temp: None,
            unknown_temp: None,
        }
    }
}

/// 전도도 적정 진행 상태.
#[derive(Debug, Clone)]
pub struct TitrationState {
    pub table: TitrationTable,
    /// 표준화로 구한 NaOH 농도(N). 이후 계산에 재사용한다.
    pub naoh_normality: f64,
    /// 표준화 계산을 한 번이라도 했는지
    pub standardized: bool,
    /// 다음에 기록할 누적 NaOH 부피(ml), 0.0~8.0
    pub naoh_volume_added: f64,
    pub meter: ConductanceMeter,
}

impl TitrationState {
    fn new(meter: ConductanceMeter) -> Self {
        Self {
            table: TitrationTable::new(),
            naoh_normality: DEFAULT_NAOH_NORMALITY,
            standardized: false,
            naoh_volume_added: 0.0,
            meter,
        }
    }
}

/// 한 사용자 세션의 전체 상태. 화면 처리기는 이 값을 참조로 받아 갱신한다.
#[derive(Debug, Clone)]
pub struct Session {
    pub current_page: PageId,
    pub phenol: PhenolState,
    pub titration: TitrationState,
    /// 결과 화면의 미지 시료 기본 조성(% phenol)
    pub unknown_sample_percent: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_meter(ConductanceMeter::noiseless())
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 설정의 잡음/미지 시료 값을 반영해 세션을 만든다.
    pub fn from_config(config: &Config) -> Self {
        let t = &config.titration;
        let meter = if t.noise_enabled {
            ConductanceMeter::with_noise(t.noise_amplitude_ms, t.noise_seed)
        } else {
            ConductanceMeter::noiseless()
        };
        let mut session = Self::with_meter(meter);
        session.unknown_sample_percent = config.phenol.unknown_sample_percent.clamp(1.0, 99.0);
        session
    }

    pub fn with_meter(meter: ConductanceMeter) -> Self {
        Self {
            current_page: PageId::Home,
            phenol: PhenolState::default(),
            titration: TitrationState::new(meter),
            unknown_sample_percent: crate::config::DEFAULT_UNKNOWN_SAMPLE_PERCENT,
        }
    }

    /// 페놀-물 실험을 처음 상태로 되돌린다. 이전 실행의 표는 남지 않는다.
    pub fn reset_phenol(&mut self) {
        tracing::info!(rows = self.phenol.table.len(), "phenol experiment reset");
        self.phenol = PhenolState::default();
    }

    /// 전도도 적정을 처음 상태로 되돌린다. 측정기(잡음 상태)는 유지한다.
    pub fn reset_titration(&mut self) {
        tracing::info!(rows = self.titration.table.len(), "titration experiment reset");
        let meter = std::mem::take(&mut self.titration.meter);
        self.titration = TitrationState::new(meter);
    }
}
