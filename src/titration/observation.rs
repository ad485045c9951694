use crate::quantity::VolumeKey;
use crate::table::{Observation, ObservationTable};

/// 전도도 측정 한 건.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitrationRow {
    /// 누적 NaOH 부피(ml), 0.0~8.0
    pub naoh_ml: f64,
    /// 모의 전도도(mS)
    pub conductance: f64,
}

impl Observation for TitrationRow {
    type Key = VolumeKey;

    fn key(&self) -> VolumeKey {
        VolumeKey::from_ml(self.naoh_ml)
    }
}

/// 전도도 적정 표. NaOH 부피당 한 행.
pub type TitrationTable = ObservationTable<TitrationRow>;

impl TitrationTable {
    /// 그래프와 종말점 검출에 쓰는 NaOH 오름차순 행. 입력 순서와 무관하다.
    pub fn by_volume(&self) -> Vec<TitrationRow> {
        self.sorted_by(|row| row.naoh_ml)
    }
}
