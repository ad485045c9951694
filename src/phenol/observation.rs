use crate::quantity::VolumeKey;
use crate::table::{Observation, ObservationTable};

use super::model::{self, MiscibilityReading};

/// 완료된 시행 하나의 관측 행.
#[derive(Debug, Clone, PartialEq)]
pub struct PhenolRow {
    pub phenol_ml: f64,
    pub water_ml: f64,
    /// 페놀 부피 백분율, (0, 100)
    pub percent_phenol: f64,
    pub disappear_c: f64,
    pub reappear_c: f64,
    pub mean_c: f64,
}

impl PhenolRow {
    pub fn new(phenol_ml: f64, water_ml: f64, reading: MiscibilityReading) -> Self {
        Self {
            phenol_ml,
            water_ml,
            percent_phenol: model::percent_phenol(phenol_ml, water_ml),
            disappear_c: reading.disappear_c,
            reappear_c: reading.reappear_c,
            mean_c: reading.mean_c(),
        }
    }

    /// 모델값으로 행을 만든다.
    pub fn simulated(phenol_ml: f64, water_ml: f64) -> Self {
        let percent = model::percent_phenol(phenol_ml, water_ml);
        Self::new(phenol_ml, water_ml, model::miscibility_temperatures(percent))
    }

    pub fn hysteresis_c(&self) -> f64 {
        self.disappear_c - self.reappear_c
    }
}

impl Observation for PhenolRow {
    type Key = (VolumeKey, VolumeKey);

    fn key(&self) -> Self::Key {
        (
            VolumeKey::from_ml(self.phenol_ml),
            VolumeKey::from_ml(self.water_ml),
        )
    }
}

/// 페놀-물 관측 표. (페놀 ml, 물 ml) 조합당 한 행.
pub type PhenolTable = ObservationTable<PhenolRow>;

impl PhenolTable {
    /// 화면 표시·그래프용으로 % phenol 오름차순 정렬한 행.
    pub fn by_percent(&self) -> Vec<PhenolRow> {
        self.sorted_by(|row| row.percent_phenol)
    }
}
