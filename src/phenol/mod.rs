//! 페놀-물 계의 임계 용해 온도(CST) 측정 실험.
//! 조성별 혼화 온도 모델, 관측 표, CST 분석, 화면 흐름으로 구성한다.

pub mod analysis;
pub mod model;
pub mod observation;
pub mod pages;

use crate::quantity::snap_ml;

/// 한 시행이 끝날 때마다 더하는 물 부피(ml).
pub const WATER_STEP_ML: f64 = 2.0;
/// 물 부피 상한(ml). 여기에 도달하면 측정 반복을 마친다.
pub const MAX_WATER_ML: f64 = 36.0;

/// 다음 시행의 물 부피. 상한에서 멈춘다.
pub fn advance_water(water_ml: f64) -> f64 {
    snap_ml((water_ml + WATER_STEP_ML).min(MAX_WATER_ML))
}
