//! HCl/CH₃COOH 혼합물의 NaOH 전도도 적정 실험.
//! 전도도 모델, 측정 표, 종말점 검출, 정량 계산, 화면 흐름으로 구성한다.

pub mod analysis;
pub mod model;
pub mod observation;
pub mod pages;
pub mod results;

use crate::quantity::snap_ml;

/// 방금 기록한 부피 다음에 제안할 NaOH 부피. 상한에서 멈춘다.
pub fn advance_naoh(naoh_ml: f64) -> f64 {
    snap_ml((naoh_ml + model::STEP_ML).min(model::MAX_ML))
}
