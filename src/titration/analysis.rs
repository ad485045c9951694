use crate::analysis::{AnalysisError, TableKind};

use super::observation::{TitrationRow, TitrationTable};

/// 기울기 동률 판정 허용치(mS/ml).
const SLOPE_TIE_TOLERANCE: f64 = 1e-9;

/// 두 산의 종말점(ml NaOH).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoints {
    /// 기울기가 가장 작은(가장 가파르게 감소하는) 지점
    pub hcl_ml: f64,
    /// 기울기가 가장 큰 지점
    pub ch3cooh_ml: f64,
}

/// 이산 미분 `d[i] = Δconductance / Δnaoh` 를 `(naoh_ml[i], d[i])` 로 반환한다.
///
/// 입력은 NaOH 오름차순이어야 하며 첫 행의 기울기는 정의되지 않으므로 빠진다.
pub fn slopes(sorted: &[TitrationRow]) -> Vec<(f64, f64)> {
    sorted
        .windows(2)
        .map(|w| {
            let dv = w[1].naoh_ml - w[0].naoh_ml;
            (w[1].naoh_ml, (w[1].conductance - w[0].conductance) / dv)
        })
        .collect()
}

/// 적정 곡선에서 HCl, CH₃COOH 종말점을 찾는다.
///
/// CH₃COOH 종말점은 기울기가 가장 큰 지점이며 동률은 허용치 안에서 마지막 지점을 택한다.
/// HCl 종말점은 하강 구간이 끝나는 꺾임점, 즉 다음 기울기로 넘어갈 때 기울기가 가장
/// 크게 오르는 지점이다. 잡음 없는 모델에서는 하강 구간 기울기의 argmin(마지막 지점)과
/// 같은 4.0 ml 이고, 측정 잡음이 하강 구간 기울기를 흔들어도 꺾임점은 유지된다.
pub fn detect_endpoints(table: &TitrationTable) -> Result<Endpoints, AnalysisError> {
    AnalysisError::require(TableKind::Titration, 2, table.len())?;
    let d = slopes(&table.by_volume());

    let mut max = d[0];
    for &(v, s) in &d[1..] {
        if s >= max.1 - SLOPE_TIE_TOLERANCE {
            max = (v, s.max(max.1));
        }
    }
    let hcl_ml = sharpest_rise(&d).unwrap_or(d[0].0);
    tracing::debug!(hcl_ml, ch3cooh_ml = max.0, "endpoints detected");
    Ok(Endpoints {
        hcl_ml,
        ch3cooh_ml: max.0,
    })
}

/// 이웃한 두 기울기 사이 증가량이 가장 큰 곳의 앞쪽 부피. 기울기가 하나뿐이면 `None`.
fn sharpest_rise(d: &[(f64, f64)]) -> Option<f64> {
    d.windows(2)
        .map(|w| (w[0].0, w[1].1 - w[0].1))
        .fold(None, |best: Option<(f64, f64)>, (v, rise)| match best {
            Some(b) if rise <= b.1 => Some(b),
            _ => Some((v, rise)),
        })
        .map(|(v, _)| v)
}
