use crate::analysis::{AnalysisError, TableKind};

use super::observation::PhenolRow;

/// 평균 온도 곡선의 최고점(임계 용해 온도).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalPoint {
    pub temperature_c: f64,
    pub percent_phenol: f64,
}

/// 미지 시료의 혼화 온도로부터 추정한 조성.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnknownEstimate {
    pub temperature_c: f64,
    /// 물이 많은 쪽(CST 왼쪽) 가지에서의 % phenol
    pub water_rich_percent: Option<f64>,
    /// 페놀이 많은 쪽(CST 오른쪽) 가지에서의 % phenol
    pub phenol_rich_percent: Option<f64>,
}

impl UnknownEstimate {
    /// CST보다 높은 온도라 어느 가지와도 만나지 않는 경우.
    pub fn above_critical(&self) -> bool {
        self.water_rich_percent.is_none() && self.phenol_rich_percent.is_none()
    }
}

/// 평균 온도가 가장 높은 행을 CST로 본다. 동률이면 표에서 먼저 나온 행.
pub fn critical_solution_point(rows: &[PhenolRow]) -> Result<CriticalPoint, AnalysisError> {
    AnalysisError::require(TableKind::Phenol, 1, rows.len())?;
    let best = argmax_first(rows).unwrap_or(0);
    let row = &rows[best];
    Ok(CriticalPoint {
        temperature_c: row.mean_c,
        percent_phenol: row.percent_phenol,
    })
}

/// 모든 행의 (소멸 - 재출현) 온도차 평균.
pub fn mean_hysteresis_c(rows: &[PhenolRow]) -> Result<f64, AnalysisError> {
    AnalysisError::require(TableKind::Phenol, 1, rows.len())?;
    let sum: f64 = rows.iter().map(PhenolRow::hysteresis_c).sum();
    Ok(sum / rows.len() as f64)
}

/// 미지 시료가 `temperature_c`에서 혼화된다고 할 때의 조성을 평균 곡선에서 보간한다.
///
/// 곡선은 % phenol 순으로 정렬한 뒤 [`critical_solution_point`]와 같은 CST 행에서
/// 두 가지로 나눈다. 각 가지에서 온도를 처음 포함하는 구간을 선형 보간한다.
pub fn estimate_unknown(
    rows: &[PhenolRow],
    temperature_c: f64,
) -> Result<UnknownEstimate, AnalysisError> {
    AnalysisError::require(TableKind::Phenol, 2, rows.len())?;
    let cst = &rows[argmax_first(rows).unwrap_or(0)];
    let mut curve: Vec<(f64, f64)> = rows.iter().map(|r| (r.percent_phenol, r.mean_c)).collect();
    curve.sort_by(|a, b| a.0.total_cmp(&b.0));

    let peak = curve
        .iter()
        .position(|&(p, t)| p == cst.percent_phenol && t == cst.mean_c)
        .unwrap_or(0);

    let water_rich = interpolate_x(&curve[..=peak], temperature_c);
    let phenol_rich = interpolate_x(&curve[peak..], temperature_c);
    Ok(UnknownEstimate {
        temperature_c,
        water_rich_percent: water_rich,
        phenol_rich_percent: phenol_rich,
    })
}

fn argmax_first(rows: &[PhenolRow]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, row) in rows.iter().enumerate() {
        match best {
            Some(b) if row.mean_c <= rows[b].mean_c => {}
            _ => best = Some(i),
        }
    }
    best
}

/// 단조 구간 위에서 y값을 지나는 x를 찾는다.
fn interpolate_x(points: &[(f64, f64)], y: f64) -> Option<f64> {
    if let [(x, only)] = points {
        return ((only - y).abs() < 1e-9).then_some(*x);
    }
    points.windows(2).find_map(|w| {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        if y < lo || y > hi {
            return None;
        }
        if (y1 - y0).abs() < f64::EPSILON {
            return Some(x0);
        }
        Some(x0 + (y - y0) / (y1 - y0) * (x1 - x0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolation_between_points() {
        let pts = [(10.0, 60.0), (20.0, 70.0)];
        assert_eq!(interpolate_x(&pts, 65.0), Some(15.0));
        assert_eq!(interpolate_x(&pts, 71.0), None);
    }

    #[test]
    fn single_point_branch_matches_only_its_own_value() {
        assert_eq!(interpolate_x(&[(30.0, 68.0)], 68.0), Some(30.0));
        assert_eq!(interpolate_x(&[(30.0, 68.0)], 60.0), None);
    }
}
