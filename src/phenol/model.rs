/// 탁도가 사라지는(가열 시) 온도 곡선의 구간 경계 [% phenol].
const BREAK_LOW: f64 = 10.0;
const BREAK_PEAK: f64 = 30.0;
const BREAK_HIGH: f64 = 70.0;

/// 한 조성에서 관찰되는 두 온도.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiscibilityReading {
    /// 가열 중 탁도가 사라지는 온도(°C)
    pub disappear_c: f64,
    /// 냉각 중 탁도가 다시 나타나는 온도(°C)
    pub reappear_c: f64,
}

impl MiscibilityReading {
    /// 두 온도의 산술 평균(°C).
    pub fn mean_c(&self) -> f64 {
        (self.disappear_c + self.reappear_c) / 2.0
    }

    /// 가열/냉각 사이의 이력(°C). 항상 양수이다.
    pub fn hysteresis_c(&self) -> f64 {
        self.disappear_c - self.reappear_c
    }
}

/// 혼합물의 페놀 부피 백분율.
pub fn percent_phenol(phenol_ml: f64, water_ml: f64) -> f64 {
    phenol_ml / (phenol_ml + water_ml) * 100.0
}

/// 조성에 따른 탁도 소멸 온도(°C).
///
/// 네 구간의 연속 선형 근사: P=30%에서 70°C로 최고점을 찍고 양쪽으로 내려간다.
pub fn disappearance_temp_c(percent: f64) -> f64 {
    if percent < BREAK_LOW {
        32.0 + 3.3 * percent
    } else if percent < BREAK_PEAK {
        65.0 + 0.25 * (percent - BREAK_LOW)
    } else if percent < BREAK_HIGH {
        70.0 - 0.1 * (percent - BREAK_PEAK)
    } else {
        66.0 - 0.3 * (percent - BREAK_HIGH)
    }
}

/// 조성에 따른 탁도 재출현 온도(°C). 농도가 높을수록 이력이 커진다.
pub fn reappearance_temp_c(percent: f64) -> f64 {
    disappearance_temp_c(percent) - 2.0 - 0.05 * percent
}

/// 두 온도를 함께 계산한다.
pub fn miscibility_temperatures(percent: f64) -> MiscibilityReading {
    MiscibilityReading {
        disappear_c: disappearance_temp_c(percent),
        reappear_c: reappearance_temp_c(percent),
    }
}

/// 평균 혼화 온도(°C).
pub fn mean_temp_c(percent: f64) -> f64 {
    miscibility_temperatures(percent).mean_c()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_meet_at_breakpoints() {
        for b in [BREAK_LOW, BREAK_PEAK, BREAK_HIGH] {
            let left = disappearance_temp_c(b - 1e-9);
            let right = disappearance_temp_c(b);
            assert!((left - right).abs() < 1e-6, "discontinuity at {b}: {left} vs {right}");
        }
    }

    #[test]
    fn peak_is_at_thirty_percent() {
        assert!((disappearance_temp_c(30.0) - 70.0).abs() < 1e-12);
        assert!(mean_temp_c(29.0) < mean_temp_c(30.0));
        assert!(mean_temp_c(31.0) < mean_temp_c(30.0));
    }
}
