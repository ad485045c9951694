/// 부피 값을 비교·키로 쓸 때 사용하는 분해능. 1 ml = 1000 µl 단위로 맞춘다.
pub const MICROLITRES_PER_ML: f64 = 1000.0;

/// 부피를 1 µl 격자에 맞춘다.
///
/// 0.2 ml씩 반복해서 더할 때 생기는 부동소수점 오차(예: 0.6000000000000001)가
/// 누적되지 않도록 모든 부피 갱신은 이 함수를 거친다.
pub fn snap_ml(volume_ml: f64) -> f64 {
    (volume_ml * MICROLITRES_PER_ML).round() / MICROLITRES_PER_ML
}

/// 관측 행 중복 판정에 쓰는 정수 부피 키(µl 단위).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VolumeKey(i64);

impl VolumeKey {
    pub fn from_ml(volume_ml: f64) -> Self {
        VolumeKey((volume_ml * MICROLITRES_PER_ML).round() as i64)
    }

    pub fn as_ml(self) -> f64 {
        self.0 as f64 / MICROLITRES_PER_ML
    }
}

/// `value`가 `limit`에 도달했는지(분해능 이내 포함) 판정한다.
pub fn reached(value_ml: f64, limit_ml: f64) -> bool {
    value_ml >= limit_ml - 0.5 / MICROLITRES_PER_ML
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_removes_accumulated_error() {
        let mut v = 0.0;
        for _ in 0..3 {
            v += 0.2;
        }
        assert_ne!(v, 0.6);
        assert_eq!(snap_ml(v), 0.6);
    }

    #[test]
    fn keys_match_for_nearly_equal_volumes() {
        assert_eq!(VolumeKey::from_ml(0.1 + 0.2), VolumeKey::from_ml(0.3));
        assert_ne!(VolumeKey::from_ml(0.3), VolumeKey::from_ml(0.302));
        assert!((VolumeKey::from_ml(7.8).as_ml() - 7.8).abs() < 1e-12);
    }

    #[test]
    fn reached_tolerates_float_noise() {
        assert!(reached(7.999_999_999_9, 8.0));
        assert!(!reached(7.8, 8.0));
        assert!(reached(36.0, 36.0));
    }
}
