use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 적정 한 번에 더하는 NaOH 부피(ml).
pub const STEP_ML: f64 = 0.2;
/// 적정 최대 NaOH 부피(ml).
pub const MAX_ML: f64 = 8.0;
/// 하강 구간과 상승 구간이 만나는 지점(ml).
pub const KINK_ML: f64 = 4.0;

/// NaOH 부피에 따른 모의 전도도(mS).
///
/// HCl 중화 중에는 빠른 H⁺가 느린 Na⁺로 바뀌며 감소하고,
/// 산이 소모된 뒤에는 과잉 OH⁻ 때문에 증가한다.
pub fn conductance_ms(naoh_ml: f64) -> f64 {
    if naoh_ml <= KINK_ML {
        0.8 - 0.02 * (naoh_ml / STEP_ML)
    } else {
        0.6 + 0.03 * ((naoh_ml - KINK_ML) / STEP_ML)
    }
}

/// 모델값에 선택적으로 대칭 잡음을 얹는 전도도계.
///
/// 잡음은 화면상의 사실감을 위한 것이며 종말점 검출은 이에 의존하지 않는다.
/// 시드를 주면 같은 순서의 측정은 항상 같은 값을 낸다.
#[derive(Debug, Clone)]
pub struct ConductanceMeter {
    noise: Option<Noise>,
}

#[derive(Debug, Clone)]
struct Noise {
    amplitude_ms: f64,
    rng: StdRng,
}

impl Default for ConductanceMeter {
    fn default() -> Self {
        Self::noiseless()
    }
}

impl ConductanceMeter {
    pub fn noiseless() -> Self {
        Self { noise: None }
    }

    /// ±`amplitude_ms` 범위의 균등 잡음을 더한다. 시드가 없으면 OS 엔트로피를 쓴다.
    pub fn with_noise(amplitude_ms: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            noise: Some(Noise {
                amplitude_ms: amplitude_ms.abs(),
                rng,
            }),
        }
    }

    pub fn is_noisy(&self) -> bool {
        self.noise.is_some()
    }

    /// 한 번 측정한다.
    pub fn read(&mut self, naoh_ml: f64) -> f64 {
        let base = conductance_ms(naoh_ml);
        match &mut self.noise {
            Some(noise) if noise.amplitude_ms > 0.0 => {
                base + noise.rng.gen_range(-noise.amplitude_ms..=noise.amplitude_ms)
            }
            _ => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branches_meet_at_the_kink() {
        assert!((conductance_ms(0.0) - 0.8).abs() < 1e-12);
        assert!((conductance_ms(KINK_ML) - 0.4).abs() < 1e-12);
        assert!((conductance_ms(MAX_ML) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn seeded_noise_is_reproducible_and_bounded() {
        let mut a = ConductanceMeter::with_noise(0.01, Some(7));
        let mut b = ConductanceMeter::with_noise(0.01, Some(7));
        for i in 0..=40 {
            let v = i as f64 * STEP_ML;
            let ra = a.read(v);
            assert_eq!(ra, b.read(v));
            assert!((ra - conductance_ms(v)).abs() <= 0.01 + 1e-12);
        }
    }
}
