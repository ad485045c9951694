use crate::analysis::AnalysisError;

use super::analysis::{self, Endpoints};
use super::observation::TitrationTable;

/// 표준화에 쓰는 옥살산 부피(ml).
pub const OXALIC_VOLUME_ML: f64 = 25.0;
/// 옥살산 노르말 농도(N).
pub const OXALIC_NORMALITY: f64 = 0.05;
/// 적정하는 시료 분취량(ml).
pub const ALIQUOT_ML: f64 = 10.0;
/// HCl 당량(g/eq).
pub const HCL_EQUIVALENT_G: f64 = 36.5;
/// CH₃COOH 당량(g/eq).
pub const CH3COOH_EQUIVALENT_G: f64 = 60.0;
/// 표준화 전 사용하는 NaOH 농도(N).
pub const DEFAULT_NAOH_NORMALITY: f64 = 0.1;

/// 옥살산 표준 용액으로 NaOH 노르말 농도를 구한다. N₁V₁ = N₂V₂.
pub fn naoh_normality(naoh_used_ml: f64) -> f64 {
    OXALIC_VOLUME_ML * OXALIC_NORMALITY / naoh_used_ml
}

/// 혼합물 속 두 산의 정량 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcidContent {
    pub hcl_normality: f64,
    pub ch3cooh_normality: f64,
    /// 100 ml 기준 HCl 양(g)
    pub hcl_mass_g: f64,
    /// 100 ml 기준 CH₃COOH 양(g)
    pub ch3cooh_mass_g: f64,
}

/// 종말점과 NaOH 농도로 산의 농도와 양을 계산한다.
pub fn acid_content(naoh_normality: f64, endpoints: &Endpoints) -> AcidContent {
    let hcl_normality = naoh_normality * endpoints.hcl_ml / ALIQUOT_ML;
    let ch3cooh_normality =
        naoh_normality * (endpoints.ch3cooh_ml - endpoints.hcl_ml) / ALIQUOT_ML;
    AcidContent {
        hcl_normality,
        ch3cooh_normality,
        hcl_mass_g: hcl_normality * HCL_EQUIVALENT_G * 100.0 / 1000.0,
        ch3cooh_mass_g: ch3cooh_normality * CH3COOH_EQUIVALENT_G * 100.0 / 1000.0,
    }
}

/// 표에서 종말점을 찾고 곧바로 정량까지 수행한다.
pub fn analyze(
    naoh_normality: f64,
    table: &TitrationTable,
) -> Result<(Endpoints, AcidContent), AnalysisError> {
    let endpoints = analysis::detect_endpoints(table)?;
    Ok((endpoints, acid_content(naoh_normality, &endpoints)))
}
