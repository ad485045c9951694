use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";
    pub const INSUFFICIENT_DATA: &str = "general.insufficient_data";

    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_FIELD: &str = "prompt.field";
    pub const MENU_EXIT: &str = "prompt.menu_exit";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const CHART_LEGEND: &str = "chart.legend";
    pub const CHART_NO_DATA: &str = "chart.no_data";

    pub const HOME_SUBTITLE: &str = "home.subtitle";
    pub const HOME_PHENOL_CARD: &str = "home.phenol_card";
    pub const HOME_TITRATION_CARD: &str = "home.titration_card";

    pub const ACTION_START_PHENOL: &str = "action.start_phenol";
    pub const ACTION_START_TITRATION: &str = "action.start_titration";
    pub const ACTION_START_EXPERIMENT: &str = "action.start_experiment";
    pub const ACTION_HEAT_MIXTURE: &str = "action.heat_mixture";
    pub const ACTION_COOL_MIXTURE: &str = "action.cool_mixture";
    pub const ACTION_RECORD_AND_ADD_WATER: &str = "action.record_and_add_water";
    pub const ACTION_RECORD_AND_FINISH: &str = "action.record_and_finish";
    pub const ACTION_PLOT_PHASE_DIAGRAM: &str = "action.plot_phase_diagram";
    pub const ACTION_SHOW_RESULTS: &str = "action.show_results";
    pub const ACTION_ESTIMATE_UNKNOWN: &str = "action.estimate_unknown";
    pub const ACTION_CALCULATE_NORMALITY: &str = "action.calculate_normality";
    pub const ACTION_PROCEED_TO_TITRATION: &str = "action.proceed_to_titration";
    pub const ACTION_RECORD_MEASUREMENT: &str = "action.record_measurement";
    pub const ACTION_PLOT_TITRATION_CURVE: &str = "action.plot_titration_curve";
    pub const ACTION_SHOW_CALCULATIONS: &str = "action.show_calculations";
    pub const ACTION_BACK_TO_MEASUREMENTS: &str = "action.back_to_measurements";
    pub const ACTION_RETURN_HOME: &str = "action.return_home";

    pub const PHENOL_INTRO_TITLE: &str = "phenol.intro_title";
    pub const PHENOL_INTRO_AIM: &str = "phenol.intro_aim";
    pub const PHENOL_INTRO_THEORY: &str = "phenol.intro_theory";
    pub const PHENOL_ADD_TITLE: &str = "phenol.add_title";
    pub const PHENOL_ADD_HINT: &str = "phenol.add_hint";
    pub const PHENOL_FIELD_WATER: &str = "phenol.field_water";
    pub const PHENOL_FIELD_PHENOL: &str = "phenol.field_phenol";
    pub const PHENOL_OBSERVE_TITLE: &str = "phenol.observe_title";
    pub const PHENOL_MIXTURE: &str = "phenol.mixture";
    pub const PHENOL_DISAPPEAR: &str = "phenol.disappear";
    pub const PHENOL_RECORD_TITLE: &str = "phenol.record_title";
    pub const PHENOL_REAPPEAR: &str = "phenol.reappear";
    pub const PHENOL_MEAN: &str = "phenol.mean";
    pub const PHENOL_TABLE_TITLE: &str = "phenol.table_title";
    pub const PHENOL_ROWS_RECORDED: &str = "phenol.rows_recorded";
    pub const PHENOL_COL_PHENOL: &str = "phenol.col_phenol";
    pub const PHENOL_COL_WATER: &str = "phenol.col_water";
    pub const PHENOL_COL_PERCENT: &str = "phenol.col_percent";
    pub const PHENOL_COL_DISAPPEAR: &str = "phenol.col_disappear";
    pub const PHENOL_COL_REAPPEAR: &str = "phenol.col_reappear";
    pub const PHENOL_COL_MEAN: &str = "phenol.col_mean";
    pub const PHENOL_GRAPH_TITLE: &str = "phenol.graph_title";
    pub const PHENOL_CHART_TITLE: &str = "phenol.chart_title";
    pub const PHENOL_AXIS_X: &str = "phenol.axis_x";
    pub const PHENOL_AXIS_Y: &str = "phenol.axis_y";
    pub const PHENOL_SERIES_MEAN: &str = "phenol.series_mean";
    pub const PHENOL_SERIES_DISAPPEAR: &str = "phenol.series_disappear";
    pub const PHENOL_SERIES_REAPPEAR: &str = "phenol.series_reappear";
    pub const PHENOL_CST_MARKER: &str = "phenol.cst_marker";
    pub const PHENOL_RESULTS_TITLE: &str = "phenol.results_title";
    pub const PHENOL_RESULT_CST: &str = "phenol.result_cst";
    pub const PHENOL_RESULT_PERCENT: &str = "phenol.result_percent";
    pub const PHENOL_RESULT_HYSTERESIS: &str = "phenol.result_hysteresis";
    pub const PHENOL_FIELD_UNKNOWN: &str = "phenol.field_unknown";
    pub const PHENOL_UNKNOWN_HEADING: &str = "phenol.unknown_heading";
    pub const PHENOL_UNKNOWN_ABOVE_CST: &str = "phenol.unknown_above_cst";
    pub const PHENOL_UNKNOWN_WATER_RICH: &str = "phenol.unknown_water_rich";
    pub const PHENOL_UNKNOWN_WATER_RICH_NONE: &str = "phenol.unknown_water_rich_none";
    pub const PHENOL_UNKNOWN_PHENOL_RICH: &str = "phenol.unknown_phenol_rich";
    pub const PHENOL_UNKNOWN_PHENOL_RICH_NONE: &str = "phenol.unknown_phenol_rich_none";

    pub const COND_INTRO_TITLE: &str = "cond.intro_title";
    pub const COND_INTRO_AIM: &str = "cond.intro_aim";
    pub const COND_INTRO_THEORY: &str = "cond.intro_theory";
    pub const COND_STD_TITLE: &str = "cond.std_title";
    pub const COND_STD_TEXT: &str = "cond.std_text";
    pub const COND_FIELD_NAOH_USED: &str = "cond.field_naoh_used";
    pub const COND_NORMALITY: &str = "cond.normality";
    pub const COND_NORMALITY_DEFAULT: &str = "cond.normality_default";
    pub const COND_TITRATE_TITLE: &str = "cond.titrate_title";
    pub const COND_FIELD_NAOH_ADDED: &str = "cond.field_naoh_added";
    pub const COND_PROGRESS: &str = "cond.progress";
    pub const COND_LAST_READING: &str = "cond.last_reading";
    pub const COND_NOISE_ON: &str = "cond.noise_on";
    pub const COND_TABLE_TITLE: &str = "cond.table_title";
    pub const COND_COL_NAOH: &str = "cond.col_naoh";
    pub const COND_COL_CONDUCTANCE: &str = "cond.col_conductance";
    pub const COND_GRAPH_TITLE: &str = "cond.graph_title";
    pub const COND_CHART_TITLE: &str = "cond.chart_title";
    pub const COND_AXIS_X: &str = "cond.axis_x";
    pub const COND_AXIS_Y: &str = "cond.axis_y";
    pub const COND_SERIES: &str = "cond.series";
    pub const COND_HCL_MARKER: &str = "cond.hcl_marker";
    pub const COND_CH3COOH_MARKER: &str = "cond.ch3cooh_marker";
    pub const COND_CALC_TITLE: &str = "cond.calc_title";
    pub const COND_CALC_NORMALITY: &str = "cond.calc_normality";
    pub const COND_CALC_ENDPOINTS: &str = "cond.calc_endpoints";
    pub const COND_CALC_HCL: &str = "cond.calc_hcl";
    pub const COND_CALC_CH3COOH: &str = "cond.calc_ch3cooh";
    pub const COND_RESULTS_TITLE: &str = "cond.results_title";
    pub const COND_RESULT_HCL: &str = "cond.result_hcl";
    pub const COND_RESULT_CH3COOH: &str = "cond.result_ch3cooh";

    pub const GUI_NAV_HEADING: &str = "gui.nav_heading";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_SETTINGS_LANGUAGE: &str = "gui.settings_language";
    pub const GUI_SETTINGS_LANG_AUTO: &str = "gui.settings_lang_auto";
    pub const GUI_SETTINGS_PACK_DIR: &str = "gui.settings_pack_dir";
    pub const GUI_SETTINGS_SAVE: &str = "gui.settings_save";
    pub const GUI_SETTINGS_SAVED: &str = "gui.settings_saved";
    pub const GUI_EXPORT_CSV: &str = "gui.export_csv";
    pub const GUI_EXPORT_DONE: &str = "gui.export_done";
    pub const GUI_EXPORT_FAILED: &str = "gui.export_failed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if let Some(map) = &overrides {
            tracing::info!(lang = lang_code, entries = map.len(), "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 언어팩 문자열을 직접 지정한다.
    pub fn with_overrides(lang_code: &str, overrides: HashMap<String, String>) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: Some(overrides),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순이며, 영어 번역이 없으면 한국어로 폴백한다.
    pub fn t(&self, key: &str) -> Cow<'static, str> {
        if let Some(v) = self.lookup(key) {
            return Cow::Owned(v);
        }
        Cow::Borrowed(match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        })
    }

    /// `{name}` 자리표시자를 채운 번역.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// `{name}` 형태의 자리표시자를 값으로 바꾼다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_language_pack(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

/// 언어팩 TOML을 `section.key` 형태의 평평한 맵으로 바꾼다. 문자열이 하나도 없으면 None.
pub fn parse_language_pack(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "화학 가상 실험실",
        INSUFFICIENT_DATA => "계산할 수 없습니다. 데이터를 더 모으세요 (현재 {available}행, 최소 {required}행).",

        PROMPT_SELECT => "선택: ",
        PROMPT_FIELD => "{label} [{min} ~ {max}, 기본값 {default}]: ",
        MENU_EXIT => "0) 종료",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        CHART_LEGEND => "범례",
        CHART_NO_DATA => "(그릴 데이터가 없습니다)",

        HOME_SUBTITLE => "물리화학 대화형 실험",
        HOME_PHENOL_CARD => "페놀-물 CST: 임계 용해 온도 측정",
        HOME_TITRATION_CARD => "전도도 적정: HCl-CH₃COOH 혼합물 분석",

        ACTION_START_PHENOL => "CST 실험 시작",
        ACTION_START_TITRATION => "적정 실험 시작",
        ACTION_START_EXPERIMENT => "실험 시작",
        ACTION_HEAT_MIXTURE => "혼합물 가열",
        ACTION_COOL_MIXTURE => "혼합물 냉각",
        ACTION_RECORD_AND_ADD_WATER => "온도 기록 후 물 추가 (+2 ml)",
        ACTION_RECORD_AND_FINISH => "온도 기록 후 관측 표 보기",
        ACTION_PLOT_PHASE_DIAGRAM => "상평형 그림 그리기",
        ACTION_SHOW_RESULTS => "결과 보기",
        ACTION_ESTIMATE_UNKNOWN => "미지 시료 추정",
        ACTION_CALCULATE_NORMALITY => "NaOH 농도 계산",
        ACTION_PROCEED_TO_TITRATION => "적정 진행",
        ACTION_RECORD_MEASUREMENT => "측정값 기록",
        ACTION_PLOT_TITRATION_CURVE => "적정 곡선 그리기",
        ACTION_SHOW_CALCULATIONS => "계산 보기",
        ACTION_BACK_TO_MEASUREMENTS => "측정 단계로 돌아가기",
        ACTION_RETURN_HOME => "처음으로",

        PHENOL_INTRO_TITLE => "페놀-물 계의 CST 측정",
        PHENOL_INTRO_AIM => "목적: 페놀-물 계의 임계 용해 온도(CST)를 구한다.",
        PHENOL_INTRO_THEORY => "이론: 페놀과 물은 CST(약 68°C) 아래에서 부분적으로만 섞인다. CST 이상에서는 완전히 섞이며, 탁도 변화로 상 경계를 그린다.",
        PHENOL_ADD_TITLE => "혼합물 준비",
        PHENOL_ADD_HINT => "{trial}번째 시행: 기록할 때마다 물이 2 ml씩 늘어납니다.",
        PHENOL_FIELD_WATER => "물 부피 (ml)",
        PHENOL_FIELD_PHENOL => "페놀 부피 (ml)",
        PHENOL_OBSERVE_TITLE => "상전이 관찰",
        PHENOL_MIXTURE => "혼합물: 페놀 {phenol} ml + 물 {water} ml (페놀 {percent}%)",
        PHENOL_DISAPPEAR => "가열 시 탁도가 사라지는 온도: {temp}°C",
        PHENOL_RECORD_TITLE => "데이터 기록",
        PHENOL_REAPPEAR => "냉각 시 탁도가 다시 나타나는 온도: {temp}°C",
        PHENOL_MEAN => "평균 온도: {temp}°C",
        PHENOL_TABLE_TITLE => "관측 표",
        PHENOL_ROWS_RECORDED => "기록된 관측 {count}건",
        PHENOL_COL_PHENOL => "페놀 (ml)",
        PHENOL_COL_WATER => "물 (ml)",
        PHENOL_COL_PERCENT => "페놀 %",
        PHENOL_COL_DISAPPEAR => "소멸 온도 (°C)",
        PHENOL_COL_REAPPEAR => "재출현 온도 (°C)",
        PHENOL_COL_MEAN => "평균 온도 (°C)",
        PHENOL_GRAPH_TITLE => "상평형 분석",
        PHENOL_CHART_TITLE => "페놀-물 상평형 그림",
        PHENOL_AXIS_X => "페놀 농도 (%)",
        PHENOL_AXIS_Y => "온도 (°C)",
        PHENOL_SERIES_MEAN => "평균 온도",
        PHENOL_SERIES_DISAPPEAR => "소멸 온도",
        PHENOL_SERIES_REAPPEAR => "재출현 온도",
        PHENOL_CST_MARKER => "CST: {temp}°C, 페놀 {percent}%",
        PHENOL_RESULTS_TITLE => "결과",
        PHENOL_RESULT_CST => "임계 용해 온도(CST): {temp}°C",
        PHENOL_RESULT_PERCENT => "CST에서의 페놀 농도: {percent}%",
        PHENOL_RESULT_HYSTERESIS => "평균 온도 이력: {temp}°C",
        PHENOL_FIELD_UNKNOWN => "미지 시료의 혼화 온도 (°C)",
        PHENOL_UNKNOWN_HEADING => "미지 시료 ({temp}°C에서 혼화):",
        PHENOL_UNKNOWN_ABOVE_CST => "CST보다 높은 온도입니다. 모든 조성에서 완전히 섞입니다.",
        PHENOL_UNKNOWN_WATER_RICH => "물이 많은 쪽: 페놀 {percent}%",
        PHENOL_UNKNOWN_WATER_RICH_NONE => "물이 많은 쪽: 측정 범위 밖",
        PHENOL_UNKNOWN_PHENOL_RICH => "페놀이 많은 쪽: 페놀 {percent}%",
        PHENOL_UNKNOWN_PHENOL_RICH_NONE => "페놀이 많은 쪽: 측정 범위 밖",

        COND_INTRO_TITLE => "전도도 적정",
        COND_INTRO_AIM => "목적: 혼합물 속 HCl과 CH₃COOH의 양을 구한다.",
        COND_INTRO_THEORY => "이론: NaOH를 더하면 빠른 H⁺가 Na⁺로 바뀌어 전도도가 떨어지고, 산이 모두 중화된 뒤에는 과잉 OH⁻ 때문에 다시 오른다. 기울기가 바뀌는 곳이 종말점이다.",
        COND_STD_TITLE => "NaOH 용액 표준화",
        COND_STD_TEXT => "{normality} N 옥살산 {volume} ml를 NaOH로 적정합니다.",
        COND_FIELD_NAOH_USED => "사용한 NaOH 부피 (ml)",
        COND_NORMALITY => "NaOH 농도: {normality} N",
        COND_NORMALITY_DEFAULT => "아직 표준화하지 않았습니다. 현재 {normality} N을 사용합니다.",
        COND_TITRATE_TITLE => "전도도 적정",
        COND_FIELD_NAOH_ADDED => "누적 NaOH (ml)",
        COND_PROGRESS => "기록된 측정 {count}건, 다음 부피 {next} ml",
        COND_LAST_READING => "마지막 측정: {volume} ml → {conductance} mS",
        COND_NOISE_ON => "측정기 잡음이 켜져 있습니다.",
        COND_TABLE_TITLE => "측정 표",
        COND_COL_NAOH => "NaOH (ml)",
        COND_COL_CONDUCTANCE => "전도도 (mS)",
        COND_GRAPH_TITLE => "적정 곡선",
        COND_CHART_TITLE => "전도도 적정 곡선",
        COND_AXIS_X => "NaOH 부피 (ml)",
        COND_AXIS_Y => "전도도 (mS)",
        COND_SERIES => "전도도",
        COND_HCL_MARKER => "HCl 종말점: {volume} ml",
        COND_CH3COOH_MARKER => "CH₃COOH 종말점: {volume} ml",
        COND_CALC_TITLE => "계산",
        COND_CALC_NORMALITY => "NaOH 농도: {normality} N",
        COND_CALC_ENDPOINTS => "종말점: HCl {hcl} ml, CH₃COOH {ch3cooh} ml",
        COND_CALC_HCL => "N(HCl) = {normality} × {hcl} / 10 = {result} N",
        COND_CALC_CH3COOH => "N(CH₃COOH) = {normality} × ({ch3cooh} - {hcl}) / 10 = {result} N",
        COND_RESULTS_TITLE => "결과",
        COND_RESULT_HCL => "HCl의 양: {mass} g",
        COND_RESULT_CH3COOH => "CH₃COOH의 양: {mass} g",

        GUI_NAV_HEADING => "실험 단계",
        GUI_SETTINGS => "설정",
        GUI_SETTINGS_LANGUAGE => "언어",
        GUI_SETTINGS_LANG_AUTO => "시스템",
        GUI_SETTINGS_PACK_DIR => "언어팩 디렉터리",
        GUI_SETTINGS_SAVE => "저장",
        GUI_SETTINGS_SAVED => "저장되었습니다.",
        GUI_EXPORT_CSV => "CSV로 내보내기",
        GUI_EXPORT_DONE => "저장함: {path}",
        GUI_EXPORT_FAILED => "내보내기 실패: {error}",
        _ => "[누락된 문자열]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        APP_TITLE => "Chemistry Virtual Lab",
        INSUFFICIENT_DATA => "Cannot compute: collect more data ({available} of at least {required} rows).",

        PROMPT_SELECT => "Select: ",
        PROMPT_FIELD => "{label} [{min} to {max}, default {default}]: ",
        MENU_EXIT => "0) Exit",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        CHART_LEGEND => "Legend",
        CHART_NO_DATA => "(no data to plot)",

        HOME_SUBTITLE => "Interactive experiments in physical chemistry",
        HOME_PHENOL_CARD => "Phenol-Water CST: determine the critical solution temperature",
        HOME_TITRATION_CARD => "Conductometric Titration: analyze an HCl-CH₃COOH mixture",

        ACTION_START_PHENOL => "Start CST Experiment",
        ACTION_START_TITRATION => "Start Titration",
        ACTION_START_EXPERIMENT => "Start Experiment",
        ACTION_HEAT_MIXTURE => "Heat Mixture",
        ACTION_COOL_MIXTURE => "Cool Mixture",
        ACTION_RECORD_AND_ADD_WATER => "Record & Add More Water (+2 ml)",
        ACTION_RECORD_AND_FINISH => "Record & Show Observation Table",
        ACTION_PLOT_PHASE_DIAGRAM => "Plot Phase Diagram",
        ACTION_SHOW_RESULTS => "Show Results",
        ACTION_ESTIMATE_UNKNOWN => "Estimate Unknown Sample",
        ACTION_CALCULATE_NORMALITY => "Calculate NaOH Normality",
        ACTION_PROCEED_TO_TITRATION => "Proceed to Titration",
        ACTION_RECORD_MEASUREMENT => "Record Measurement",
        ACTION_PLOT_TITRATION_CURVE => "Plot Titration Curve",
        ACTION_SHOW_CALCULATIONS => "Show Calculations",
        ACTION_BACK_TO_MEASUREMENTS => "Back to Measurements",
        ACTION_RETURN_HOME => "Return Home",

        PHENOL_INTRO_TITLE => "Phenol-Water CST Determination",
        PHENOL_INTRO_AIM => "Aim: determine the critical solution temperature (CST) of the phenol-water system.",
        PHENOL_INTRO_THEORY => "Theory: phenol and water are only partially miscible below the CST (about 68°C). Above it they mix completely; the phase boundary is mapped by watching the turbidity change.",
        PHENOL_ADD_TITLE => "Prepare Mixture",
        PHENOL_ADD_HINT => "Trial {trial}: water increases by 2 ml after each record.",
        PHENOL_FIELD_WATER => "Water volume (ml)",
        PHENOL_FIELD_PHENOL => "Phenol volume (ml)",
        PHENOL_OBSERVE_TITLE => "Observe Phase Transition",
        PHENOL_MIXTURE => "Mixture: {phenol} ml phenol + {water} ml water ({percent}% phenol)",
        PHENOL_DISAPPEAR => "Turbidity disappears on heating at: {temp}°C",
        PHENOL_RECORD_TITLE => "Record Data",
        PHENOL_REAPPEAR => "Upon cooling, turbidity reappears at: {temp}°C",
        PHENOL_MEAN => "Mean temperature: {temp}°C",
        PHENOL_TABLE_TITLE => "Observation Table",
        PHENOL_ROWS_RECORDED => "{count} observations recorded",
        PHENOL_COL_PHENOL => "Phenol (ml)",
        PHENOL_COL_WATER => "Water (ml)",
        PHENOL_COL_PERCENT => "% Phenol",
        PHENOL_COL_DISAPPEAR => "Disappear Temp (°C)",
        PHENOL_COL_REAPPEAR => "Reappear Temp (°C)",
        PHENOL_COL_MEAN => "Mean Temp (°C)",
        PHENOL_GRAPH_TITLE => "Phase Diagram Analysis",
        PHENOL_CHART_TITLE => "Phenol-Water Phase Diagram",
        PHENOL_AXIS_X => "Phenol Concentration (%)",
        PHENOL_AXIS_Y => "Temperature (°C)",
        PHENOL_SERIES_MEAN => "Mean CST",
        PHENOL_SERIES_DISAPPEAR => "Disappearance Temp",
        PHENOL_SERIES_REAPPEAR => "Reappearance Temp",
        PHENOL_CST_MARKER => "CST: {temp}°C at {percent}% phenol",
        PHENOL_RESULTS_TITLE => "Results",
        PHENOL_RESULT_CST => "Critical Solution Temperature (CST): {temp}°C",
        PHENOL_RESULT_PERCENT => "Phenol concentration at CST: {percent}%",
        PHENOL_RESULT_HYSTERESIS => "Temperature hysteresis (avg): {temp}°C",
        PHENOL_FIELD_UNKNOWN => "Unknown sample miscibility temperature (°C)",
        PHENOL_UNKNOWN_HEADING => "Unknown sample (miscible at {temp}°C):",
        PHENOL_UNKNOWN_ABOVE_CST => "Above the CST: the sample is miscible at every composition.",
        PHENOL_UNKNOWN_WATER_RICH => "Water-rich branch: {percent}% phenol",
        PHENOL_UNKNOWN_WATER_RICH_NONE => "Water-rich branch: outside the measured range",
        PHENOL_UNKNOWN_PHENOL_RICH => "Phenol-rich branch: {percent}% phenol",
        PHENOL_UNKNOWN_PHENOL_RICH_NONE => "Phenol-rich branch: outside the measured range",

        COND_INTRO_TITLE => "Conductometric Titration",
        COND_INTRO_AIM => "Aim: determine the strength of HCl and CH₃COOH in a mixture.",
        COND_INTRO_THEORY => "Theory: adding NaOH replaces fast H⁺ with slower Na⁺, so conductance falls; once the acid is consumed, excess OH⁻ makes it rise again. The slope changes mark the endpoints.",
        COND_STD_TITLE => "Standardize NaOH Solution",
        COND_STD_TEXT => "{volume} ml of {normality} N oxalic acid is titrated against NaOH.",
        COND_FIELD_NAOH_USED => "Volume of NaOH used (ml)",
        COND_NORMALITY => "NaOH Normality: {normality} N",
        COND_NORMALITY_DEFAULT => "Not standardized yet: currently using {normality} N.",
        COND_TITRATE_TITLE => "Conductometric Titration",
        COND_FIELD_NAOH_ADDED => "Add NaOH (ml)",
        COND_PROGRESS => "{count} readings recorded, next volume {next} ml",
        COND_LAST_READING => "Last reading: {volume} ml → {conductance} mS",
        COND_NOISE_ON => "Meter noise is enabled.",
        COND_TABLE_TITLE => "Observation Table",
        COND_COL_NAOH => "NaOH (ml)",
        COND_COL_CONDUCTANCE => "Conductance (mS)",
        COND_GRAPH_TITLE => "Titration Curve",
        COND_CHART_TITLE => "Conductometric Titration Curve",
        COND_AXIS_X => "Volume of NaOH (ml)",
        COND_AXIS_Y => "Conductance (mS)",
        COND_SERIES => "Conductance",
        COND_HCL_MARKER => "HCl endpoint: {volume} ml",
        COND_CH3COOH_MARKER => "CH₃COOH endpoint: {volume} ml",
        COND_CALC_TITLE => "Calculations",
        COND_CALC_NORMALITY => "NaOH normality: {normality} N",
        COND_CALC_ENDPOINTS => "Endpoints: HCl {hcl} ml, CH₃COOH {ch3cooh} ml",
        COND_CALC_HCL => "N(HCl) = {normality} × {hcl} / 10 = {result} N",
        COND_CALC_CH3COOH => "N(CH₃COOH) = {normality} × ({ch3cooh} - {hcl}) / 10 = {result} N",
        COND_RESULTS_TITLE => "Results",
        COND_RESULT_HCL => "Amount of HCl: {mass} g",
        COND_RESULT_CH3COOH => "Amount of CH₃COOH: {mass} g",

        GUI_NAV_HEADING => "Steps",
        GUI_SETTINGS => "Settings",
        GUI_SETTINGS_LANGUAGE => "Language",
        GUI_SETTINGS_LANG_AUTO => "System",
        GUI_SETTINGS_PACK_DIR => "Language pack directory",
        GUI_SETTINGS_SAVE => "Save",
        GUI_SETTINGS_SAVED => "Saved.",
        GUI_EXPORT_CSV => "Export CSV",
        GUI_EXPORT_DONE => "Saved {path}",
        GUI_EXPORT_FAILED => "Export failed: {error}",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_fills_all_placeholders() {
        let out = fill_template("{a} + {b} = {a}{b}", &[("a", "1".into()), ("b", "2".into())]);
        assert_eq!(out, "1 + 2 = 12");
    }

    #[test]
    fn language_pack_flattens_nested_tables() {
        let map = parse_language_pack(
            r#"
            [action]
            return_home = "Zurück"
            "#,
        )
        .expect("pack");
        assert_eq!(map.get(keys::ACTION_RETURN_HOME).map(String::as_str), Some("Zurück"));
    }

    #[test]
    fn overrides_win_over_built_in_strings() {
        let mut map = HashMap::new();
        map.insert(keys::APP_TITLE.to_string(), "Labor".to_string());
        let tr = Translator::with_overrides("en", map);
        assert_eq!(tr.t(keys::APP_TITLE), "Labor");
        assert_eq!(tr.t(keys::ACTION_RETURN_HOME), "Return Home");
    }

    #[test]
    fn every_english_key_has_a_korean_string() {
        let tr = Translator::new("ko");
        for key in [keys::APP_TITLE, keys::COND_RESULT_HCL, keys::PHENOL_CST_MARKER] {
            assert_ne!(tr.t(key), "[누락된 문자열]");
        }
        assert_eq!(normalize_lang("en-US").as_deref(), Some("en"));
        assert_eq!(normalize_lang("auto"), None);
    }
}
