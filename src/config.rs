use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 기본 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";
/// 결과 화면 미지 시료의 기본 조성(% phenol).
pub const DEFAULT_UNKNOWN_SAMPLE_PERCENT: f64 = 45.0;

/// 전도도 적정 측정기 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitrationSettings {
    /// 측정값에 대칭 잡음을 더할지 여부
    pub noise_enabled: bool,
    /// 잡음 진폭(mS)
    pub noise_amplitude_ms: f64,
    /// 재현 가능한 잡음을 위한 시드. 없으면 매 실행 달라진다.
    pub noise_seed: Option<u64>,
}

impl Default for TitrationSettings {
    fn default() -> Self {
        Self {
            noise_enabled: false,
            noise_amplitude_ms: 0.01,
            noise_seed: None,
        }
    }
}

/// 페놀-물 실험 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhenolSettings {
    /// 결과 화면에서 합성하는 미지 시료의 조성(% phenol)
    pub unknown_sample_percent: f64,
}

impl Default for PhenolSettings {
    fn default() -> Self {
        Self {
            unknown_sample_percent: DEFAULT_UNKNOWN_SAMPLE_PERCENT,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en ...)
    pub language: String,
    /// 사용자 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    pub titration: TitrationSettings,
    pub phenol: PhenolSettings,
    /// 설정을 읽어온 경로. 저장 시 같은 곳에 쓴다.
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            titration: TitrationSettings::default(),
            phenol: PhenolSettings::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 현재 디렉터리의 config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_FILE))
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값으로 만들어 저장한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str::<Config>(&content)?
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "default config written");
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

/// 문자열에서 설정을 파싱한다. 빠진 항목은 기본값으로 채운다.
pub fn parse(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 읽어온 파일(없으면 config.toml)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        save_config(self, &path)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
