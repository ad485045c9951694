use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};
use crate::i18n::{keys, Translator};
use crate::router::{self, RouteError};
use crate::session::Session;
use crate::ui_cli::{self, Choice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 화면 흐름 오류
    #[error("화면 처리 오류: {0}")]
    Route(#[from] RouteError),
    /// 표 내보내기 오류
    #[error("내보내기 오류({path}): {source}")]
    Export {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 두 실행 파일이 공유하는 로그 구독자를 설치한다. `RUST_LOG`가 없으면 `warn`.
///
/// 로그는 stderr로 보내 터미널 화면(stdout)과 섞이지 않게 한다.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 표를 CSV 파일로 저장한다.
pub fn export_csv(path: &std::path::Path, csv: &str) -> Result<(), AppError> {
    std::fs::write(path, csv).map_err(|source| AppError::Export {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = csv.len(), "table exported");
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 화면을 그리고, 입력 칸을 묻고, 동작을 골라 라우터에 넘기는 일을 반복한다.
/// 잘못된 동작은 알리고 같은 화면에 머문다.
pub fn run(config: &Config, session: &mut Session, tr: &Translator) -> Result<(), AppError> {
    tracing::debug!(language = tr.language_code(), "cli session started");
    loop {
        let view = router::view(session, tr);
        ui_cli::render(&view, tr);
        let action = match ui_cli::choose_action(&view, tr)? {
            Choice::Action(action) => action,
            Choice::Exit => break,
        };
        let form = ui_cli::prompt_fields(&view, tr)?;
        if let Err(err) = router::dispatch(session, action, &form, tr) {
            println!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        }
    }
    config.save()?;
    println!("{}", tr.t(keys::APP_EXIT));
    Ok(())
}
