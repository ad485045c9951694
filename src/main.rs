use std::path::PathBuf;
use std::process::ExitCode;

use chem_virtual_lab::app::{self, AppError};
use chem_virtual_lab::i18n::{self, keys, Translator};
use chem_virtual_lab::session::Session;
use chem_virtual_lab::{config, titration::model::ConductanceMeter};
use clap::Parser;

/// 터미널용 화학 가상 실험실.
#[derive(Debug, Parser)]
#[command(
    name = "chem_virtual_lab_cli",
    about = "Phenol-water CST and conductometric titration virtual lab",
    version
)]
struct Cli {
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,

    /// 측정기 잡음 진폭(mS). 지정하면 설정과 관계없이 잡음을 켠다.
    #[arg(long)]
    noise: Option<f64>,

    /// 잡음 시드
    #[arg(long)]
    seed: Option<u64>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    app::init_tracing();
    let cli = Cli::parse();
    let lang = i18n::resolve_language(&cli.lang, None);
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let tr = Translator::new(&lang);
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let cfg = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load_or_default()?,
    };
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    let mut session = Session::from_config(&cfg);
    if let Some(amplitude) = cli.noise {
        let seed = cli.seed.or(cfg.titration.noise_seed);
        session.titration.meter = ConductanceMeter::with_noise(amplitude, seed);
    } else if let (Some(seed), true) = (cli.seed, cfg.titration.noise_enabled) {
        let amplitude = cfg.titration.noise_amplitude_ms;
        session.titration.meter = ConductanceMeter::with_noise(amplitude, Some(seed));
    }
    tracing::info!(
        language = %lang,
        noisy = session.titration.meter.is_noisy(),
        "starting terminal lab"
    );

    app::run(&cfg, &mut session, &tr)
}
