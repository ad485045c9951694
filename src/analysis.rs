use std::fmt;

use thiserror::Error;

use crate::i18n::{keys, Translator};

/// 어느 관측 표에 대한 분석인지 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Phenol,
    Titration,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Phenol => write!(f, "페놀-물"),
            TableKind::Titration => write!(f, "전도도 적정"),
        }
    }
}

/// 누적된 표로부터 파생값(CST, 종말점 등)을 구할 때의 오류.
///
/// 데이터 부족은 정상적으로 확인 가능한 상태이며, 사용자가 측정 단계로
/// 돌아가 값을 더 모으면 회복된다. 0으로 대체하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{table} 표의 데이터가 부족합니다: 최소 {required}행 필요, 현재 {available}행")]
    InsufficientData {
        table: TableKind,
        required: usize,
        available: usize,
    },
}

impl AnalysisError {
    pub(crate) fn require(table: TableKind, required: usize, available: usize) -> Result<(), Self> {
        if available < required {
            tracing::warn!(%table, required, available, "insufficient data for analysis");
            return Err(AnalysisError::InsufficientData {
                table,
                required,
                available,
            });
        }
        Ok(())
    }

    /// 사용자에게 보여줄 번역된 안내 문구.
    pub fn localized(&self, tr: &Translator) -> String {
        match self {
            AnalysisError::InsufficientData {
                required,
                available,
                ..
            } => tr.tf(
                keys::INSUFFICIENT_DATA,
                &[
                    ("required", required.to_string()),
                    ("available", available.to_string()),
                ],
            ),
        }
    }
}
