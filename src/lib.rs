//! 실험 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 코어를 공유한다.

pub mod analysis;
pub mod app;
pub mod config;
pub mod i18n;
pub mod page;
pub mod phenol;
pub mod quantity;
pub mod router;
pub mod session;
pub mod table;
pub mod titration;
pub mod ui_cli;
pub mod view;
