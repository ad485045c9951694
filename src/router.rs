//! 화면 식별자에서 처리기로의 전체 매핑과 동작 처리.

use thiserror::Error;

use crate::i18n::{keys, Translator};
use crate::page::{Action, PageId};
use crate::phenol::pages as phenol;
use crate::session::Session;
use crate::titration::pages as titration;
use crate::view::{FormValues, PageView};

/// 화면 하나의 처리기.
///
/// `view`는 세션을 읽기만 하고, `act`는 동작 하나를 처리한 뒤 다음 화면을 돌려준다.
pub trait Page: Sync {
    fn view(&self, session: &Session, tr: &Translator) -> PageView;

    fn act(
        &self,
        session: &mut Session,
        action: Action,
        form: &FormValues,
    ) -> Result<PageId, RouteError>;
}

/// 동작 처리 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// 현재 화면에 없는 버튼이 눌림(호스트 계약 위반)
    #[error("화면 {page}에는 동작 {action}이(가) 없습니다")]
    ActionNotOffered { page: PageId, action: Action },
}

impl RouteError {
    pub fn not_offered(page: PageId, action: Action) -> Self {
        RouteError::ActionNotOffered { page, action }
    }
}

/// 화면 식별자 → 처리기. 모든 식별자를 다루므로 "알 수 없는 화면"은 존재하지 않는다.
pub fn page(id: PageId) -> &'static dyn Page {
    match id {
        PageId::Home => &HomePage,
        PageId::PhenolIntro => &phenol::Intro,
        PageId::PhenolAddReagents => &phenol::AddReagents,
        PageId::PhenolObserveDisappear => &phenol::ObserveDisappear,
        PageId::PhenolObserveReappearRecord => &phenol::ObserveReappearRecord,
        PageId::PhenolTable => &phenol::ObservationTable,
        PageId::PhenolGraph => &phenol::PhaseDiagram,
        PageId::PhenolResults => &phenol::Results,
        PageId::CondIntro => &titration::Intro,
        PageId::CondStandardize => &titration::Standardize,
        PageId::CondTitrate => &titration::Titrate,
        PageId::CondTable => &titration::ObservationTable,
        PageId::CondGraph => &titration::TitrationCurve,
        PageId::CondCalc => &titration::Calculations,
        PageId::CondResults => &titration::Results,
    }
}

/// 화면 제목 문자열 키. 화면 내용을 만들지 않고 단계 목록을 그릴 때 쓴다.
pub fn title_key(id: PageId) -> &'static str {
    match id {
        PageId::Home => keys::APP_TITLE,
        PageId::PhenolIntro => keys::PHENOL_INTRO_TITLE,
        PageId::PhenolAddReagents => keys::PHENOL_ADD_TITLE,
        PageId::PhenolObserveDisappear => keys::PHENOL_OBSERVE_TITLE,
        PageId::PhenolObserveReappearRecord => keys::PHENOL_RECORD_TITLE,
        PageId::PhenolTable => keys::PHENOL_TABLE_TITLE,
        PageId::PhenolGraph => keys::PHENOL_GRAPH_TITLE,
        PageId::PhenolResults => keys::PHENOL_RESULTS_TITLE,
        PageId::CondIntro => keys::COND_INTRO_TITLE,
        PageId::CondStandardize => keys::COND_STD_TITLE,
        PageId::CondTitrate => keys::COND_TITRATE_TITLE,
        PageId::CondTable => keys::COND_TABLE_TITLE,
        PageId::CondGraph => keys::COND_GRAPH_TITLE,
        PageId::CondCalc => keys::COND_CALC_TITLE,
        PageId::CondResults => keys::COND_RESULTS_TITLE,
    }
}

/// 현재 화면의 내용을 만든다.
pub fn view(session: &Session, tr: &Translator) -> PageView {
    page(session.current_page).view(session, tr)
}

/// 동작 하나를 동기적으로 처리하고 세션의 현재 화면을 갱신한다.
///
/// 현재 화면이 제공하지 않는 동작이면 세션을 건드리지 않고 오류를 돌려준다.
pub fn dispatch(
    session: &mut Session,
    action: Action,
    form: &FormValues,
    tr: &Translator,
) -> Result<PageId, RouteError> {
    let from = session.current_page;
    let handler = page(from);
    if !handler.view(session, tr).offers(action) {
        tracing::warn!(page = %from, %action, "action not offered by page");
        return Err(RouteError::not_offered(from, action));
    }
    let to = handler.act(session, action, form)?;
    session.current_page = to;
    tracing::info!(from = %from, to = %to, %action, "page transition");
    Ok(to)
}

/// 실험 선택 화면.
pub struct HomePage;

impl Page for HomePage {
    fn view(&self, _session: &Session, tr: &Translator) -> PageView {
        PageView::new(PageId::Home, tr.t(keys::APP_TITLE))
            .text(tr.t(keys::HOME_SUBTITLE))
            .text(tr.t(keys::HOME_PHENOL_CARD))
            .text(tr.t(keys::HOME_TITRATION_CARD))
            .action(Action::StartPhenol, tr.t(keys::ACTION_START_PHENOL))
            .action(Action::StartTitration, tr.t(keys::ACTION_START_TITRATION))
    }

    fn act(
        &self,
        session: &mut Session,
        action: Action,
        _form: &FormValues,
    ) -> Result<PageId, RouteError> {
        match action {
            Action::StartPhenol => {
                session.reset_phenol();
                Ok(PageId::PhenolIntro)
            }
            Action::StartTitration => {
                session.reset_titration();
                Ok(PageId::CondIntro)
            }
            other => Err(RouteError::not_offered(PageId::Home, other)),
        }
    }
}
