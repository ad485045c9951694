#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use chem_virtual_lab::{
    app, config,
    i18n::{self, keys},
    page::{Action, Experiment, PageId},
    router,
    session::Session,
    view::{Block, Chart, FormValues, NoticeLevel, PageView, SeriesStyle, TableView},
};
use clap::Parser;
use eframe::{egui, App, Frame};
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, PlotPoints, Points, VLine};
use image::GenericImageView;
use rfd::FileDialog;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// 데스크톱용 화학 가상 실험실.
#[derive(Debug, Parser)]
#[command(name = "chem_virtual_lab", version)]
struct GuiCli {
    /// 언어 (auto/ko/en). 생략하면 설정 파일을 따른다.
    #[arg(long, short = 'L')]
    lang: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    app::init_tracing();

    let cli = GuiCli::parse();

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        config::Config::default()
    });
    if let Some(lang_cli) = cli.lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Chemistry Virtual Lab",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!(error = %e, "korean font not found");
            }
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        // 한글은 기본 글꼴의 대체 글꼴로 그린다.
        fonts
            .families
            .entry(family)
            .or_default()
            .push(font_name.clone());
    }
    ctx.set_fonts(fonts);
}

/// 한글을 표시할 폰트를 찾아 등록한다.
/// 1) assets/fonts 아래의 프로젝트 폰트
/// 2) 운영체제별 시스템 폰트(맑은 고딕, 나눔고딕, Noto CJK, Apple SD 고딕)
/// 3) 모두 실패 시 Err를 반환하고 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = ["assets/fonts/malgun.ttf", "assets/fonts/NanumGothic.ttf"]
        .into_iter()
        .map(PathBuf::from)
        .collect();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].into_iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .into_iter()
        .map(PathBuf::from),
    );

    let Some(path) = candidates.iter().find(|p| p.exists()) else {
        return Err("Font not found. Place a Korean .ttf under assets/fonts/.".into());
    };
    let bytes =
        fs::read(path).map_err(|e| format!("Failed to read font ({}): {e}", path.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    tracing::debug!(path = %path.display(), "font registered");
    Ok(())
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    session: Session,
    /// 현재 화면 내용. 동작 처리나 언어 변경 후에만 다시 만든다.
    view: PageView,
    form: FormValues,
    status: Option<(NoticeLevel, String)>,
    show_settings_modal: bool,
    lang_input: String,
    lang_pack_dir_input: String,
    lang_save_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        tracing::info!(language = %lang_code, "gui started");
        let session = Session::from_config(&config);
        let view = router::view(&session, &tr);
        let form = FormValues::defaults_of(&view);
        Self {
            lang_input: config.language.clone(),
            lang_pack_dir_input: config.language_pack_dir.clone().unwrap_or_default(),
            config,
            tr,
            session,
            view,
            form,
            status: None,
            show_settings_modal: false,
            lang_save_status: None,
        }
    }

    fn refresh_view(&mut self) {
        self.view = router::view(&self.session, &self.tr);
        self.form = FormValues::defaults_of(&self.view);
    }

    fn dispatch(&mut self, action: Action) {
        match router::dispatch(&mut self.session, action, &self.form, &self.tr) {
            Ok(_) => self.status = None,
            Err(e) => {
                let prefix = self.tr.t(keys::ERROR_PREFIX);
                self.status = Some((NoticeLevel::Warning, format!("{prefix}: {e}")));
            }
        }
        self.refresh_view();
    }

    fn export_table(&mut self, table: &TableView) {
        let Some(path) = FileDialog::new()
            .set_file_name(table.export_name)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };
        self.status = Some(match app::export_csv(&path, &table.to_csv()) {
            Ok(()) => (
                NoticeLevel::Success,
                self.tr
                    .tf(keys::GUI_EXPORT_DONE, &[("path", path.display().to_string())]),
            ),
            Err(e) => (
                NoticeLevel::Warning,
                self.tr.tf(keys::GUI_EXPORT_FAILED, &[("error", e.to_string())]),
            ),
        });
    }

    /// 사이드 메뉴: 진행 중인 실험의 단계 목록.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let current = self.view.page;
        ui.vertical_centered(|ui| {
            ui.heading(self.tr.t(keys::GUI_NAV_HEADING).as_ref());
            ui.add_space(8.0);
        });
        let flow: &[PageId] = match current.experiment() {
            Some(Experiment::PhenolWater) => &PageId::PHENOL_FLOW,
            Some(Experiment::Conductometric) => &PageId::TITRATION_FLOW,
            None => &[],
        };
        // 홈 항목은 현재 화면이 홈으로 돌아가기를 제공할 때만 누를 수 있다.
        let home = egui::SelectableLabel::new(
            current == PageId::Home,
            self.tr.t(keys::APP_TITLE).as_ref(),
        );
        let can_go_home = self.view.offers(Action::ReturnHome);
        if ui.add_enabled(can_go_home, home).clicked() {
            self.go_home();
        }
        for (i, id) in flow.iter().enumerate() {
            let label = format!("{}. {}", i + 1, self.tr.t(router::title_key(*id)).as_ref());
            if *id == current {
                let color = ui.visuals().selection.stroke.color;
                ui.label(egui::RichText::new(label).strong().color(color));
            } else {
                ui.label(label);
            }
        }
    }

    /// 현재 화면이 홈 이동을 제공하면 이동한다.
    fn go_home(&mut self) -> bool {
        if !self.view.offers(Action::ReturnHome) {
            return false;
        }
        self.dispatch(Action::ReturnHome);
        true
    }

    fn ui_page(&mut self, ui: &mut egui::Ui) {
        let view = self.view.clone();
        let mut export: Option<TableView> = None;
        let mut clicked: Option<Action> = None;

        ui.heading(&view.title);
        ui.separator();
        if let Some((level, msg)) = &self.status {
            notice_label(ui, *level, msg);
        }
        for (idx, block) in view.blocks.iter().enumerate() {
            match block {
                Block::Text(text) => {
                    ui.label(text);
                }
                Block::Notice { level, text } => notice_label(ui, *level, text),
                Block::Table(table) => {
                    if table_ui(ui, table, idx, &self.tr) {
                        export = Some(table.clone());
                    }
                }
                Block::Chart(chart) => chart_ui(ui, chart, idx, &self.tr),
            }
            ui.add_space(6.0);
        }

        if !view.fields.is_empty() {
            ui.separator();
            egui::Grid::new("fields").num_columns(2).show(ui, |ui| {
                for field in &view.fields {
                    let mut v = self.form.get(field.id).unwrap_or(field.default);
                    ui.label(&field.label);
                    ui.add(
                        egui::DragValue::new(&mut v)
                            .clamp_range(field.bounds.min..=field.bounds.max)
                            .speed(field.bounds.step)
                            .max_decimals(2),
                    );
                    self.form.set(field.id, field.bounds.clamp(v));
                    ui.end_row();
                }
            });
        }

        ui.separator();
        ui.horizontal_wrapped(|ui| {
            for spec in &view.actions {
                if ui.button(&spec.label).clicked() {
                    clicked = Some(spec.action);
                }
            }
        });

        if let Some(table) = export {
            self.export_table(&table);
        }
        if let Some(action) = clicked {
            self.dispatch(action);
        }
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut apply = false;
        egui::Window::new(tr.t(keys::GUI_SETTINGS).as_ref())
            .collapsible(false)
            .resizable(true)
            .open(&mut self.show_settings_modal)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::GUI_SETTINGS_LANGUAGE).as_ref());
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            tr.t(keys::GUI_SETTINGS_LANG_AUTO).as_ref(),
                        );
                        ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                        ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                    });
                ui.separator();
                ui.label(tr.t(keys::GUI_SETTINGS_PACK_DIR).as_ref());
                ui.text_edit_singleline(&mut self.lang_pack_dir_input);
                ui.separator();
                if ui.button(tr.t(keys::GUI_SETTINGS_SAVE).as_ref()).clicked() {
                    apply = true;
                }
                if let Some(msg) = &self.lang_save_status {
                    ui.label(msg);
                }
            });
        if apply {
            self.apply_settings();
        }
    }

    fn apply_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        let dir = self.lang_pack_dir_input.trim();
        self.config.language_pack_dir = (!dir.is_empty()).then(|| dir.to_string());
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.refresh_view();
        self.lang_save_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::GUI_SETTINGS_SAVED).into_owned(),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX).as_ref()),
        });
    }
}

fn notice_label(ui: &mut egui::Ui, level: NoticeLevel, text: &str) {
    let color = match level {
        NoticeLevel::Info => ui.visuals().text_color(),
        NoticeLevel::Success => egui::Color32::from_rgb(60, 160, 90),
        NoticeLevel::Warning => egui::Color32::from_rgb(220, 140, 40),
    };
    ui.colored_label(color, text);
}

/// 표를 그린다. 내보내기 버튼이 눌리면 true.
fn table_ui(ui: &mut egui::Ui, table: &TableView, idx: usize, tr: &i18n::Translator) -> bool {
    let export = ui.button(tr.t(keys::GUI_EXPORT_CSV).as_ref()).clicked();
    egui::ScrollArea::horizontal()
        .id_source(("table_scroll", idx))
        .show(ui, |ui| {
            egui::Grid::new(("table", idx))
                .striped(true)
                .num_columns(table.headers.len())
                .show(ui, |ui| {
                    for h in &table.headers {
                        ui.strong(h);
                    }
                    ui.end_row();
                    for row in &table.rows {
                        for v in row {
                            ui.label(format!("{v:.prec$}", prec = table.precision));
                        }
                        ui.end_row();
                    }
                });
        });
    export
}

fn chart_ui(ui: &mut egui::Ui, chart: &Chart, idx: usize, tr: &i18n::Translator) {
    ui.strong(&chart.title);
    if chart.series.iter().all(|s| s.points.is_empty()) {
        ui.label(tr.t(keys::CHART_NO_DATA).as_ref());
        return;
    }
    Plot::new(("chart", idx))
        .height(360.0)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .legend(Legend::default().position(Corner::RightTop))
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let pts: PlotPoints = series.points.iter().map(|&(x, y)| [x, y]).collect();
                match series.style {
                    SeriesStyle::Line => {
                        plot_ui.line(Line::new(pts).width(2.0).name(&series.name));
                    }
                    SeriesStyle::Points => {
                        plot_ui.points(Points::new(pts).radius(3.5).name(&series.name));
                    }
                }
            }
            for marker in &chart.markers {
                match marker.y {
                    Some(y) => plot_ui.points(
                        Points::new(PlotPoints::new(vec![[marker.x, y]]))
                            .shape(MarkerShape::Diamond)
                            .filled(true)
                            .radius(7.0)
                            .name(&marker.label),
                    ),
                    None => plot_ui.vline(VLine::new(marker.x).width(1.5).name(&marker.label)),
                }
            }
        });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE).as_ref());
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_SETTINGS).as_ref()).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(160.0)
            .default_width(220.0)
            .show(ctx, |ui| self.ui_nav(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_page(ui));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> GuiApp {
        GuiApp::new(config::Config::default())
    }

    #[test]
    fn dispatch_refreshes_view_and_form_defaults() {
        let mut gui = test_app();
        assert_eq!(gui.view.page, PageId::Home);
        gui.dispatch(Action::StartTitration);
        gui.dispatch(Action::StartExperiment);
        gui.dispatch(Action::ProceedToTitration);
        assert_eq!(gui.view.page, PageId::CondTitrate);
        gui.dispatch(Action::RecordMeasurement);
        assert_eq!(gui.session.titration.table.len(), 1);
        let added = gui.form.get(chem_virtual_lab::view::FieldId::NaohAdded);
        assert!(added.is_some_and(|v| (v - 0.2).abs() < 1e-9));
    }

    #[test]
    fn home_entry_only_leaves_pages_that_offer_it() {
        let mut gui = test_app();
        gui.dispatch(Action::StartPhenol);
        gui.dispatch(Action::StartExperiment);
        assert_eq!(gui.view.page, PageId::PhenolAddReagents);
        assert!(!gui.go_home());
        assert_eq!(gui.view.page, PageId::PhenolAddReagents);

        gui.dispatch(Action::StartTitration);
        assert!(gui.status.is_some());
        gui.status = None;
        gui.session.current_page = PageId::CondIntro;
        gui.refresh_view();
        assert!(gui.go_home());
        assert_eq!(gui.view.page, PageId::Home);
        assert!(gui.status.is_none());
    }

    #[test]
    fn lang_flag_is_optional() {
        assert_eq!(GuiCli::parse_from(["chem_virtual_lab"]).lang, None);
        let cli = GuiCli::parse_from(["chem_virtual_lab", "-L", "ko"]);
        assert_eq!(cli.lang.as_deref(), Some("ko"));
        let cli = GuiCli::parse_from(["chem_virtual_lab", "--lang=en"]);
        assert_eq!(cli.lang.as_deref(), Some("en"));
    }

    #[test]
    fn rejected_action_sets_warning_status() {
        let mut gui = test_app();
        gui.dispatch(Action::ShowResults);
        assert!(matches!(gui.status, Some((NoticeLevel::Warning, _))));
        assert_eq!(gui.view.page, PageId::Home);
    }
}
