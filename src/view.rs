//! 화면 표현 계층(CLI/GUI)에 넘기는 데이터. 코어는 내용만 정하고
//! 배치나 픽셀 정보는 다루지 않는다.

use std::collections::HashMap;

use crate::page::{Action, PageId};

/// 숫자 입력 칸 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    WaterVolume,
    PhenolVolume,
    NaohUsed,
    NaohAdded,
    UnknownTemperature,
}

/// 입력 칸의 허용 범위와 증분.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldBounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// 사용자에게 숫자 하나를 요청하는 입력 칸.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    pub id: FieldId,
    pub label: String,
    pub bounds: FieldBounds,
    pub default: f64,
}

/// 제출된 입력값 모음.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: HashMap<FieldId, f64>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: FieldId, value: f64) -> Self {
        self.set(id, value);
        self
    }

    pub fn set(&mut self, id: FieldId, value: f64) {
        self.values.insert(id, value);
    }

    pub fn get(&self, id: FieldId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    /// 제출값을 범위 안으로 맞춰 읽는다. 없으면 `default`.
    pub fn read(&self, id: FieldId, bounds: &FieldBounds, default: f64) -> f64 {
        bounds.clamp(self.get(id).unwrap_or(default))
    }

    /// 화면의 기본값으로 채운 입력값.
    pub fn defaults_of(view: &PageView) -> Self {
        let mut form = Self::new();
        for field in &view.fields {
            form.set(field.id, field.default);
        }
        form
    }
}

/// 버튼 하나.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpec {
    pub action: Action,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

/// 숫자 표.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    /// 표시 소수 자릿수
    pub precision: usize,
    /// 내보내기 파일 이름 제안
    pub export_name: &'static str,
}

impl TableView {
    /// CSV 문자열로 변환한다. 머리글의 쉼표와 따옴표는 이스케이프한다.
    pub fn to_csv(&self) -> String {
        let mut out = self
            .headers
            .iter()
            .map(|h| csv_field(h))
            .collect::<Vec<_>>()
            .join(",");
        out.push('\n');
        for row in &self.rows {
            let line = row
                .iter()
                .map(|v| format!("{v:.prec$}", prec = self.precision.max(4)))
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Line,
    Points,
}

/// 순서 있는 (x, y) 계열.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

/// 그래프 위 주석. `y`가 없으면 x 위치의 세로선으로 그린다.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub x: f64,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub markers: Vec<Marker>,
}

/// 화면을 구성하는 블록.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(String),
    Notice { level: NoticeLevel, text: String },
    Table(TableView),
    Chart(Chart),
}

/// 한 화면의 전체 내용.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub page: PageId,
    pub title: String,
    pub blocks: Vec<Block>,
    pub fields: Vec<NumberField>,
    pub actions: Vec<ActionSpec>,
}

impl PageView {
    pub fn new(page: PageId, title: impl Into<String>) -> Self {
        Self {
            page,
            title: title.into(),
            blocks: Vec::new(),
            fields: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Text(text.into()));
        self
    }

    pub fn notice(mut self, level: NoticeLevel, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Notice {
            level,
            text: text.into(),
        });
        self
    }

    pub fn table(mut self, table: TableView) -> Self {
        self.blocks.push(Block::Table(table));
        self
    }

    pub fn chart(mut self, chart: Chart) -> Self {
        self.blocks.push(Block::Chart(chart));
        self
    }

    pub fn field(
        mut self,
        id: FieldId,
        label: impl Into<String>,
        bounds: FieldBounds,
        default: f64,
    ) -> Self {
        self.fields.push(NumberField {
            id,
            label: label.into(),
            bounds,
            default: bounds.clamp(default),
        });
        self
    }

    pub fn action(mut self, action: Action, label: impl Into<String>) -> Self {
        self.actions.push(ActionSpec {
            action,
            label: label.into(),
        });
        self
    }

    pub fn offers(&self, action: Action) -> bool {
        self.actions.iter().any(|a| a.action == action)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableView> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Chart(c) => Some(c),
            _ => None,
        })
    }
}
