use std::io::{self, Write};

use crate::app::AppError;
use crate::i18n::{keys, Translator};
use crate::page::Action;
use crate::view::{Block, Chart, NoticeLevel, PageView, SeriesStyle, TableView};
use crate::view::{FormValues, NumberField};

/// ASCII 그래프 크기(문자 수).
const CHART_WIDTH: usize = 60;
const CHART_HEIGHT: usize = 16;
const SERIES_SYMBOLS: [char; 4] = ['*', 'o', '+', 'x'];
const POINT_MARKER: char = '@';
const LINE_MARKER: char = '|';

/// 동작 메뉴 선택 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Action(Action),
    Exit,
}

/// 화면 내용을 표준 출력에 그린다.
pub fn render(view: &PageView, tr: &Translator) {
    println!("\n=== {} ===", view.title);
    for block in &view.blocks {
        match block {
            Block::Text(text) => println!("{text}"),
            Block::Notice { level, text } => println!("{} {text}", notice_prefix(*level)),
            Block::Table(table) => {
                for line in table_lines(table) {
                    println!("{line}");
                }
            }
            Block::Chart(chart) => {
                for line in chart_lines(chart, tr) {
                    println!("{line}");
                }
            }
        }
    }
}

fn notice_prefix(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "[i]",
        NoticeLevel::Success => "[v]",
        NoticeLevel::Warning => "[!]",
    }
}

/// 번호 메뉴를 보여주고 동작 하나를 고르게 한다. `0`은 종료.
pub fn choose_action(view: &PageView, tr: &Translator) -> Result<Choice, AppError> {
    println!();
    for (i, spec) in view.actions.iter().enumerate() {
        println!("{}) {}", i + 1, spec.label);
    }
    println!("{}", tr.t(keys::MENU_EXIT));
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
        match parse_choice(sel.trim(), view) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_choice(input: &str, view: &PageView) -> Option<Choice> {
    let n = input.parse::<usize>().ok()?;
    if n == 0 {
        return Some(Choice::Exit);
    }
    view.actions.get(n - 1).map(|spec| Choice::Action(spec.action))
}

/// 화면의 입력 칸을 차례로 묻는다. 빈 입력은 기본값, 범위 밖 값은 잘라낸다.
pub fn prompt_fields(view: &PageView, tr: &Translator) -> Result<FormValues, AppError> {
    let mut form = FormValues::new();
    for field in &view.fields {
        let prompt = tr.tf(
            keys::PROMPT_FIELD,
            &[
                ("label", field.label.clone()),
                ("min", format_number(field.bounds.min)),
                ("max", format_number(field.bounds.max)),
                ("default", format_number(field.default)),
            ],
        );
        let value = read_f64_or(&prompt, field, tr)?;
        form.set(field.id, field.bounds.clamp(value));
    }
    Ok(form)
}

fn format_number(v: f64) -> String {
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// 표를 열 너비에 맞춰 정렬된 줄로 만든다.
pub fn table_lines(table: &TableView) -> Vec<String> {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{v:.prec$}", prec = table.precision))
                .collect()
        })
        .collect();
    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let join = |items: Vec<String>| items.join(" | ");
    let mut out = Vec::with_capacity(cells.len() + 2);
    out.push(join(
        table
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad_left(h, *w))
            .collect(),
    ));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in cells {
        out.push(join(
            row.iter()
                .zip(&widths)
                .map(|(c, w)| pad_left(c, *w))
                .collect(),
        ));
    }
    out
}

fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{s}", " ".repeat(width.saturating_sub(len)))
}

/// 그래프를 문자 격자로 그린다. 세로선 표시는 `|` 열, 점 표시는 `@`.
pub fn chart_lines(chart: &Chart, tr: &Translator) -> Vec<String> {
    let mut out = vec![format!("-- {} --", chart.title)];
    let xs = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .chain(chart.markers.iter().map(|m| m.x));
    let ys = chart
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .chain(chart.markers.iter().filter_map(|m| m.y));
    let (Some((x_min, x_max)), Some((y_min, y_max))) = (range(xs), range(ys)) else {
        out.push(tr.t(keys::CHART_NO_DATA).into_owned());
        return out;
    };

    let col = |x: f64| scale(x, x_min, x_max, CHART_WIDTH);
    let row = |y: f64| CHART_HEIGHT - 1 - scale(y, y_min, y_max, CHART_HEIGHT);
    let mut grid = vec![vec![' '; CHART_WIDTH]; CHART_HEIGHT];

    for marker in chart.markers.iter().filter(|m| m.y.is_none()) {
        let c = col(marker.x);
        for line in grid.iter_mut() {
            line[c] = LINE_MARKER;
        }
    }
    for (i, series) in chart.series.iter().enumerate() {
        let symbol = SERIES_SYMBOLS[i % SERIES_SYMBOLS.len()];
        let mut sorted = series.points.clone();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        if series.style == SeriesStyle::Line {
            for pair in sorted.windows(2) {
                let (c0, c1) = (col(pair[0].0), col(pair[1].0));
                for c in c0..=c1 {
                    let t = if c1 == c0 {
                        0.0
                    } else {
                        (c - c0) as f64 / (c1 - c0) as f64
                    };
                    let y = pair[0].1 + (pair[1].1 - pair[0].1) * t;
                    grid[row(y)][c] = symbol;
                }
            }
        }
        for (x, y) in &sorted {
            grid[row(*y)][col(*x)] = symbol;
        }
    }
    for marker in &chart.markers {
        if let Some(y) = marker.y {
            grid[row(y)][col(marker.x)] = POINT_MARKER;
        }
    }

    out.push(chart.y_label.clone());
    for (i, line) in grid.iter().enumerate() {
        let label = if i == 0 {
            format!("{y_max:>8.2}")
        } else if i == CHART_HEIGHT - 1 {
            format!("{y_min:>8.2}")
        } else {
            " ".repeat(8)
        };
        out.push(format!("{label} |{}", line.iter().collect::<String>()));
    }
    out.push(format!("{} +{}", " ".repeat(8), "-".repeat(CHART_WIDTH)));
    let x_min_label = format!("{x_min:.2}");
    let x_max_label = format!("{x_max:.2}");
    out.push(format!(
        "{}  {x_min_label}{}{x_max_label}",
        " ".repeat(8),
        " ".repeat(CHART_WIDTH.saturating_sub(x_min_label.len() + x_max_label.len()))
    ));
    out.push(format!("{}  {}", " ".repeat(8), chart.x_label));

    out.push(format!("{}:", tr.t(keys::CHART_LEGEND)));
    for (i, series) in chart.series.iter().enumerate() {
        out.push(format!(
            "  {} {}",
            SERIES_SYMBOLS[i % SERIES_SYMBOLS.len()],
            series.name
        ));
    }
    for marker in &chart.markers {
        let symbol = if marker.y.is_some() {
            POINT_MARKER
        } else {
            LINE_MARKER
        };
        out.push(format!("  {symbol} {}", marker.label));
    }
    out
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn scale(v: f64, lo: f64, hi: f64, cells: usize) -> usize {
    if hi - lo <= f64::EPSILON {
        return 0;
    }
    let t = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    (t * (cells - 1) as f64).round() as usize
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64_or(prompt: &str, field: &NumberField, tr: &Translator) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(field.default);
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
