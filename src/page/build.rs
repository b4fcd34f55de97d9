//! Executes a [`Template`] layout against a [`PageGrid`].

use crate::foundation::core::{COLS, CellPos, Color, LAST_CONTENT_ROW, ROWS};
use crate::page::cell::FontTag;
use crate::page::clock::now_date_time;
use crate::page::grid::{PageGrid, TextStyle};
use crate::page::template::{BodyStyle, Listing, Section, SportsResult, Template};
use crate::page::wrap::{center_text, pad_end, pad_start, truncate};

const NAV_ROW: usize = ROWS - 1;
const DEFAULT_TABLE_ROWS: usize = 18;
const FASTEXT_COLORS: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Cyan];
const FASTEXT_WIDTH: usize = 10;

/// User-supplied values; anything left `None` falls back to the template default.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageFields {
    pub page_number: Option<String>,
    pub service_name: Option<String>,
    /// Header clock text; the local time when unset.
    pub date_time: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub header_bg: Option<Color>,
    pub header_text: Option<Color>,
    pub title_color: Option<Color>,
    pub body_color: Option<Color>,
    pub fastext: Option<Vec<String>>,
    pub sports: Option<Vec<SportsResult>>,
    pub listings: Option<Vec<Listing>>,
    pub font_header: Option<FontTag>,
    pub font_title: Option<FontTag>,
    pub font_body: Option<FontTag>,
    pub fastext_enabled: Option<bool>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// Template defaults merged with [`PageFields`].
struct Resolved<'a> {
    template: &'a Template,
    page_num: &'a str,
    service: &'a str,
    date_time: String,
    title: String,
    subtitle: String,
    body: &'a str,
    header_bg: Color,
    header_text: Color,
    title_color: Color,
    body_color: Color,
    fastext: &'a [String],
    font_header: FontTag,
    font_title: FontTag,
    font_body: FontTag,
    fastext_enabled: bool,
    sports: &'a [SportsResult],
    listings: &'a [Listing],
}

impl<'a> Resolved<'a> {
    fn new(template: &'a Template, fields: &'a PageFields) -> Self {
        Self {
            template,
            page_num: non_empty(&fields.page_number).unwrap_or(&template.default_page_num),
            service: non_empty(&fields.service_name).unwrap_or(&template.service_name),
            date_time: non_empty(&fields.date_time)
                .map(str::to_string)
                .unwrap_or_else(now_date_time),
            title: fields
                .title
                .as_deref()
                .unwrap_or(&template.default_title)
                .to_uppercase(),
            subtitle: fields.subtitle.clone().unwrap_or_default().to_uppercase(),
            body: fields.body.as_deref().unwrap_or(&template.default_body),
            header_bg: fields.header_bg.unwrap_or(template.header_bg),
            header_text: fields.header_text.unwrap_or(template.header_text),
            title_color: fields.title_color.unwrap_or(template.title_color),
            body_color: fields.body_color.unwrap_or(template.body_color),
            fastext: fields.fastext.as_deref().unwrap_or(&template.fastext),
            font_header: fields.font_header.unwrap_or_default(),
            font_title: fields.font_title.unwrap_or_default(),
            font_body: fields.font_body.unwrap_or_default(),
            fastext_enabled: fields.fastext_enabled.unwrap_or(true),
            sports: fields.sports.as_deref().unwrap_or(&template.default_sports),
            listings: fields.listings.as_deref().unwrap_or(&template.default_listings),
        }
    }

    fn body_style(&self) -> TextStyle {
        TextStyle::fg(self.body_color).with_font(Some(self.font_body))
    }
}

/// Clear `grid` and run every section of `template` in order.
#[tracing::instrument(skip_all, fields(template = %template.name))]
pub fn build_page(grid: &mut PageGrid, template: &Template, fields: &PageFields) {
    grid.clear();
    let r = Resolved::new(template, fields);
    let mut row = 0usize;

    for section in &template.layout {
        match section {
            Section::Header => {
                render_header(grid, &r);
                row = 1;
            }
            Section::Separator { color } => {
                grid.set_separator_row(row, color.unwrap_or(r.title_color));
                row += 1;
            }
            Section::Title { double_height } => {
                let style = TextStyle::fg(r.title_color).with_font(Some(r.font_title));
                grid.write_string(CellPos::new(row, 0), &center_text(&r.title, COLS), style);
                if *double_height {
                    grid.set_double_height(CellPos::new(row, 0), COLS);
                }
                row += 1;
            }
            Section::TitleBottom | Section::Blank => row += 1,
            Section::Subtitle => {
                if !r.subtitle.is_empty() {
                    let style = TextStyle::fg(r.body_color).with_font(Some(r.font_title));
                    grid.write_string(CellPos::new(row, 0), &center_text(&r.subtitle, COLS), style);
                }
                row += 1;
            }
            Section::Body { rows } => {
                let max_rows = rows
                    .filter(|&n| n > 0)
                    .unwrap_or_else(|| LAST_CONTENT_ROW.saturating_sub(row));
                match r.template.body_style {
                    BodyStyle::Index => render_index_body(grid, row, &r, max_rows),
                    BodyStyle::Wrapped => {
                        grid.write_wrapped(CellPos::new(row, 1), r.body, r.body_style(), max_rows);
                    }
                }
                row = NAV_ROW;
            }
            Section::SportsTable { rows } => {
                let max_rows = rows.filter(|&n| n > 0).unwrap_or(DEFAULT_TABLE_ROWS);
                render_sports_table(grid, row, &r, max_rows);
                row = NAV_ROW;
            }
            Section::TvTable { rows } => {
                let max_rows = rows.filter(|&n| n > 0).unwrap_or(DEFAULT_TABLE_ROWS);
                render_tv_listings(grid, row, &r, max_rows);
                row = NAV_ROW;
            }
            Section::Fastext => {
                if r.fastext_enabled {
                    render_fastext(grid, r.fastext);
                }
                row = ROWS;
            }
        }
    }
}

/// `P100  CEEFAX 100  Thu 14 Mar 16:42/31` across row 0 over the header background.
fn render_header(grid: &mut PageGrid, r: &Resolved<'_>) {
    let page = format!("P{}", r.page_num);
    let mid = format!("{} {}", r.service, r.page_num);
    let mid_len = mid.chars().count();
    let mid_start = (page.chars().count() + 2).max(COLS.saturating_sub(mid_len) / 2);

    let mut line = pad_end(&page, mid_start);
    line.push_str(&mid);
    let right_start = COLS.saturating_sub(r.date_time.chars().count());
    let mut line = pad_end(&line, right_start);
    line.push_str(&r.date_time);
    let line = pad_end(&truncate(&line, COLS), COLS);

    let style = TextStyle::fg(r.header_text)
        .with_bg(r.header_bg)
        .with_font(Some(r.font_header));
    grid.write_string(CellPos::new(0, 0), &line, style);
}

fn render_fastext(grid: &mut PageGrid, labels: &[String]) {
    let mut col = 0;
    for (i, color) in FASTEXT_COLORS.into_iter().enumerate() {
        let label = labels.get(i).map(String::as_str).unwrap_or_default();
        grid.set_cell(CellPos::new(NAV_ROW, col), '\u{25A0}', TextStyle::fg(color));
        col += 1;
        grid.write_string(
            CellPos::new(NAV_ROW, col),
            &truncate(label, FASTEXT_WIDTH - 1),
            TextStyle::fg(Color::White),
        );
        col += FASTEXT_WIDTH - 1;
    }
}

fn render_sports_table(grid: &mut PageGrid, start: usize, r: &Resolved<'_>, max_rows: usize) {
    let font = Some(r.font_body);
    let heading = TextStyle::fg(Color::Cyan).with_font(font);
    grid.write_string(CellPos::new(start, 1), "Home", heading);
    grid.write_string(CellPos::new(start, 20), "Score", heading);
    grid.write_string(CellPos::new(start, 27), "Away", heading);
    for col in 1..COLS - 1 {
        grid.set_cell(CellPos::new(start + 1, col), '\u{2500}', heading);
    }

    let mut row = start + 2;
    for (i, m) in r.sports.iter().enumerate() {
        if row - start >= max_rows.saturating_sub(1) {
            break;
        }
        let alt = TextStyle::fg(if i % 2 == 0 { Color::White } else { Color::Cyan }).with_font(font);
        let home = pad_end(&truncate(&m.home, 17), 17);
        let score = pad_end(&pad_start(&format!("{}-{}", m.home_score, m.away_score), 3), 5);
        grid.write_string(CellPos::new(row, 1), &home, alt);
        grid.write_string(
            CellPos::new(row, 20),
            &score,
            TextStyle::fg(Color::Yellow).with_font(font),
        );
        grid.write_string(CellPos::new(row, 27), &truncate(&m.away, 13), alt);
        row += 1;
    }
}

fn render_tv_listings(grid: &mut PageGrid, start: usize, r: &Resolved<'_>, max_rows: usize) {
    let font = Some(r.font_body);
    for (i, item) in r.listings.iter().take(max_rows).enumerate() {
        let row = start + i;
        let time = pad_end(&truncate(&item.time, 5), 6);
        let alt = if i % 2 == 0 { Color::White } else { Color::Cyan };
        grid.write_string(
            CellPos::new(row, 1),
            &time,
            TextStyle::fg(Color::Yellow).with_font(font),
        );
        grid.write_string(
            CellPos::new(row, 7),
            &truncate(&item.programme, 33),
            TextStyle::fg(alt).with_font(font),
        );
    }
}

/// Split `Some text  123` into the text and a trailing three-digit page number.
fn split_index_line(line: &str) -> Option<(&str, &str)> {
    let cut = line.len().checked_sub(3).filter(|&c| c > 0)?;
    if !line.is_char_boundary(cut) {
        return None;
    }
    let (prefix, num) = line.split_at(cut);
    if !num.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let text = prefix.trim_end();
    (!text.is_empty()).then_some((text, num))
}

fn render_index_body(grid: &mut PageGrid, start: usize, r: &Resolved<'_>, max_rows: usize) {
    let style = r.body_style();
    let number = TextStyle::fg(Color::Yellow).with_font(Some(r.font_body));
    for (i, raw) in r.body.split('\n').take(max_rows).enumerate() {
        let row = start + i;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match split_index_line(line) {
            Some((text, num)) => {
                grid.write_string(CellPos::new(row, 1), &truncate(text, 36), style);
                grid.write_string(CellPos::new(row, COLS - num.len() - 1), num, number);
            }
            None => grid.write_string(CellPos::new(row, 1), &truncate(line, 38), style),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/build.rs"]
mod tests;
