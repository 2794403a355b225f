//! Paginated PDF report
//!
//! Layout runs first and produces positioned primitives per page (millimetres,
//! origin top-left, A4 portrait). Rendering then replays them through printpdf.
//! Keeping the two apart lets pagination be checked without parsing PDF bytes.
//!
//! Text uses the built-in Helvetica faces, which only cover WinAnsi. Anything
//! outside it is printed as `?`.

use chrono::{DateTime, Local, NaiveDate, Utc};
use printpdf::lopdf::{self, Object};
use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rect, Rgb};
use sha2::{Digest, Sha256};

use super::{ExportFormat, ReportRenderer};
use crate::error::ExportError;
use crate::models::SprintSnapshot;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 14.0;

/// Gap between a table's end and the next section heading
pub const SECTION_SPACING: f32 = 15.0;
/// Gap between a section heading and its table
pub const HEADING_GAP: f32 = 5.0;
/// A heading placed below this line moves to a new page
pub const PAGE_BREAK_Y: f32 = 250.0;
/// Heading position on a page started by [`PAGE_BREAK_Y`]
pub const CONTINUATION_Y: f32 = 20.0;
pub const ROW_HEIGHT: f32 = 7.5;

const TITLE_Y: f32 = 22.0;
const SPRINT_LINE_Y: f32 = 32.0;
const DATE_LINE_Y: f32 = 38.0;
const OVERVIEW_HEADING_Y: f32 = 50.0;

const TITLE_PT: f32 = 20.0;
const SUBTITLE_PT: f32 = 12.0;
const HEADING_PT: f32 = 14.0;
const BODY_PT: f32 = 10.0;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph advance as a fraction of the font size
const AVG_GLYPH_EM: f32 = 0.5;
const CELL_PADDING: f32 = 1.8;
const GRID_LINE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb8(pub u8, pub u8, pub u8);

const WHITE: Rgb8 = Rgb8(255, 255, 255);
const INDIGO: Rgb8 = Rgb8(79, 70, 229);
const RED: Rgb8 = Rgb8(220, 38, 38);
const PURPLE: Rgb8 = Rgb8(147, 51, 234);
const TITLE_TEXT: Rgb8 = Rgb8(40, 40, 40);
const SUBTITLE_TEXT: Rgb8 = Rgb8(100, 100, 100);
const HEADING_TEXT: Rgb8 = Rgb8(60, 60, 60);
const BODY_TEXT: Rgb8 = Rgb8(50, 50, 50);
const STRIPE: Rgb8 = Rgb8(245, 245, 245);
const GRID: Rgb8 = Rgb8(200, 200, 200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableTheme {
    /// Alternate body rows shaded
    Striped,
    /// Every cell outlined
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    Fixed(f32),
    /// Share of the remaining width, weighted by content length
    Auto,
}

#[derive(Debug, Clone)]
pub struct TableSpec {
    pub title: &'static str,
    pub head: Vec<&'static str>,
    pub body: Vec<Vec<String>>,
    pub theme: TableTheme,
    pub head_fill: Rgb8,
    pub widths: Vec<ColumnWidth>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text {
        x: f32,
        /// Baseline
        y: f32,
        size: f32,
        color: Rgb8,
        bold: bool,
        text: String,
    },
    Fill {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb8,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub primitives: Vec<Primitive>,
}

/// Where a section ended up
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTable {
    pub title: &'static str,
    pub heading_page: usize,
    pub heading_y: f32,
    pub start_page: usize,
    pub start_y: f32,
    /// Page and y of the bottom edge of the last row
    pub end_page: usize,
    pub end_y: f32,
    pub body_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<Page>,
    pub tables: Vec<PlacedTable>,
}

impl DocumentLayout {
    /// Lay out the full report for `snapshot`, dated `report_date`.
    pub fn build(snapshot: &SprintSnapshot, report_date: NaiveDate) -> Self {
        let mut cursor = Cursor::new();

        cursor.text(MARGIN, TITLE_Y, TITLE_PT, TITLE_TEXT, false, "Sprint Health Report");
        cursor.text(
            MARGIN,
            SPRINT_LINE_Y,
            SUBTITLE_PT,
            SUBTITLE_TEXT,
            false,
            format!("Sprint: {}", snapshot.sprint_name),
        );
        cursor.text(
            MARGIN,
            DATE_LINE_Y,
            SUBTITLE_PT,
            SUBTITLE_TEXT,
            false,
            format!("Date: {}", report_date.format("%-m/%-d/%Y")),
        );

        let mut tables: Vec<PlacedTable> = Vec::with_capacity(4);
        let mut heading_y = OVERVIEW_HEADING_Y;
        for spec in section_specs(snapshot) {
            if let Some(prev) = tables.last() {
                heading_y = prev.end_y + SECTION_SPACING;
            }
            let placed = place_section(&mut cursor, &spec, heading_y);
            tables.push(placed);
        }

        Self {
            pages: cursor.pages,
            tables,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text on all pages, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| p.primitives.iter()).filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            Primitive::Fill { .. } => None,
        })
    }

    /// Replay the layout into PDF bytes. The document id and dates come from
    /// `generated_at`, so the same layout and instant give the same bytes.
    pub fn render(&self, title: &str, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(generation_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(generation_error)?;

        for (index, page) in self.pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1")
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);

            for primitive in &page.primitives {
                match primitive {
                    Primitive::Fill {
                        x,
                        y,
                        width,
                        height,
                        color,
                    } => {
                        layer.set_fill_color(pdf_color(*color));
                        layer.add_rect(Rect::new(
                            Mm(*x),
                            Mm(PAGE_HEIGHT - y - height),
                            Mm(x + width),
                            Mm(PAGE_HEIGHT - y),
                        ));
                    }
                    Primitive::Text {
                        x,
                        y,
                        size,
                        color,
                        bold: is_bold,
                        text,
                    } => {
                        layer.set_fill_color(pdf_color(*color));
                        let font = if *is_bold { &bold } else { &regular };
                        layer.use_text(text.as_str(), *size, Mm(*x), Mm(PAGE_HEIGHT - y), font);
                    }
                }
            }
        }

        let bytes = doc.save_to_bytes().map_err(generation_error)?;
        stamp(&bytes, &document_id(title, generated_at), generated_at)
    }
}

/// First 128 bits of SHA-256 over the title and instant, as hex
fn document_id(title: &str, generated_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(generated_at.to_rfc3339().as_bytes());
    hasher.finalize().iter().take(16).map(|b| format!("{:02x}", b)).collect()
}

/// Overwrite the trailer `/ID` and the Info dates, which printpdf fills from
/// a random source and the wall clock.
fn stamp(bytes: &[u8], id: &str, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
    let mut pdf = lopdf::Document::load_mem(bytes).map_err(generation_error)?;
    let date = generated_at.format("D:%Y%m%d%H%M%S+00'00'").to_string();

    let info_id = pdf
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .map_err(generation_error)?;
    let info = pdf
        .get_object_mut(info_id)
        .and_then(Object::as_dict_mut)
        .map_err(generation_error)?;
    info.set("CreationDate", Object::string_literal(date.as_str()));
    info.set("ModDate", Object::string_literal(date.as_str()));

    pdf.trailer.set(
        "ID",
        Object::Array(vec![Object::string_literal(id), Object::string_literal(id)]),
    );

    let mut out = Vec::new();
    pdf.save_to(&mut out).map_err(generation_error)?;
    Ok(out)
}

/// Replace characters WinAnsi cannot encode with `?`.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut buf = [0u8; 4];
            let encoded = lopdf::Document::encode_text(Some("WinAnsiEncoding"), c.encode_utf8(&mut buf));
            if encoded.len() == 1 {
                c
            } else {
                '?'
            }
        })
        .collect()
}

fn generation_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::generation(ExportFormat::Document, err)
}

fn pdf_color(Rgb8(r, g, b): Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

// ============================================
// Sections
// ============================================

fn section_specs(snapshot: &SprintSnapshot) -> [TableSpec; 4] {
    let overview = TableSpec {
        title: "Overview",
        head: vec!["Metric", "Value"],
        body: vec![
            vec!["Health Score".to_string(), format!("{}/100", snapshot.health_score)],
            vec!["Days Remaining".to_string(), snapshot.days_remaining.to_string()],
            vec!["Burnout Risk".to_string(), snapshot.burnout_risk.level.to_string()],
            vec!["Delivery Risk".to_string(), snapshot.delivery_risk.level.to_string()],
            vec!["Workload Balance".to_string(), snapshot.workload_balance.status.to_string()],
        ],
        theme: TableTheme::Striped,
        head_fill: INDIGO,
        widths: vec![ColumnWidth::Auto; 2],
    };

    let stories = TableSpec {
        title: "Stories at Risk",
        head: vec!["ID", "Title", "Status", "Risk", "Assignee"],
        body: snapshot
            .stories
            .iter()
            .map(|s| {
                vec![
                    s.id.clone(),
                    s.title.clone(),
                    s.status.to_string(),
                    s.risk_level.to_string(),
                    s.assignee.clone(),
                ]
            })
            .collect(),
        theme: TableTheme::Grid,
        head_fill: RED,
        widths: vec![ColumnWidth::Auto; 5],
    };

    let developers = TableSpec {
        title: "Developer Workload",
        head: vec!["Name", "Commits", "PRs", "Stories", "Burnout Risk"],
        body: snapshot
            .developers
            .iter()
            .map(|d| {
                vec![
                    d.name.clone(),
                    d.commits.to_string(),
                    d.prs.to_string(),
                    d.stories.to_string(),
                    d.burnout_risk.to_string(),
                ]
            })
            .collect(),
        theme: TableTheme::Striped,
        head_fill: INDIGO,
        widths: vec![ColumnWidth::Auto; 5],
    };

    let recommendations = TableSpec {
        title: "AI Recommendations",
        head: vec!["Recommendation", "Impact", "Reasoning"],
        body: snapshot
            .recommendations
            .iter()
            .map(|r| vec![r.title.clone(), r.impact.clone(), r.reasoning.clone()])
            .collect(),
        theme: TableTheme::Grid,
        head_fill: PURPLE,
        widths: vec![
            ColumnWidth::Fixed(40.0),
            ColumnWidth::Fixed(60.0),
            ColumnWidth::Auto,
        ],
    };

    [overview, stories, developers, recommendations]
}

// ============================================
// Layout engine
// ============================================

struct Cursor {
    pages: Vec<Page>,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
        }
    }

    fn page(&self) -> usize {
        self.pages.len() - 1
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
    }

    fn push(&mut self, primitive: Primitive) {
        if let Some(page) = self.pages.last_mut() {
            page.primitives.push(primitive);
        }
    }

    fn text(&mut self, x: f32, y: f32, size: f32, color: Rgb8, bold: bool, text: impl Into<String>) {
        let text: String = text.into();
        self.push(Primitive::Text {
            x,
            y,
            size,
            color,
            bold,
            text: printable(&text),
        });
    }

    fn fill(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb8) {
        self.push(Primitive::Fill {
            x,
            y,
            width,
            height,
            color,
        });
    }
}

#[derive(Clone, Copy)]
struct RowStyle {
    fill: Option<Rgb8>,
    text: Rgb8,
    bold: bool,
    grid: bool,
}

fn place_section(cursor: &mut Cursor, spec: &TableSpec, heading_y: f32) -> PlacedTable {
    let mut heading_y = heading_y;
    if heading_y > PAGE_BREAK_Y {
        log::debug!("'{}' heading at {:.1}mm, starting a new page", spec.title, heading_y);
        cursor.new_page();
        heading_y = CONTINUATION_Y;
    }
    let heading_page = cursor.page();
    cursor.text(MARGIN, heading_y, HEADING_PT, HEADING_TEXT, false, spec.title);

    let start_y = heading_y + HEADING_GAP;
    let start_page = cursor.page();
    let widths = resolve_widths(spec);
    let grid = spec.theme == TableTheme::Grid;

    let head_style = RowStyle {
        fill: Some(spec.head_fill),
        text: WHITE,
        bold: true,
        grid,
    };
    let head: Vec<String> = spec.head.iter().map(|h| h.to_string()).collect();

    let mut y = start_y;
    draw_row(cursor, &head, &widths, y, head_style);
    y += ROW_HEIGHT;

    for (i, row) in spec.body.iter().enumerate() {
        if y + ROW_HEIGHT > PAGE_HEIGHT - MARGIN {
            cursor.new_page();
            y = MARGIN;
            draw_row(cursor, &head, &widths, y, head_style);
            y += ROW_HEIGHT;
        }
        let fill = match spec.theme {
            TableTheme::Striped if i % 2 == 1 => Some(STRIPE),
            TableTheme::Striped => None,
            TableTheme::Grid => Some(WHITE),
        };
        let style = RowStyle {
            fill,
            text: BODY_TEXT,
            bold: false,
            grid,
        };
        draw_row(cursor, row, &widths, y, style);
        y += ROW_HEIGHT;
    }

    PlacedTable {
        title: spec.title,
        heading_page,
        heading_y,
        start_page,
        start_y,
        end_page: cursor.page(),
        end_y: y,
        body_rows: spec.body.len(),
    }
}

fn draw_row(cursor: &mut Cursor, cells: &[String], widths: &[f32], y: f32, style: RowStyle) {
    let baseline = y + ROW_HEIGHT / 2.0 + BODY_PT * PT_TO_MM * 0.35;
    let mut x = MARGIN;
    for (cell, &width) in cells.iter().zip(widths) {
        if style.grid {
            cursor.fill(x, y, width, ROW_HEIGHT, GRID);
            cursor.fill(
                x + GRID_LINE,
                y + GRID_LINE,
                width - 2.0 * GRID_LINE,
                ROW_HEIGHT - 2.0 * GRID_LINE,
                style.fill.unwrap_or(WHITE),
            );
        } else if let Some(fill) = style.fill {
            cursor.fill(x, y, width, ROW_HEIGHT, fill);
        }
        let text = fit_text(&printable(cell), width - 2.0 * CELL_PADDING, BODY_PT);
        cursor.text(x + CELL_PADDING, baseline, BODY_PT, style.text, style.bold, text);
        x += width;
    }
}

/// Column widths across the printable width. Fixed columns keep their size;
/// auto columns split what is left in proportion to their longest text.
fn resolve_widths(spec: &TableSpec) -> Vec<f32> {
    let available = PAGE_WIDTH - 2.0 * MARGIN;
    let fixed: f32 = spec
        .widths
        .iter()
        .map(|w| match w {
            ColumnWidth::Fixed(mm) => *mm,
            ColumnWidth::Auto => 0.0,
        })
        .sum();
    let remaining = (available - fixed).max(0.0);

    let weights: Vec<f32> = (0..spec.widths.len())
        .map(|col| {
            let head = spec.head.get(col).map_or(0, |h| h.chars().count());
            let body = spec
                .body
                .iter()
                .filter_map(|row| row.get(col))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0);
            head.max(body).clamp(8, 60) as f32
        })
        .collect();
    let auto_total: f32 = spec
        .widths
        .iter()
        .zip(&weights)
        .filter(|(w, _)| matches!(w, ColumnWidth::Auto))
        .map(|(_, weight)| *weight)
        .sum();

    spec.widths
        .iter()
        .zip(&weights)
        .map(|(w, weight)| match w {
            ColumnWidth::Fixed(mm) => *mm,
            ColumnWidth::Auto if auto_total > 0.0 => remaining * weight / auto_total,
            ColumnWidth::Auto => 0.0,
        })
        .collect()
}

/// Cut `text` so it fits `width` millimetres at `size_pt`. Long cells are
/// truncated with "..." rather than wrapped.
fn fit_text(text: &str, width: f32, size_pt: f32) -> String {
    let glyph = size_pt * PT_TO_MM * AVG_GLYPH_EM;
    let max_chars = (width / glyph).floor().max(0.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let mut cut: String = text.chars().take(max_chars - 3).collect();
    cut.truncate(cut.trim_end().len());
    cut.push_str("...");
    cut
}

pub struct DocumentRenderer;

impl ReportRenderer for DocumentRenderer {
    const FORMAT: ExportFormat = ExportFormat::Document;

    fn render(snapshot: &SprintSnapshot, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
        let report_date = generated_at.with_timezone(&Local).date_naive();
        let layout = DocumentLayout::build(snapshot, report_date);
        log::debug!(
            "{} layout: {} tables on {} pages",
            Self::FORMAT,
            layout.tables.len(),
            layout.page_count()
        );
        layout.render(&format!("Sprint Health Report - {}", snapshot.sprint_name), generated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SnapshotCatalog;
    use chrono::{NaiveDate, TimeZone};

    fn snapshot() -> SprintSnapshot {
        SnapshotCatalog::authored(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap())
            .default_snapshot()
            .clone()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    fn with_story_count(n: usize) -> SprintSnapshot {
        let mut snap = snapshot();
        let template = snap.stories[0].clone();
        snap.stories = (0..n)
            .map(|i| {
                let mut story = template.clone();
                story.id = format!("ABC-{}", 500 + i);
                story
            })
            .collect();
        snap
    }

    fn assert_no_overlap(layout: &DocumentLayout) {
        for pair in layout.tables.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.start_page == prev.end_page {
                assert!(
                    next.start_y >= prev.end_y + SECTION_SPACING,
                    "{} starts at {} but {} ends at {}",
                    next.title,
                    next.start_y,
                    prev.title,
                    prev.end_y
                );
            } else {
                assert!(next.start_page > prev.end_page);
            }
        }
    }

    #[test]
    fn test_four_tables_in_order() {
        let layout = DocumentLayout::build(&snapshot(), day());
        let titles: Vec<_> = layout.tables.iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            ["Overview", "Stories at Risk", "Developer Workload", "AI Recommendations"]
        );
        assert_eq!(layout.tables[0].body_rows, 5);
        assert_eq!(layout.tables[1].body_rows, 5);
        assert_eq!(layout.tables[2].body_rows, 4);
        assert_eq!(layout.tables[3].body_rows, 3);
    }

    #[test]
    fn test_title_block_and_overview_positions() {
        let layout = DocumentLayout::build(&snapshot(), day());
        let texts: Vec<_> = layout.texts().collect();
        assert_eq!(texts[0], "Sprint Health Report");
        assert_eq!(texts[1], "Sprint: Sprint 25.12 - Core Features");
        assert_eq!(texts[2], "Date: 12/1/2025");
        assert!(texts.contains(&"72/100"));

        let overview = &layout.tables[0];
        assert_eq!(overview.heading_y, 50.0);
        assert_eq!(overview.start_y, 55.0);
        assert_eq!(overview.end_y, 55.0 + 6.0 * ROW_HEIGHT);
    }

    #[test]
    fn test_date_line_uses_given_calendar_day() {
        let evening = NaiveDate::from_ymd_opt(2025, 11, 30).unwrap();
        let layout = DocumentLayout::build(&snapshot(), evening);
        assert_eq!(layout.texts().nth(2), Some("Date: 11/30/2025"));
    }

    #[test]
    fn test_rendered_date_is_local_day_of_instant() {
        let local_day = at().with_timezone(&Local).date_naive();
        let expected = format!("Date: {}", local_day.format("%-m/%-d/%Y"));
        let bytes = DocumentRenderer::render(&snapshot(), at()).unwrap();
        let text = lopdf::Document::load_mem(&bytes).unwrap().extract_text(&[1]).unwrap();
        assert!(text.contains(&expected), "extracted: {}", text);
    }

    #[test]
    fn test_sections_follow_measured_end() {
        let layout = DocumentLayout::build(&snapshot(), day());
        assert_eq!(layout.page_count(), 1);
        for pair in layout.tables.windows(2) {
            assert_eq!(pair[1].heading_y, pair[0].end_y + SECTION_SPACING);
            assert_eq!(pair[1].start_y, pair[1].heading_y + HEADING_GAP);
        }
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_heading_below_threshold_moves_to_new_page() {
        // 15 stories end the stories table at 240mm, so the next heading lands at 255mm
        let layout = DocumentLayout::build(&with_story_count(15), day());
        let stories = &layout.tables[1];
        assert_eq!(stories.end_page, 0);
        assert_eq!(stories.end_y, 240.0);

        let developers = &layout.tables[2];
        assert_eq!(developers.heading_page, 1);
        assert_eq!(developers.heading_y, CONTINUATION_Y);
        assert_eq!(developers.start_y, CONTINUATION_Y + HEADING_GAP);
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_heading_at_threshold_stays_on_page() {
        let layout = DocumentLayout::build(&with_story_count(14), day());
        let developers = &layout.tables[2];
        assert_eq!(developers.heading_page, 0);
        assert_eq!(developers.heading_y, 247.5);
    }

    #[test]
    fn test_long_table_continues_with_repeated_head() {
        let layout = DocumentLayout::build(&with_story_count(60), day());
        let stories = &layout.tables[1];
        assert!(stories.end_page > stories.start_page);
        let head_count = layout.texts().filter(|t| *t == "Assignee").count();
        assert_eq!(head_count, stories.end_page - stories.start_page + 1);
        assert_no_overlap(&layout);

        for page in &layout.pages {
            for primitive in &page.primitives {
                if let Primitive::Fill { y, height, .. } = primitive {
                    assert!(y + height <= PAGE_HEIGHT - MARGIN + 0.001);
                }
            }
        }
    }

    #[test]
    fn test_empty_lists_still_produce_four_tables() {
        let mut snap = snapshot();
        snap.stories.clear();
        snap.developers.clear();
        snap.recommendations.clear();
        let layout = DocumentLayout::build(&snap, day());
        assert_eq!(layout.tables.len(), 4);
        assert!(layout.tables[1..].iter().all(|t| t.body_rows == 0));
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let snap = snapshot();
        assert_eq!(DocumentLayout::build(&snap, day()), DocumentLayout::build(&snap, day()));
    }

    #[test]
    fn test_recommendation_columns_fixed_widths() {
        let specs = section_specs(&snapshot());
        let widths = resolve_widths(&specs[3]);
        assert_eq!(widths[0], 40.0);
        assert_eq!(widths[1], 60.0);
        assert!((widths.iter().sum::<f32>() - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 0.01);
    }

    #[test]
    fn test_fit_text_truncates_long_cells() {
        assert_eq!(fit_text("short", 40.0, BODY_PT), "short");
        let long = "a".repeat(200);
        let cut = fit_text(&long, 40.0, BODY_PT);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() < 200);
        assert_eq!(fit_text("abcdef", 0.0, BODY_PT), "");
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = DocumentRenderer::render(&with_story_count(40), at()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_same_instant_same_bytes() {
        let snap = snapshot();
        let first = DocumentRenderer::render(&snap, at()).unwrap();
        let second = DocumentRenderer::render(&snap, at()).unwrap();
        assert!(first == second, "documents for the same instant differ");
        assert!(contains(&first, b"D:20251201100000+00'00'"));

        let later = DocumentRenderer::render(&snap, at() + chrono::Duration::seconds(1)).unwrap();
        assert!(later != first);
    }

    #[test]
    fn test_document_id_depends_on_title_and_instant() {
        let id = document_id("Sprint Health Report - A", at());
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, document_id("Sprint Health Report - A", at()));
        assert_ne!(id, document_id("Sprint Health Report - B", at()));
    }

    #[test]
    fn test_unencodable_text_printed_as_question_marks() {
        assert_eq!(printable("Zoë Łukasz 李"), "Zoë ?ukasz ?");
        assert_eq!(printable("plain ASCII"), "plain ASCII");

        let mut snap = snapshot();
        snap.sprint_name = "스프린트 7 🚀".to_string();
        snap.stories[0].assignee = "Zoë Ł.".to_string();
        let layout = DocumentLayout::build(&snap, day());
        let texts: Vec<_> = layout.texts().collect();
        assert_eq!(texts[1], "Sprint: ???? 7 ?");
        assert!(texts.contains(&"Zoë ?."));
    }

    #[test]
    fn test_sprint_line_survives_in_pdf_text() {
        let mut snap = snapshot();
        snap.sprint_name = "스프린트 7 🚀".to_string();
        let bytes = DocumentRenderer::render(&snap, at()).unwrap();

        let pdf = lopdf::Document::load_mem(&bytes).unwrap();
        let text = pdf.extract_text(&[1]).unwrap();
        assert!(text.contains("Sprint: ???? 7 ?"), "extracted: {}", text);
    }
}
