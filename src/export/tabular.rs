//! Spreadsheet (.xlsx) report
//!
//! Four sheets in fixed order: Overview, Stories, Developers, Recommendations.
//! Each sheet is a header row followed by one row per record.

use chrono::{DateTime, Utc};
use rust_xlsxwriter::{DocProperties, Format, Workbook};

use super::{ExportFormat, ReportRenderer};
use crate::error::ExportError;
use crate::models::SprintSnapshot;

pub const SHEET_NAMES: [&str; 4] = ["Overview", "Stories", "Developers", "Recommendations"];

/// Separator between recommendation steps in the Steps column
pub const STEP_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn optional(value: &Option<String>) -> Self {
        Cell::Text(value.clone().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// In-memory workbook contents, independent of the xlsx writer
#[derive(Debug, Clone, PartialEq)]
pub struct TabularReport {
    pub sheets: Vec<Sheet>,
}

impl TabularReport {
    pub fn from_snapshot(snapshot: &SprintSnapshot) -> Self {
        let overview = Sheet {
            name: SHEET_NAMES[0],
            columns: vec![
                "Sprint Name",
                "Health Score",
                "Days Remaining",
                "End Date",
                "Burnout Risk Level",
                "Delivery Risk Level",
                "Workload Balance",
            ],
            rows: vec![vec![
                Cell::text(&snapshot.sprint_name),
                Cell::Number(snapshot.health_score.into()),
                Cell::Number(snapshot.days_remaining.into()),
                Cell::text(&snapshot.end_date),
                Cell::text(snapshot.burnout_risk.level.as_str()),
                Cell::text(snapshot.delivery_risk.level.as_str()),
                Cell::text(snapshot.workload_balance.status.to_string()),
            ]],
        };

        let stories = Sheet {
            name: SHEET_NAMES[1],
            columns: vec![
                "ID",
                "Title",
                "Status",
                "Risk Level",
                "Assignee",
                "AI Reason",
                "Impact",
                "Suggested Action",
            ],
            rows: snapshot
                .stories
                .iter()
                .map(|s| {
                    vec![
                        Cell::text(&s.id),
                        Cell::text(&s.title),
                        Cell::text(s.status.to_string()),
                        Cell::text(s.risk_level.as_str()),
                        Cell::text(&s.assignee),
                        Cell::text(&s.ai_reason),
                        Cell::optional(&s.impact),
                        Cell::optional(&s.suggested_action),
                    ]
                })
                .collect(),
        };

        let developers = Sheet {
            name: SHEET_NAMES[2],
            columns: vec!["Name", "Commits", "PRs", "Stories", "Burnout Risk"],
            rows: snapshot
                .developers
                .iter()
                .map(|d| {
                    vec![
                        Cell::text(&d.name),
                        Cell::Number(d.commits.into()),
                        Cell::Number(d.prs.into()),
                        Cell::Number(d.stories.into()),
                        Cell::text(d.burnout_risk.as_str()),
                    ]
                })
                .collect(),
        };

        let recommendations = Sheet {
            name: SHEET_NAMES[3],
            columns: vec!["Title", "Description", "Impact", "Reasoning", "Steps"],
            rows: snapshot
                .recommendations
                .iter()
                .map(|r| {
                    vec![
                        Cell::text(&r.title),
                        Cell::text(&r.description),
                        Cell::text(&r.impact),
                        Cell::text(&r.reasoning),
                        Cell::Text(r.steps.join(STEP_SEPARATOR)),
                    ]
                })
                .collect(),
        };

        Self {
            sheets: vec![overview, stories, developers, recommendations],
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Serialize into xlsx bytes. `generated_at` is the workbook's creation
    /// time, so equal inputs give equal bytes.
    pub fn to_xlsx(&self, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
        let fail = |e: rust_xlsxwriter::XlsxError| ExportError::generation(ExportFormat::Tabular, e);

        let mut workbook = Workbook::new();
        workbook.set_properties(&DocProperties::new().set_creation_datetime(&generated_at));
        let header = Format::new().set_bold();

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name).map_err(fail)?;

            for (col, title) in sheet.columns.iter().enumerate() {
                worksheet
                    .write_string_with_format(0, col as u16, *title, &header)
                    .map_err(fail)?;
            }

            for (i, row) in sheet.rows.iter().enumerate() {
                let r = i as u32 + 1;
                for (col, cell) in row.iter().enumerate() {
                    let c = col as u16;
                    match cell {
                        // Blank cells are left unwritten
                        Cell::Text(text) if text.is_empty() => {}
                        Cell::Text(text) => {
                            worksheet.write_string(r, c, text.as_str()).map_err(fail)?;
                        }
                        Cell::Number(n) => {
                            worksheet.write_number(r, c, *n).map_err(fail)?;
                        }
                    }
                }
            }
        }

        workbook.save_to_buffer().map_err(fail)
    }
}

pub struct TabularRenderer;

impl ReportRenderer for TabularRenderer {
    const FORMAT: ExportFormat = ExportFormat::Tabular;

    fn render(snapshot: &SprintSnapshot, generated_at: DateTime<Utc>) -> Result<Vec<u8>, ExportError> {
        let report = TabularReport::from_snapshot(snapshot);
        log::debug!(
            "{} workbook: {} sheets",
            Self::FORMAT,
            report.sheets.len()
        );
        report.to_xlsx(generated_at)
    }
}
