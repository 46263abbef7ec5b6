//! Excel summary of open-ticket ages
//!
//! One sheet, one row per assignee, with a totals row driven by formulas so
//! the workbook stays correct when rows are edited by hand.
//!
//! | Assignee | Open Tickets | Total Age (business days) | Oldest (business days) | Total Age (days) |
//! |----------|--------------|---------------------------|------------------------|------------------|
//! | Ada      | 2            | 12                        | 9                      | 16               |
//! | TOTAL    | =SUM(B2:B2)  | =SUM(C2:C2)               | =MAX(D2:D2)            | =SUM(E2:E2)      |

use deckgen_core::{AssigneeAges, RenderError};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

const HEADERS: [&str; 5] = [
    "Assignee",
    "Open Tickets",
    "Total Age (business days)",
    "Oldest (business days)",
    "Total Age (days)",
];

/// Ticket age workbook renderer
#[derive(Clone, Debug)]
pub struct AgeWorkbookRenderer {
    pub sheet_name: String,
    /// Write a totals row
    pub include_totals: bool,
}

impl Default for AgeWorkbookRenderer {
    fn default() -> Self {
        Self {
            sheet_name: "Ticket Ages".into(),
            include_totals: true,
        }
    }
}

struct Formats {
    header: Format,
    text: Format,
    integer: Format,
    total_text: Format,
    total_integer: Format,
}

fn formats() -> Formats {
    Formats {
        header: Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(0xE6007E)
            .set_font_color(0xFFFFFF)
            .set_border(FormatBorder::Thin),
        text: Format::new().set_border(FormatBorder::Thin),
        integer: Format::new().set_num_format("#,##0").set_border(FormatBorder::Thin),
        total_text: Format::new()
            .set_bold()
            .set_background_color(0xE2EFDA)
            .set_border(FormatBorder::Thin),
        total_integer: Format::new()
            .set_bold()
            .set_num_format("#,##0")
            .set_background_color(0xE2EFDA)
            .set_border(FormatBorder::Thin),
    }
}

fn format_error(e: rust_xlsxwriter::XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

impl AgeWorkbookRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worksheet name
    pub fn sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Leave out the totals row
    pub fn no_totals(mut self) -> Self {
        self.include_totals = false;
        self
    }

    /// Generate workbook bytes
    pub fn render(&self, ages: &[AssigneeAges]) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let formats = formats();

        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name).map_err(format_error)?;
        self.write_sheet(sheet, ages, &formats)?;

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    fn write_sheet(&self, sheet: &mut Worksheet, ages: &[AssigneeAges], formats: &Formats) -> Result<(), RenderError> {
        for (col, header) in HEADERS.iter().enumerate() {
            sheet
                .write_with_format(0, col as u16, *header, &formats.header)
                .map_err(format_error)?;
        }
        sheet.set_column_width(0, 28).ok();
        for col in 1..HEADERS.len() as u16 {
            sheet.set_column_width(col, 24).ok();
        }
        sheet.set_freeze_panes(1, 0).map_err(format_error)?;

        let mut row = 1u32;
        for assignee in ages {
            sheet
                .write_with_format(row, 0, assignee.assignee.as_str(), &formats.text)
                .map_err(format_error)?;
            let values = [
                assignee.tickets as f64,
                assignee.business_days as f64,
                assignee.oldest_business_days as f64,
                assignee.total_days as f64,
            ];
            for (offset, value) in values.into_iter().enumerate() {
                sheet
                    .write_with_format(row, offset as u16 + 1, value, &formats.integer)
                    .map_err(format_error)?;
            }
            row += 1;
        }

        if self.include_totals && row > 1 {
            sheet
                .write_with_format(row, 0, "TOTAL", &formats.total_text)
                .map_err(format_error)?;
            for (col, column, function) in [(1u16, 'B', "SUM"), (2, 'C', "SUM"), (3, 'D', "MAX"), (4, 'E', "SUM")] {
                let formula = format!("={}({}2:{}{})", function, column, column, row);
                sheet
                    .write_formula_with_format(row, col, formula.as_str(), &formats.total_integer)
                    .map_err(format_error)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> AssigneeAges {
        let mut ages = AssigneeAges::new("Ada");
        ages.add(9, 11);
        ages.add(3, 5);
        ages
    }

    #[test]
    fn renderer_defaults() {
        let renderer = AgeWorkbookRenderer::new();
        assert_eq!(renderer.sheet_name, "Ticket Ages");
        assert!(renderer.include_totals);
        assert!(!renderer.no_totals().include_totals);
    }

    #[test]
    fn produces_xlsx_bytes() {
        let xlsx = AgeWorkbookRenderer::new().render(&[ada()]).unwrap();
        assert!(xlsx.len() > 100);
        assert_eq!(&xlsx[0..2], b"PK");
    }

    #[test]
    fn empty_summary_still_has_headers() {
        let xlsx = AgeWorkbookRenderer::new().render(&[]).unwrap();
        assert_eq!(&xlsx[0..2], b"PK");
    }

    #[test]
    fn invalid_sheet_name_is_a_format_error() {
        let err = AgeWorkbookRenderer::new().sheet_name("bad/name").render(&[ada()]).unwrap_err();
        assert!(matches!(err, RenderError::Format(_)));
    }
}
