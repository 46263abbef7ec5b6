//! SVG bar chart of open-ticket age per assignee

use deckgen_core::{AssigneeAges, RenderError};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;

/// Horizontal bar chart renderer configuration
#[derive(Clone, Debug)]
pub struct AgeChartRenderer {
    /// Width of the bar area in pixels
    pub chart_width: u32,
    /// Height per assignee row in pixels
    pub row_height: u32,
    /// Width of the name column in pixels
    pub label_width: u32,
    /// Space right of the longest bar for its count label
    pub count_width: u32,
    pub padding: u32,
    pub title: String,
    pub bar_color: String,
    pub text_color: String,
    pub axis_color: String,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for AgeChartRenderer {
    fn default() -> Self {
        Self {
            chart_width: 600,
            row_height: 28,
            label_width: 160,
            count_width: 90,
            padding: 20,
            title: "Open ticket age (business days)".into(),
            bar_color: "#e6007e".into(),
            text_color: "#2c3e50".into(),
            axis_color: "#bdc3c7".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl AgeChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Configure bar area width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    const HEADER_HEIGHT: u32 = 30;

    fn total_width(&self) -> u32 {
        self.padding * 2 + self.label_width + self.chart_width + self.count_width
    }

    fn total_height(&self, rows: usize) -> u32 {
        self.padding * 2 + Self::HEADER_HEIGHT + rows as u32 * self.row_height
    }

    fn render_row(&self, row: usize, ages: &AssigneeAges, longest: i64) -> Group {
        let top = self.padding + Self::HEADER_HEIGHT + row as u32 * self.row_height;
        let bar_left = self.padding + self.label_width;
        let bar_width = (ages.business_days.max(0) as f64 / longest as f64 * self.chart_width as f64).round();
        let middle = top + self.row_height / 2 + self.font_size / 3;

        let name = Text::new(ages.assignee.as_str())
            .set("x", bar_left - 8)
            .set("y", middle)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.text_color.as_str())
            .set("text-anchor", "end");

        let bar = Rectangle::new()
            .set("x", bar_left)
            .set("y", top + 4)
            .set("width", bar_width)
            .set("height", self.row_height - 8)
            .set("rx", 3)
            .set("fill", self.bar_color.as_str());

        let count = Text::new(format!("{} tickets", ages.tickets))
            .set("x", bar_left as f64 + bar_width + 6.0)
            .set("y", middle)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size - 1)
            .set("fill", self.text_color.as_str());

        Group::new()
            .set("class", "assignee")
            .set("data-business-days", ages.business_days)
            .add(name)
            .add(bar)
            .add(count)
    }

    /// Render the chart; the assignee with the oldest tickets comes first
    pub fn render(&self, ages: &[AssigneeAges]) -> Result<String, RenderError> {
        if ages.is_empty() {
            return Err(RenderError::InvalidData("No open tickets to chart".into()));
        }

        let mut rows: Vec<&AssigneeAges> = ages.iter().collect();
        rows.sort_by(|a, b| b.business_days.cmp(&a.business_days));
        let longest = rows[0].business_days.max(1);

        let width = self.total_width();
        let height = self.total_height(rows.len());

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", "#ffffff");
        document = document.add(background);

        let title = Text::new(self.title.as_str())
            .set("x", self.padding)
            .set("y", self.padding + 15)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size + 4)
            .set("font-weight", "bold")
            .set("fill", self.text_color.as_str());
        document = document.add(title);

        let axis_x = self.padding + self.label_width;
        let axis = Line::new()
            .set("x1", axis_x)
            .set("y1", self.padding + Self::HEADER_HEIGHT)
            .set("x2", axis_x)
            .set("y2", height - self.padding)
            .set("stroke", self.axis_color.as_str())
            .set("stroke-width", 1);
        document = document.add(axis);

        for (row, assignee) in rows.iter().enumerate() {
            document = document.add(self.render_row(row, assignee, longest));
        }

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ages(name: &str, tickets: usize, business_days: i64) -> AssigneeAges {
        AssigneeAges {
            assignee: name.into(),
            tickets,
            business_days,
            oldest_business_days: business_days,
            total_days: business_days,
        }
    }

    #[test]
    fn longest_bar_on_top() {
        let svg = AgeChartRenderer::new()
            .render(&[ages("Bob", 1, 3), ages("Ada", 2, 12)])
            .unwrap();

        assert!(svg.starts_with("<svg"));
        let ada = svg.find("Ada").unwrap();
        let bob = svg.find("Bob").unwrap();
        assert!(ada < bob);
        assert!(svg.contains("2 tickets"));
        assert!(svg.contains("1 tickets"));
    }

    #[test]
    fn longest_bar_fills_chart_width() {
        let svg = AgeChartRenderer::new()
            .chart_width(400)
            .render(&[ages("Ada", 2, 12), ages("Bob", 1, 3)])
            .unwrap();
        assert!(svg.contains("width=\"400\""));
        assert!(svg.contains("width=\"100\""));
    }

    #[test]
    fn zero_ages_do_not_divide_by_zero() {
        let svg = AgeChartRenderer::new().render(&[ages("Ada", 1, 0)]).unwrap();
        assert!(svg.contains("width=\"0\""));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(AgeChartRenderer::new().render(&[]).is_err());
    }
}
