//! Button styles and grid presets
//!
//! Every slide body is a grid of rounded rectangles ("buttons"). A
//! `ButtonStyle` fixes the rectangle size, font and colours; a `GridSpec`
//! fixes where the grid starts and how far apart the buttons sit.

use crate::theme::{Brightness, ThemeColor};
use crate::units::{Emu, FontSize};

/// Status → fill colour lookup
pub type StatusColours = &'static [(&'static str, ThemeColor)];

/// Status colours for project buttons
pub const PROJECT_STATUS_COLOURS: StatusColours = &[
    ("Open", ThemeColor::PINK),
    ("On Hold", ThemeColor::ORANGE),
    ("New", ThemeColor::PURPLE),
    ("Blocked", ThemeColor::ORANGE),
];

/// Status colours for document buttons
pub const DOCUMENT_STATUS_COLOURS: StatusColours = &[
    ("New", ThemeColor::GREEN),
    ("In Progress", ThemeColor::ORANGE),
    ("Internal Review", ThemeColor::BLUE),
    ("External Review", ThemeColor::BLUE),
    ("Ready to Release", ThemeColor::PINK),
    ("Internal Draft Review", ThemeColor::BLUE),
    ("PDF Final Review", ThemeColor::BLUE),
];

/// Border brightness applied to every button outline
pub const BORDER_BRIGHTNESS: f64 = -0.5;

/// Visual definition of one kind of button
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonStyle {
    pub width: Emu,
    pub height: Emu,
    pub font_size: FontSize,
    /// Fill used when no status is supplied
    pub fill: ThemeColor,
    pub font_colour: ThemeColor,
    pub border: ThemeColor,
    pub fill_brightness: Brightness,
    pub status_colours: StatusColours,
}

impl ButtonStyle {
    fn project(width: f64, height: f64, font: u32, fill: ThemeColor) -> Self {
        Self {
            width: Emu::cm(width),
            height: Emu::cm(height),
            font_size: FontSize::points(font),
            fill,
            font_colour: ThemeColor::WHITE,
            border: fill,
            fill_brightness: Brightness::NONE,
            status_colours: PROJECT_STATUS_COLOURS,
        }
    }

    /// Owner, objective and impact grids
    pub fn project_card() -> Self {
        Self::project(7.8, 2.8, 11, ThemeColor::PINK)
    }

    /// Single-line title buttons on the "All Projects" overview
    pub fn all_projects() -> Self {
        Self::project(7.8, 0.8, 11, ThemeColor::PINK)
    }

    /// Taller cards leaving room for the project summary
    pub fn on_hold() -> Self {
        Self::project(7.8, 4.4, 11, ThemeColor::ORANGE)
    }

    /// Middle and right columns of the staging board
    pub fn three_column() -> Self {
        Self::project(8.6, 2.0, 10, ThemeColor::ORANGE)
    }

    /// Left column of the staging board (two narrow sub-columns)
    pub fn three_column_first() -> Self {
        Self::project(6.27, 2.0, 10, ThemeColor::PINK)
    }

    /// Release board entries
    pub fn document() -> Self {
        Self {
            width: Emu::cm(15.0),
            height: Emu::cm(2.3),
            font_size: FontSize::points(11),
            fill: ThemeColor::WHITE,
            font_colour: ThemeColor::BLACK,
            border: ThemeColor::PINK,
            fill_brightness: Brightness::new(0.8),
            status_colours: DOCUMENT_STATUS_COLOURS,
        }
    }

    /// Fill colour for a button with the given status.
    ///
    /// An empty status means "use the style's own fill"; an unknown status
    /// falls back to pink.
    pub fn fill_for(&self, status: &str) -> ThemeColor {
        if status.is_empty() {
            return self.fill;
        }
        self.status_colours
            .iter()
            .find(|(name, _)| *name == status)
            .map(|(_, colour)| *colour)
            .unwrap_or(ThemeColor::PINK)
    }
}

/// Grid origin and spacing
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    pub start_left: Emu,
    pub start_top: Emu,
    pub horizontal_spacing: Emu,
    pub vertical_spacing: Emu,
}

impl GridSpec {
    pub fn four_column() -> Self {
        Self {
            start_left: Emu::cm(0.65),
            start_top: Emu::cm(2.0),
            horizontal_spacing: Emu::cm(0.2),
            vertical_spacing: Emu::cm(0.2),
        }
    }

    pub fn document_board() -> Self {
        Self {
            start_left: Emu::cm(0.65),
            start_top: Emu::cm(3.87),
            horizontal_spacing: Emu::cm(0.2),
            vertical_spacing: Emu::cm(0.2),
        }
    }

    /// Rows of `button_height` that fit between the grid top and the bottom
    /// of a slide `slide_height` tall. Always at least one.
    pub fn rows_per_slide(&self, button_height: Emu, slide_height: Emu) -> usize {
        let pitch = (button_height + self.vertical_spacing).value();
        if pitch <= 0 {
            return 1;
        }
        let available = (slide_height - self.start_top + self.vertical_spacing).value();
        (available / pitch).max(1) as usize
    }
}

/// Column positions of the three-column staging board
#[derive(Clone, Debug, PartialEq)]
pub struct StagingColumns {
    /// Column 1, first sub-column
    pub col1_left: Emu,
    /// Column 1, second sub-column
    pub col1_right: Emu,
    pub col2_left: Emu,
    pub col3_left: Emu,
    pub start_top: Emu,
    pub vertical_spacing: Emu,
}

impl Default for StagingColumns {
    fn default() -> Self {
        Self {
            col1_left: Emu::cm(0.65),
            col1_right: Emu::cm(7.29),
            col2_left: Emu::cm(14.82),
            col3_left: Emu::cm(24.33),
            start_top: Emu::cm(3.39),
            vertical_spacing: Emu::cm(0.2),
        }
    }
}

impl StagingColumns {
    /// Headings written into the three-column layout placeholders
    pub const HEADINGS: [(u32, &'static str); 3] =
        [(27, "Assessing:"), (29, "Testing:"), (31, "Preparing Release:")];

    pub fn as_grid(&self) -> GridSpec {
        GridSpec {
            start_left: self.col1_left,
            start_top: self.start_top,
            horizontal_spacing: Emu::ZERO,
            vertical_spacing: self.vertical_spacing,
        }
    }
}

/// Heading shown above a release board grid
pub fn document_board_heading(kind: &str) -> &'static str {
    match kind {
        "new" => "New Documents",
        "update" => "Updated Documents",
        "release_impact" => "Changes to Review:",
        "urgency_quarterly" => "Quarterly Releases",
        "urgency_monthly" => "Monthly Releases",
        _ => " ",
    }
}

/// Main title of every release board slide
pub const DOCUMENT_BOARD_TITLE: &str = "Technical Releases";
