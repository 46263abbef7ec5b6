//! Grid placement and pagination
//!
//! A grid fills row by row from its origin. When the cells do not fit on one
//! slide the grid continues on copies of the slide, each title carrying a
//! `(page/pages)` suffix.

use deckgen_core::{Button, ButtonStyle, Emu, GridSpec, Slide, StagingColumns};
use tracing::debug;

/// Content of one button before it is placed
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Status used to pick the fill colour; empty means the style fill
    pub status: String,
    pub text: String,
}

impl Cell {
    pub fn new(status: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            text: text.into(),
        }
    }
}

/// A fixed number of columns of identically styled buttons
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub spec: GridSpec,
    pub style: ButtonStyle,
    pub columns: usize,
}

impl Grid {
    pub fn new(spec: GridSpec, style: ButtonStyle, columns: usize) -> Self {
        Self {
            spec,
            style,
            columns: columns.max(1),
        }
    }

    /// Four columns of project cards below the title bar
    pub fn four_column(style: ButtonStyle) -> Self {
        Self::new(GridSpec::four_column(), style, 4)
    }

    /// Two columns of document entries below the board headings
    pub fn document_board() -> Self {
        Self::new(GridSpec::document_board(), ButtonStyle::document(), 2)
    }

    /// Top-left corner of the button at `index` on its slide
    pub fn position(&self, index: usize) -> (Emu, Emu) {
        let row = index / self.columns;
        let column = index % self.columns;
        let left = self.spec.start_left + (self.style.width + self.spec.horizontal_spacing) * column;
        let top = self.spec.start_top + (self.style.height + self.spec.vertical_spacing) * row;
        (left, top)
    }

    pub fn per_slide(&self, slide_height: Emu) -> usize {
        self.spec.rows_per_slide(self.style.height, slide_height) * self.columns
    }

    pub fn button(&self, index: usize, cell: &Cell) -> Button {
        let (left, top) = self.position(index);
        Button::styled(&self.style, left, top, &cell.status, cell.text.as_str())
    }
}

/// Pages needed for `len` items, never fewer than one
pub fn page_count(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1)).max(1)
}

/// `title` unchanged on a single page, `title (page/pages)` otherwise
pub fn page_title(title: &str, page: usize, pages: usize) -> String {
    if pages <= 1 {
        title.to_string()
    } else {
        format!("{} ({}/{})", title, page, pages)
    }
}

/// Lay `cells` out on as many copies of `template` as the grid needs
pub fn paginate(template: &Slide, cells: &[Cell], grid: &Grid, slide_height: Emu) -> Vec<Slide> {
    let per_page = grid.per_slide(slide_height);
    let pages = page_count(cells.len(), per_page);
    if pages > 1 {
        debug!(title = %template.title, cells = cells.len(), pages, "paginating grid");
    }

    (0..pages)
        .map(|page| {
            let mut slide = template.clone();
            slide.title = page_title(&template.title, page + 1, pages);
            slide.buttons = page_slice(cells, page, per_page)
                .iter()
                .enumerate()
                .map(|(index, cell)| grid.button(index, cell))
                .collect();
            slide
        })
        .collect()
}

/// Three staging columns with the first split into two narrow sub-columns
#[derive(Clone, Debug, PartialEq)]
pub struct StagingBoard {
    pub columns: StagingColumns,
    /// Buttons of the first column
    pub narrow: ButtonStyle,
    /// Buttons of the second and third columns
    pub wide: ButtonStyle,
}

impl Default for StagingBoard {
    fn default() -> Self {
        Self {
            columns: StagingColumns::default(),
            narrow: ButtonStyle::three_column_first(),
            wide: ButtonStyle::three_column(),
        }
    }
}

impl StagingBoard {
    fn top(&self, style: &ButtonStyle, row: usize) -> Emu {
        self.columns.start_top + (style.height + self.columns.vertical_spacing) * row
    }

    fn rows(&self, slide_height: Emu) -> usize {
        let grid = self.columns.as_grid();
        grid.rows_per_slide(self.narrow.height.max(self.wide.height), slide_height)
    }

    /// Place the three columns, continuing onto further slides while any
    /// column still has cells left
    pub fn paginate(&self, template: &Slide, columns: [&[Cell]; 3], slide_height: Emu) -> Vec<Slide> {
        let rows = self.rows(slide_height);
        let [first, second, third] = columns;
        let pages = page_count(first.len(), rows * 2)
            .max(page_count(second.len(), rows))
            .max(page_count(third.len(), rows));

        (0..pages)
            .map(|page| {
                let mut slide = template.clone();
                slide.title = page_title(&template.title, page + 1, pages);

                for (index, cell) in page_slice(first, page, rows * 2).iter().enumerate() {
                    let left = if index % 2 == 0 {
                        self.columns.col1_left
                    } else {
                        self.columns.col1_right
                    };
                    let top = self.top(&self.narrow, index / 2);
                    slide
                        .buttons
                        .push(Button::styled(&self.narrow, left, top, &cell.status, cell.text.as_str()));
                }
                for (left, cells) in [(self.columns.col2_left, second), (self.columns.col3_left, third)] {
                    for (index, cell) in page_slice(cells, page, rows).iter().enumerate() {
                        let top = self.top(&self.wide, index);
                        slide
                            .buttons
                            .push(Button::styled(&self.wide, left, top, &cell.status, cell.text.as_str()));
                    }
                }
                slide
            })
            .collect()
    }
}

fn page_slice(cells: &[Cell], page: usize, per_page: usize) -> &[Cell] {
    let start = (page * per_page).min(cells.len());
    let end = (start + per_page).min(cells.len());
    &cells[start..end]
}
