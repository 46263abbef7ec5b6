//! Slide deck model
//!
//! Reports build a `Deck`; renderers turn it into files. Nothing in here
//! knows about the output format.

use serde::Serialize;

use crate::style::{ButtonStyle, BORDER_BRIGHTNESS};
use crate::theme::{Brightness, ThemeColor};
use crate::units::{Emu, FontSize};

/// Slide layouts a report can ask for
///
/// The renderer maps each variant onto a layout of the template in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SlideLayout {
    /// Section divider with a large title
    Section,
    /// Title bar, free body area
    TitleOnly,
    /// Title plus three column headings (placeholders 27, 29, 31)
    ThreeColumn,
    /// Title plus board heading (27) and date/group (28)
    DocumentBoard,
    /// Title, summary (10), two headed text columns (24/26, 27/28)
    ProjectDetail,
}

impl SlideLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideLayout::Section => "section",
            SlideLayout::TitleOnly => "title-only",
            SlideLayout::ThreeColumn => "three-column",
            SlideLayout::DocumentBoard => "document-board",
            SlideLayout::ProjectDetail => "project-detail",
        }
    }
}

/// A rounded rectangle holding one record
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Button {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
    pub fill: ThemeColor,
    pub fill_brightness: Brightness,
    pub border: ThemeColor,
    pub border_brightness: Brightness,
    pub font_colour: ThemeColor,
    pub font_size: FontSize,
    /// Newline-separated lines; the first non-empty line renders bold
    pub text: String,
}

impl Button {
    /// Build a button at `(left, top)` sized and coloured by `style`
    pub fn styled(style: &ButtonStyle, left: Emu, top: Emu, status: &str, text: impl Into<String>) -> Self {
        Self {
            left,
            top,
            width: style.width,
            height: style.height,
            fill: style.fill_for(status),
            fill_brightness: style.fill_brightness,
            border: style.border,
            border_brightness: Brightness::new(BORDER_BRIGHTNESS),
            font_colour: style.font_colour,
            font_size: style.font_size,
            text: text.into(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Index of the line rendered in bold, if any
    pub fn bold_line(&self) -> Option<usize> {
        self.lines().position(|line| !line.is_empty())
    }
}

/// One slide
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slide {
    pub layout: SlideLayout,
    pub title: String,
    /// Layout placeholder index → text
    pub placeholders: Vec<(u32, String)>,
    pub buttons: Vec<Button>,
}

impl Slide {
    pub fn new(layout: SlideLayout, title: impl Into<String>) -> Self {
        Self {
            layout,
            title: title.into(),
            placeholders: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn section(title: impl Into<String>) -> Self {
        Self::new(SlideLayout::Section, title)
    }

    pub fn placeholder(mut self, idx: u32, text: impl Into<String>) -> Self {
        self.placeholders.push((idx, text.into()));
        self
    }

    pub fn placeholder_text(&self, idx: u32) -> Option<&str> {
        self.placeholders
            .iter()
            .find(|(i, _)| *i == idx)
            .map(|(_, text)| text.as_str())
    }
}

/// An ordered list of slides
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn extend(&mut self, slides: impl IntoIterator<Item = Slide>) {
        self.slides.extend(slides);
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn button_count(&self) -> usize {
        self.slides.iter().map(|s| s.buttons.len()).sum()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.title.as_str()).collect()
    }
}
