//! # deckgen-core
//!
//! Core domain model and traits for the deckgen report generator.
//!
//! This crate provides:
//! - Input records: `ProjectRecord`, `DocumentRecord`, `TicketRecord`
//! - Slide geometry: `Emu`, `SlideSize`, `ButtonStyle`, `GridSpec`
//! - The output model: `Deck`, `Slide`, `Button`
//! - Ticket age arithmetic (calendar days and business days)
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use deckgen_core::{Button, ButtonStyle, Deck, Emu, Slide, SlideLayout};
//!
//! let style = ButtonStyle::project_card();
//! let mut slide = Slide::new(SlideLayout::TitleOnly, "Ada Lovelace - 1");
//! slide.buttons.push(Button::styled(&style, Emu::cm(0.65), Emu::cm(2.0), "Open", "Fibre Trial"));
//!
//! let mut deck = Deck::new();
//! deck.push(slide);
//! assert_eq!(deck.button_count(), 1);
//! ```

pub mod calendar;
pub mod deck;
pub mod records;
pub mod style;
pub mod theme;
pub mod units;

pub use calendar::AssigneeAges;
pub use deck::{Button, Deck, Slide, SlideLayout};
pub use records::{
    impact_symbol, impact_symbols, parse_list_cell, priority_text, staging_text, DocumentRecord,
    ProjectRecord, TicketRecord,
};
pub use style::{ButtonStyle, GridSpec, StagingColumns};
pub use theme::{Brightness, ThemeColor};
pub use units::{Emu, FontSize, SlideSize};

use thiserror::Error;

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a deck to the output format
    fn render(&self, deck: &Deck) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid template: {0}")]
    Template(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
