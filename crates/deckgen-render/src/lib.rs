//! # deckgen-render
//!
//! Rendering backends for deckgen reports.
//!
//! This crate provides:
//! - PowerPoint output onto a corporate `.pptx` template or a built-in one
//! - Markdown outlines (dry runs)
//! - An SVG chart of open-ticket age per assignee
//! - An Excel summary of open-ticket age per assignee
//!
//! ## Example
//!
//! ```rust
//! use deckgen_core::{Deck, Renderer, Slide};
//! use deckgen_render::{OutlineRenderer, PptxRenderer};
//!
//! let mut deck = Deck::new();
//! deck.push(Slide::section("On Hold Projects"));
//!
//! let pptx = PptxRenderer::new().render(&deck).unwrap();
//! assert_eq!(&pptx[0..2], b"PK");
//!
//! let outline = OutlineRenderer::new().render(&deck).unwrap();
//! assert!(outline.contains("## 1. On Hold Projects"));
//! ```

mod builtin;
pub mod chart;
pub mod outline;
pub mod pptx;
pub mod template;
pub mod workbook;
mod xml;

pub use chart::AgeChartRenderer;
pub use outline::OutlineRenderer;
pub use pptx::PptxRenderer;
pub use template::{LayoutMap, LayoutPart, Relationship, TemplatePackage};
pub use workbook::AgeWorkbookRenderer;
