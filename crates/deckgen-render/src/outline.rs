//! Markdown outline renderer
//!
//! Lists every slide with its layout, placeholders and button text. Used for
//! dry runs and for reviewing a report without opening PowerPoint.
//!
//! ## Example Output
//!
//! ```text
//! # Deck outline
//!
//! 2 slides, 1 button
//!
//! ## 1. On Hold Projects
//! _section_
//!
//! ## 2. On-Hold Projects - 1
//! _title-only_
//!
//! - **Pole Survey** / Owner: Ada Lovelace / Staging: ▰▰▰▰▱ / Project Summary: Paused (orange)
//! ```

use deckgen_core::{Button, Deck, RenderError, Renderer};

/// Markdown outline renderer
#[derive(Clone, Debug)]
pub struct OutlineRenderer {
    /// Append the fill colour to each button
    pub show_colours: bool,
    /// Append button position and size in centimetres
    pub show_geometry: bool,
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self {
            show_colours: true,
            show_geometry: false,
        }
    }
}

impl OutlineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_colours(mut self) -> Self {
        self.show_colours = false;
        self
    }

    pub fn with_geometry(mut self) -> Self {
        self.show_geometry = true;
        self
    }

    fn button_line(&self, button: &Button) -> String {
        let bold = button.bold_line();
        let text = button
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(i, line)| {
                if Some(i) == bold {
                    format!("**{}**", line)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" / ");

        let mut line = format!("- {}", text);
        if self.show_colours {
            line.push_str(&format!(" ({})", button.fill));
        }
        if self.show_geometry {
            line.push_str(&format!(
                " @ {:.2},{:.2} cm, {:.2}x{:.2} cm",
                button.left.as_cm(),
                button.top.as_cm(),
                button.width.as_cm(),
                button.height.as_cm()
            ));
        }
        line
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

impl Renderer for OutlineRenderer {
    type Output = String;

    fn render(&self, deck: &Deck) -> Result<String, RenderError> {
        if deck.is_empty() {
            return Err(RenderError::InvalidData("No slides to render".into()));
        }

        let mut output = String::from("# Deck outline\n\n");
        output.push_str(&format!(
            "{}, {}\n",
            plural(deck.len(), "slide"),
            plural(deck.button_count(), "button")
        ));

        for (n, slide) in deck.slides.iter().enumerate() {
            output.push_str(&format!("\n## {}. {}\n", n + 1, slide.title));
            output.push_str(&format!("_{}_\n", slide.layout.as_str()));

            if !slide.placeholders.is_empty() || !slide.buttons.is_empty() {
                output.push('\n');
            }
            for (idx, text) in &slide.placeholders {
                output.push_str(&format!("- [{}] {}\n", idx, text.replace('\n', " / ")));
            }
            for button in &slide.buttons {
                output.push_str(&self.button_line(button));
                output.push('\n');
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckgen_core::{ButtonStyle, Emu, Slide, SlideLayout};
    use pretty_assertions::assert_eq;

    fn deck() -> Deck {
        let mut deck = Deck::new();
        deck.push(Slide::section("On Hold Projects"));
        let mut grid = Slide::new(SlideLayout::TitleOnly, "On-Hold Projects - 1");
        grid.buttons.push(Button::styled(
            &ButtonStyle::on_hold(),
            Emu::cm(0.65),
            Emu::cm(2.0),
            "On Hold",
            "Pole Survey\nOwner: Ada Lovelace",
        ));
        deck.push(grid);
        deck
    }

    #[test]
    fn outline_lists_slides_and_buttons() {
        let output = OutlineRenderer::new().render(&deck()).unwrap();
        assert_eq!(
            output,
            "# Deck outline\n\n2 slides, 1 button\n\n\
             ## 1. On Hold Projects\n_section_\n\n\
             ## 2. On-Hold Projects - 1\n_title-only_\n\n\
             - **Pole Survey** / Owner: Ada Lovelace (orange)\n"
        );
    }

    #[test]
    fn outline_options() {
        let output = OutlineRenderer::new().no_colours().with_geometry().render(&deck()).unwrap();
        assert!(output.contains("- **Pole Survey** / Owner: Ada Lovelace @ 0.65,2.00 cm, 7.80x4.40 cm\n"));
    }

    #[test]
    fn placeholders_are_listed() {
        let mut deck = Deck::new();
        deck.push(Slide::new(SlideLayout::ProjectDetail, "Fibre Trial").placeholder(24, "Booked\nSurveyed"));
        let output = OutlineRenderer::new().render(&deck).unwrap();
        assert!(output.contains("- [24] Booked / Surveyed\n"));
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert!(OutlineRenderer::new().render(&Deck::new()).is_err());
    }
}
