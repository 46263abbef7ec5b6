//! PowerPoint output
//!
//! Slides are appended to a copy of the template package. Titles and
//! placeholder text go into the placeholders the layout defines; buttons are
//! free rounded rectangles coloured from the template theme.

use std::collections::HashMap;

use deckgen_core::{Brightness, Button, Deck, RenderError, Renderer, Slide, SlideLayout, SlideSize, ThemeColor};
use tracing::{debug, warn};

use crate::template::{LayoutMap, LayoutPart, TemplatePackage, CONTENT_TYPES, PRESENTATION, PRESENTATION_RELS};
use crate::xml::{
    elements, escape, insert_before, CT_SLIDE, NS_A, NS_P, NS_PACKAGE_RELS, NS_R, REL_SLIDE, REL_SLIDE_LAYOUT,
    SHAPE_TREE_HEADER, XML_DECLARATION,
};

const LANGUAGE: &str = "en-GB";

/// Lowest slide id PowerPoint accepts
const FIRST_SLIDE_ID: u32 = 256;

/// PPTX renderer
#[derive(Clone, Debug)]
pub struct PptxRenderer {
    template: TemplatePackage,
    layouts: LayoutMap,
}

impl Default for PptxRenderer {
    /// Built-in template with its own layout positions
    fn default() -> Self {
        Self {
            template: TemplatePackage::builtin(),
            layouts: LayoutMap::builtin(),
        }
    }
}

impl PptxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render onto `template`, using the corporate layout positions unless
    /// overridden with [`PptxRenderer::layouts`]
    pub fn with_template(template: TemplatePackage) -> Self {
        Self {
            template,
            layouts: LayoutMap::default(),
        }
    }

    /// Configure the layout mapping
    pub fn layouts(mut self, layouts: LayoutMap) -> Self {
        self.layouts = layouts;
        self
    }

    pub fn template(&self) -> &TemplatePackage {
        &self.template
    }

    /// Slide size of the template, which reports need for pagination
    pub fn slide_size(&self) -> Result<SlideSize, RenderError> {
        self.template.slide_size()
    }

    fn resolve_layouts(&self, deck: &Deck) -> Result<HashMap<SlideLayout, LayoutPart>, RenderError> {
        let mut resolved = HashMap::new();
        for slide in &deck.slides {
            if !resolved.contains_key(&slide.layout) {
                let part = self
                    .template
                    .layout(self.layouts.master, self.layouts.index(slide.layout))?;
                debug!(layout = slide.layout.as_str(), part = %part.part, "slide layout mapped");
                resolved.insert(slide.layout, part);
            }
        }
        Ok(resolved)
    }
}

impl Renderer for PptxRenderer {
    type Output = Vec<u8>;

    fn render(&self, deck: &Deck) -> Result<Vec<u8>, RenderError> {
        let layouts = self.resolve_layouts(deck)?;
        let mut package = self.template.clone();

        let mut presentation = package.part_str(PRESENTATION)?.to_string();
        let mut presentation_rels = package.part_str(PRESENTATION_RELS)?.to_string();
        let mut content_types = package.part_str(CONTENT_TYPES)?.to_string();

        let first_slide = next_slide_number(&package);
        let mut next_rel = next_relationship_number(&package)?;
        let mut next_id = next_slide_id(&presentation)?;

        let mut slide_ids = String::new();
        let mut new_rels = String::new();
        let mut overrides = String::new();

        for (offset, slide) in deck.slides.iter().enumerate() {
            let Some(layout) = layouts.get(&slide.layout) else {
                continue;
            };
            let number = first_slide + offset;
            let part = format!("ppt/slides/slide{}.xml", number);

            package.insert(part.clone(), slide_xml(slide, layout));
            package.insert(
                format!("ppt/slides/_rels/slide{}.xml.rels", number),
                slide_rels(layout),
            );

            new_rels.push_str(&format!(
                "<Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>",
                next_rel, REL_SLIDE, number
            ));
            slide_ids.push_str(&format!("<p:sldId id=\"{}\" r:id=\"rId{}\"/>", next_id, next_rel));
            overrides.push_str(&format!(
                "<Override PartName=\"/{}\" ContentType=\"{}\"/>",
                part, CT_SLIDE
            ));
            next_rel += 1;
            next_id += 1;
        }

        if !deck.is_empty() {
            presentation_rels = insert_before(&presentation_rels, "</Relationships>", &new_rels, PRESENTATION_RELS)?;
            content_types = insert_before(&content_types, "</Types>", &overrides, CONTENT_TYPES)?;
            presentation = add_slide_ids(&presentation, &slide_ids)?;
        }

        package.insert(PRESENTATION, presentation);
        package.insert(PRESENTATION_RELS, presentation_rels);
        package.insert(CONTENT_TYPES, content_types);

        debug!(slides = deck.len(), buttons = deck.button_count(), "deck rendered");
        package.to_bytes()
    }
}

// ============================================================================
// Package bookkeeping
// ============================================================================

fn next_slide_number(package: &TemplatePackage) -> usize {
    package
        .part_names()
        .filter_map(|name| name.strip_prefix("ppt/slides/slide")?.strip_suffix(".xml")?.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

fn next_relationship_number(package: &TemplatePackage) -> Result<usize, RenderError> {
    Ok(package
        .relationships(PRESENTATION)?
        .iter()
        .filter_map(|rel| rel.id.strip_prefix("rId")?.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
        + 1)
}

fn next_slide_id(presentation: &str) -> Result<u32, RenderError> {
    let highest = elements(presentation, PRESENTATION, b"p:sldId")?
        .iter()
        .filter_map(|attrs| attrs.get("id")?.parse::<u32>().ok())
        .max();
    Ok(highest.map_or(FIRST_SLIDE_ID, |id| (id + 1).max(FIRST_SLIDE_ID)))
}

/// Append slide ids, creating the list before `p:sldSz` when the template has none
fn add_slide_ids(presentation: &str, slide_ids: &str) -> Result<String, RenderError> {
    if presentation.contains("</p:sldIdLst>") {
        insert_before(presentation, "</p:sldIdLst>", slide_ids, PRESENTATION)
    } else if presentation.contains("<p:sldIdLst/>") {
        Ok(presentation.replacen("<p:sldIdLst/>", &format!("<p:sldIdLst>{}</p:sldIdLst>", slide_ids), 1))
    } else {
        insert_before(
            presentation,
            "<p:sldSz",
            &format!("<p:sldIdLst>{}</p:sldIdLst>", slide_ids),
            PRESENTATION,
        )
    }
}

fn slide_rels(layout: &LayoutPart) -> String {
    let target = match layout.part.strip_prefix("ppt/") {
        Some(inside) => format!("../{}", inside),
        None => format!("/{}", layout.part),
    };
    format!(
        "{}<Relationships xmlns=\"{}\"><Relationship Id=\"rId1\" Type=\"{}\" Target=\"{}\"/></Relationships>",
        XML_DECLARATION,
        NS_PACKAGE_RELS,
        REL_SLIDE_LAYOUT,
        escape(&target)
    )
}

// ============================================================================
// Slide XML
// ============================================================================

fn slide_xml(slide: &Slide, layout: &LayoutPart) -> String {
    let mut shapes = String::new();
    let mut shape_id = 2;

    match &layout.title {
        Some(kind) => {
            shapes.push_str(&placeholder_shape(shape_id, "Title", Some(kind.as_str()), None, &slide.title));
            shape_id += 1;
        }
        None if !slide.title.is_empty() => {
            warn!(layout = %layout.part, title = %slide.title, "layout has no title placeholder, title dropped");
        }
        None => {}
    }

    for (idx, text) in &slide.placeholders {
        match layout.placeholders.get(idx) {
            Some(kind) => {
                let name = format!("Placeholder {}", idx);
                shapes.push_str(&placeholder_shape(shape_id, &name, kind.as_deref(), Some(*idx), text));
                shape_id += 1;
            }
            None => warn!(layout = %layout.part, idx, "layout has no such placeholder, text dropped"),
        }
    }

    for (n, button) in slide.buttons.iter().enumerate() {
        shapes.push_str(&button_shape(shape_id, n + 1, button));
        shape_id += 1;
    }

    format!(
        "{decl}<p:sld xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\">\
         <p:cSld><p:spTree>{header}{shapes}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>",
        decl = XML_DECLARATION,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        header = SHAPE_TREE_HEADER,
        shapes = shapes,
    )
}

fn placeholder_shape(id: usize, name: &str, kind: Option<&str>, idx: Option<u32>, text: &str) -> String {
    let mut ph = String::from("<p:ph");
    if let Some(kind) = kind {
        ph.push_str(&format!(" type=\"{}\"", escape(kind)));
    }
    if let Some(idx) = idx {
        ph.push_str(&format!(" idx=\"{}\"", idx));
    }
    ph.push_str("/>");

    let paragraphs: String = text
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                format!("<a:p><a:endParaRPr lang=\"{}\"/></a:p>", LANGUAGE)
            } else {
                format!(
                    "<a:p><a:r><a:rPr lang=\"{}\" dirty=\"0\"/><a:t>{}</a:t></a:r></a:p>",
                    LANGUAGE,
                    escape(line)
                )
            }
        })
        .collect();

    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{}\" name=\"{}\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>",
        id,
        escape(name),
        ph,
        paragraphs
    )
}

/// `<a:schemeClr>` with luminance modifiers for `brightness`
fn scheme_colour(colour: ThemeColor, brightness: Brightness) -> String {
    let (lum_mod, lum_off) = brightness.luminance();
    let mut xml = format!("<a:schemeClr val=\"{}\">", colour.scheme_name());
    if let Some(value) = lum_mod {
        xml.push_str(&format!("<a:lumMod val=\"{}\"/>", value));
    }
    if let Some(value) = lum_off {
        xml.push_str(&format!("<a:lumOff val=\"{}\"/>", value));
    }
    xml.push_str("</a:schemeClr>");
    xml
}

fn button_shape(id: usize, number: usize, button: &Button) -> String {
    let bold_line = button.bold_line();
    let font = format!(
        "<a:solidFill>{}</a:solidFill>",
        scheme_colour(button.font_colour, Brightness::NONE)
    );
    let size = button.font_size.hundredths();

    let paragraphs: String = button
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if line.is_empty() {
                format!(
                    "<a:p><a:endParaRPr lang=\"{}\" sz=\"{}\" dirty=\"0\">{}</a:endParaRPr></a:p>",
                    LANGUAGE, size, font
                )
            } else {
                let bold = if bold_line == Some(i) { " b=\"1\"" } else { "" };
                format!(
                    "<a:p><a:r><a:rPr lang=\"{}\" sz=\"{}\"{} dirty=\"0\">{}</a:rPr><a:t>{}</a:t></a:r></a:p>",
                    LANGUAGE,
                    size,
                    bold,
                    font,
                    escape(line)
                )
            }
        })
        .collect();

    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Rounded Rectangle {number}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"roundRect\"><a:avLst/></a:prstGeom>\
         <a:solidFill>{fill}</a:solidFill><a:ln><a:solidFill>{border}</a:solidFill></a:ln><a:effectLst/></p:spPr>\
         <p:txBody><a:bodyPr rtlCol=\"0\" anchor=\"t\"/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>",
        id = id,
        number = number,
        x = button.left.value(),
        y = button.top.value(),
        cx = button.width.value(),
        cy = button.height.value(),
        fill = scheme_colour(button.fill, button.fill_brightness),
        border = scheme_colour(button.border, button.border_brightness),
        paragraphs = paragraphs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckgen_core::{ButtonStyle, Emu};
    use pretty_assertions::assert_eq;

    fn layout(title: Option<&str>, placeholders: &[u32]) -> LayoutPart {
        LayoutPart {
            part: "ppt/slideLayouts/slideLayout6.xml".into(),
            name: None,
            title: title.map(String::from),
            placeholders: placeholders.iter().map(|idx| (*idx, Some("body".to_string()))).collect(),
        }
    }

    #[test]
    fn scheme_colours_carry_luminance() {
        assert_eq!(
            scheme_colour(ThemeColor::WHITE, Brightness::new(0.8)),
            "<a:schemeClr val=\"bg1\"><a:lumMod val=\"20000\"/><a:lumOff val=\"80000\"/></a:schemeClr>"
        );
        assert_eq!(
            scheme_colour(ThemeColor::PINK, Brightness::new(-0.5)),
            "<a:schemeClr val=\"accent5\"><a:lumMod val=\"50000\"/></a:schemeClr>"
        );
        assert_eq!(
            scheme_colour(ThemeColor::ORANGE, Brightness::NONE),
            "<a:schemeClr val=\"accent2\"></a:schemeClr>"
        );
    }

    #[test]
    fn button_first_line_is_bold() {
        let style = ButtonStyle::project_card();
        let button = Button::styled(&style, Emu::cm(0.65), Emu::cm(2.0), "On Hold", "Fibre & Ducts\nStaging: x");
        let xml = button_shape(7, 1, &button);

        assert!(xml.contains("<p:cNvPr id=\"7\" name=\"Rounded Rectangle 1\"/>"));
        assert!(xml.contains("<a:off x=\"234000\" y=\"720000\"/>"));
        assert!(xml.contains("prst=\"roundRect\""));
        assert!(xml.contains("<a:solidFill><a:schemeClr val=\"accent2\"></a:schemeClr></a:solidFill><a:ln>"));
        assert!(xml.contains("<a:effectLst/>"));
        assert!(xml.contains("anchor=\"t\""));
        assert!(xml.contains("sz=\"1100\" b=\"1\" dirty=\"0\"><a:solidFill><a:schemeClr val=\"bg1\"></a:schemeClr></a:solidFill></a:rPr><a:t>Fibre &amp; Ducts</a:t>"));
        assert!(xml.contains("sz=\"1100\" dirty=\"0\"><a:solidFill><a:schemeClr val=\"bg1\"></a:schemeClr></a:solidFill></a:rPr><a:t>Staging: x</a:t>"));
    }

    #[test]
    fn slide_uses_layout_placeholders() {
        let slide = Slide::new(SlideLayout::ThreeColumn, "Training - 3")
            .placeholder(27, "Assessing:")
            .placeholder(99, "nowhere");
        let xml = slide_xml(&slide, &layout(Some("title"), &[27, 29, 31]));

        assert!(xml.contains("<p:ph type=\"title\"/>"));
        assert!(xml.contains("<a:t>Training - 3</a:t>"));
        assert!(xml.contains("<p:ph type=\"body\" idx=\"27\"/>"));
        assert!(xml.contains("<a:t>Assessing:</a:t>"));
        assert!(!xml.contains("nowhere"));
    }

    #[test]
    fn layout_without_title_drops_it() {
        let slide = Slide::section("Impacted Teams");
        let xml = slide_xml(&slide, &layout(None, &[]));
        assert!(!xml.contains("Impacted Teams"));
    }

    #[test]
    fn multiline_placeholder_text() {
        let xml = placeholder_shape(3, "Placeholder 24", Some("body"), Some(24), "Line 1\n\nLine 3");
        assert_eq!(xml.matches("<a:p>").count(), 3);
        assert!(xml.contains("<a:p><a:endParaRPr lang=\"en-GB\"/></a:p>"));
    }

    #[test]
    fn slide_ids_start_at_256() {
        assert_eq!(next_slide_id("<p:presentation/>").unwrap(), 256);
        assert_eq!(
            next_slide_id("<p:sldIdLst><p:sldId id=\"256\" r:id=\"rId5\"/><p:sldId id=\"261\" r:id=\"rId6\"/></p:sldIdLst>")
                .unwrap(),
            262
        );
    }

    #[test]
    fn slide_id_list_is_created_or_extended() {
        let ids = "<p:sldId id=\"256\" r:id=\"rId5\"/>";
        assert_eq!(
            add_slide_ids("<p:sldMasterIdLst/><p:sldSz cx=\"1\" cy=\"1\"/>", ids).unwrap(),
            "<p:sldMasterIdLst/><p:sldIdLst><p:sldId id=\"256\" r:id=\"rId5\"/></p:sldIdLst><p:sldSz cx=\"1\" cy=\"1\"/>"
        );
        assert_eq!(
            add_slide_ids("<p:sldIdLst/><p:sldSz/>", ids).unwrap(),
            "<p:sldIdLst><p:sldId id=\"256\" r:id=\"rId5\"/></p:sldIdLst><p:sldSz/>"
        );
        assert_eq!(
            add_slide_ids("<p:sldIdLst><x/></p:sldIdLst>", ids).unwrap(),
            "<p:sldIdLst><x/><p:sldId id=\"256\" r:id=\"rId5\"/></p:sldIdLst>"
        );
    }

    #[test]
    fn slide_rels_point_at_layout() {
        let rels = slide_rels(&layout(Some("title"), &[]));
        assert!(rels.contains("Target=\"../slideLayouts/slideLayout6.xml\""));
    }
}
