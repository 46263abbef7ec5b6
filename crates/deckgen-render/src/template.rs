//! Presentation template packages
//!
//! A template is an unpacked `.pptx`: every part held in memory by name.
//! Slide layouts are addressed as (master index, layout index), both
//! zero-based, and resolved through the relationship parts the same way
//! PowerPoint does.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use deckgen_core::{Emu, RenderError, SlideLayout, SlideSize};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::builtin;
use crate::xml::{elements, rels_part, resolve_target, REL_SLIDE_LAYOUT, REL_SLIDE_MASTER};

pub const PRESENTATION: &str = "ppt/presentation.xml";
pub const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
pub const CONTENT_TYPES: &str = "[Content_Types].xml";

// ============================================================================
// Layout mapping
// ============================================================================

/// Which template layout each kind of slide uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMap {
    pub master: usize,
    pub section: usize,
    pub title_only: usize,
    pub three_column: usize,
    pub document_board: usize,
    pub project_detail: usize,
}

impl Default for LayoutMap {
    /// Layout positions of the corporate reporting template
    fn default() -> Self {
        Self {
            master: 1,
            section: 3,
            title_only: 5,
            three_column: 6,
            document_board: 7,
            project_detail: 7,
        }
    }
}

impl LayoutMap {
    /// Layout positions of the built-in template
    pub fn builtin() -> Self {
        Self {
            master: 0,
            section: 3,
            title_only: 5,
            three_column: 6,
            document_board: 8,
            project_detail: 7,
        }
    }

    pub fn index(&self, layout: SlideLayout) -> usize {
        match layout {
            SlideLayout::Section => self.section,
            SlideLayout::TitleOnly => self.title_only,
            SlideLayout::ThreeColumn => self.three_column,
            SlideLayout::DocumentBoard => self.document_board,
            SlideLayout::ProjectDetail => self.project_detail,
        }
    }
}

// ============================================================================
// Parts
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub kind: String,
    pub target: String,
}

/// A resolved slide layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPart {
    /// Part name, e.g. `ppt/slideLayouts/slideLayout6.xml`
    pub part: String,
    pub name: Option<String>,
    /// Placeholder type of the title (`title` or `ctrTitle`), if the layout has one
    pub title: Option<String>,
    /// Placeholder index → placeholder type
    pub placeholders: BTreeMap<u32, Option<String>>,
}

/// An in-memory presentation package
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplatePackage {
    parts: BTreeMap<String, Vec<u8>>,
}

impl Default for TemplatePackage {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplatePackage {
    /// The built-in 16:9 template
    pub fn builtin() -> Self {
        Self {
            parts: builtin::parts(),
        }
    }

    /// Unpack a `.pptx` held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RenderError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| RenderError::Template(format!("not a zip package: {}", e)))?;

        let mut parts = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| RenderError::Template(format!("unreadable zip entry: {}", e)))?;
            if file.is_dir() {
                continue;
            }
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            parts.insert(file.name().to_string(), content);
        }

        for required in [CONTENT_TYPES, PRESENTATION, PRESENTATION_RELS] {
            if !parts.contains_key(required) {
                return Err(RenderError::Template(format!(
                    "not a presentation package: missing {}",
                    required
                )));
            }
        }

        debug!(parts = parts.len(), "template unpacked");
        Ok(Self { parts })
    }

    /// Load a `.pptx` template from disk
    pub fn open(path: &Path) -> Result<Self, RenderError> {
        let bytes = std::fs::read(path)
            .map_err(|e| RenderError::Template(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes)
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(Vec::as_slice)
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    pub(crate) fn part_str(&self, name: &str) -> Result<&str, RenderError> {
        let bytes = self
            .part(name)
            .ok_or_else(|| RenderError::Template(format!("missing part {}", name)))?;
        std::str::from_utf8(bytes).map_err(|e| RenderError::Template(format!("{} is not UTF-8: {}", name, e)))
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.parts.insert(name.into(), content.into());
    }

    /// Relationships owned by `part`; a part without a relationships part has none
    pub fn relationships(&self, part: &str) -> Result<Vec<Relationship>, RenderError> {
        let rels = rels_part(part);
        if self.part(&rels).is_none() {
            return Ok(Vec::new());
        }
        let xml = self.part_str(&rels)?;
        Ok(elements(xml, &rels, b"Relationship")?
            .into_iter()
            .map(|mut attrs| Relationship {
                id: attrs.remove("Id").unwrap_or_default(),
                kind: attrs.remove("Type").unwrap_or_default(),
                target: attrs.remove("Target").unwrap_or_default(),
            })
            .collect())
    }

    /// Slide size declared by the presentation (`p:sldSz`)
    pub fn slide_size(&self) -> Result<SlideSize, RenderError> {
        let xml = self.part_str(PRESENTATION)?;
        let size = elements(xml, PRESENTATION, b"p:sldSz")?.into_iter().next().and_then(|attrs| {
            let width = attrs.get("cx")?.parse().ok()?;
            let height = attrs.get("cy")?.parse().ok()?;
            Some(SlideSize {
                width: Emu(width),
                height: Emu(height),
            })
        });

        Ok(size.unwrap_or_else(|| {
            warn!("template has no usable slide size, assuming 16:9");
            SlideSize::WIDESCREEN
        }))
    }

    /// Follow the `r:id` references of `list_tag` entries in `source` to part names
    fn referenced_parts(&self, source: &str, list_tag: &[u8], kind: &str) -> Result<Vec<String>, RenderError> {
        let rels = self.relationships(source)?;
        let xml = self.part_str(source)?;
        elements(xml, source, list_tag)?
            .into_iter()
            .map(|attrs| {
                let id = attrs.get("r:id").cloned().unwrap_or_default();
                rels.iter()
                    .find(|rel| rel.id == id && rel.kind == kind)
                    .map(|rel| resolve_target(source, &rel.target))
                    .ok_or_else(|| RenderError::Template(format!("{} references unknown relationship '{}'", source, id)))
            })
            .collect()
    }

    /// Slide master part names in presentation order
    pub fn masters(&self) -> Result<Vec<String>, RenderError> {
        self.referenced_parts(PRESENTATION, b"p:sldMasterId", REL_SLIDE_MASTER)
    }

    /// Layout part names of one master, in the master's order
    pub fn layouts(&self, master: usize) -> Result<Vec<String>, RenderError> {
        let masters = self.masters()?;
        let master_part = masters.get(master).ok_or_else(|| {
            RenderError::Template(format!(
                "slide master {} not found (template has {})",
                master,
                masters.len()
            ))
        })?;
        self.referenced_parts(master_part, b"p:sldLayoutId", REL_SLIDE_LAYOUT)
    }

    /// Resolve one layout and read its placeholders
    pub fn layout(&self, master: usize, index: usize) -> Result<LayoutPart, RenderError> {
        let layouts = self.layouts(master)?;
        let part = layouts.get(index).cloned().ok_or_else(|| {
            RenderError::Template(format!(
                "layout {} not found on slide master {} (master has {})",
                index,
                master,
                layouts.len()
            ))
        })?;

        let xml = self.part_str(&part)?;
        let name = elements(xml, &part, b"p:cSld")?
            .into_iter()
            .next()
            .and_then(|mut attrs| attrs.remove("name"));

        let mut title = None;
        let mut placeholders = BTreeMap::new();
        for mut ph in elements(xml, &part, b"p:ph")? {
            let idx = ph.get("idx").and_then(|idx| idx.parse::<u32>().ok());
            match ph.remove("type") {
                Some(kind) if kind == "title" || kind == "ctrTitle" => title = Some(kind),
                kind => {
                    if let Some(idx) = idx {
                        placeholders.insert(idx, kind);
                    }
                }
            }
        }

        debug!(part = %part, name = ?name, placeholders = placeholders.len(), "layout resolved");
        Ok(LayoutPart {
            part,
            name,
            title,
            placeholders,
        })
    }

    /// Pack every part into a `.pptx`
    pub fn to_bytes(&self) -> Result<Vec<u8>, RenderError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let zip_error = |e: zip::result::ZipError| RenderError::Format(format!("Failed to write PPTX: {}", e));

        // Content types first, as Office writes them
        let ordered = self
            .parts
            .iter()
            .filter(|(name, _)| name.as_str() == CONTENT_TYPES)
            .chain(self.parts.iter().filter(|(name, _)| name.as_str() != CONTENT_TYPES));
        for (name, content) in ordered {
            writer.start_file(name.as_str(), options).map_err(zip_error)?;
            writer.write_all(content)?;
        }

        Ok(writer.finish().map_err(zip_error)?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_slide_size_is_widescreen() {
        assert_eq!(TemplatePackage::builtin().slide_size().unwrap(), SlideSize::WIDESCREEN);
    }

    #[test]
    fn builtin_layouts_resolve() {
        let package = TemplatePackage::builtin();
        assert_eq!(package.masters().unwrap(), vec!["ppt/slideMasters/slideMaster1.xml"]);
        assert_eq!(package.layouts(0).unwrap().len(), 9);

        let board = package.layout(0, 6).unwrap();
        assert_eq!(board.part, "ppt/slideLayouts/slideLayout7.xml");
        assert_eq!(board.name.as_deref(), Some("Three Column Board"));
        assert_eq!(board.title.as_deref(), Some("title"));
        assert_eq!(board.placeholders.keys().copied().collect::<Vec<_>>(), vec![27, 29, 31]);
        assert_eq!(board.placeholders[&27].as_deref(), Some("body"));
    }

    #[test]
    fn layout_map_indices() {
        let builtin = LayoutMap::builtin();
        let package = TemplatePackage::builtin();
        for layout in [
            SlideLayout::Section,
            SlideLayout::TitleOnly,
            SlideLayout::ThreeColumn,
            SlideLayout::DocumentBoard,
            SlideLayout::ProjectDetail,
        ] {
            assert!(package.layout(builtin.master, builtin.index(layout)).is_ok());
        }
        assert_eq!(LayoutMap::default().index(SlideLayout::DocumentBoard), 7);
    }

    #[test]
    fn missing_master_is_a_template_error() {
        let err = TemplatePackage::builtin().layout(1, 3).unwrap_err();
        assert_eq!(err.to_string(), "Invalid template: slide master 1 not found (template has 1)");

        let err = TemplatePackage::builtin().layout(0, 12).unwrap_err();
        assert!(err.to_string().contains("layout 12 not found"));
    }

    #[test]
    fn packs_and_unpacks() {
        let package = TemplatePackage::builtin();
        let bytes = package.to_bytes().unwrap();
        assert_eq!(&bytes[0..2], b"PK");
        assert_eq!(TemplatePackage::from_bytes(&bytes).unwrap(), package);
    }

    #[test]
    fn rejects_non_presentations() {
        let err = TemplatePackage::from_bytes(b"not a zip").unwrap_err();
        assert!(matches!(err, RenderError::Template(_)));
    }
}
