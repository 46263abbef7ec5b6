//! Built-in presentation template
//!
//! A single 16:9 master with nine layouts. Layouts 3, 5 and 6 sit at the
//! same indices as the corporate template; project details and release
//! boards get layouts of their own (7 and 8).

use std::collections::BTreeMap;

use deckgen_core::Emu;

use crate::xml::{
    CT_PRESENTATION, CT_PRES_PROPS, CT_RELATIONSHIPS, CT_SLIDE_LAYOUT, CT_SLIDE_MASTER, CT_TABLE_STYLES,
    CT_THEME, NS_A, NS_P, NS_PACKAGE_RELS, NS_R, REL_OFFICE_DOCUMENT, REL_PRES_PROPS, REL_SLIDE_LAYOUT,
    REL_SLIDE_MASTER, REL_TABLE_STYLES, REL_THEME, SHAPE_TREE_HEADER, XML_DECLARATION,
};

/// A placeholder on a built-in layout, geometry in centimetres
struct Placeholder {
    kind: &'static str,
    idx: Option<u32>,
    prompt: &'static str,
    rect: (f64, f64, f64, f64),
}

fn title() -> Placeholder {
    Placeholder {
        kind: "title",
        idx: None,
        prompt: "Click to add title",
        rect: (0.65, 0.4, 32.5, 1.5),
    }
}

fn body(idx: u32, prompt: &'static str, rect: (f64, f64, f64, f64)) -> Placeholder {
    Placeholder {
        kind: "body",
        idx: Some(idx),
        prompt,
        rect,
    }
}

fn layouts() -> Vec<(&'static str, Vec<Placeholder>)> {
    vec![
        (
            "Title Slide",
            vec![
                Placeholder {
                    kind: "ctrTitle",
                    idx: None,
                    prompt: "Click to add title",
                    rect: (4.2, 5.6, 25.4, 4.0),
                },
                Placeholder {
                    kind: "subTitle",
                    idx: Some(1),
                    prompt: "Click to add subtitle",
                    rect: (4.2, 10.0, 25.4, 2.8),
                },
            ],
        ),
        ("Title and Content", vec![title(), body(1, "Text", (0.65, 2.2, 32.5, 16.0))]),
        (
            "Two Content",
            vec![
                title(),
                body(1, "Text", (0.65, 2.2, 16.0, 16.0)),
                body(2, "Text", (17.2, 2.2, 16.0, 16.0)),
            ],
        ),
        (
            "Section Header",
            vec![Placeholder {
                kind: "title",
                idx: None,
                prompt: "Section title",
                rect: (2.0, 7.5, 29.8, 3.0),
            }],
        ),
        ("Blank", Vec::new()),
        ("Title Only", vec![title()]),
        (
            "Three Column Board",
            vec![
                title(),
                body(27, "Column 1", (0.65, 2.2, 13.0, 1.0)),
                body(29, "Column 2", (14.82, 2.2, 9.0, 1.0)),
                body(31, "Column 3", (24.33, 2.2, 9.0, 1.0)),
            ],
        ),
        (
            "Project Detail",
            vec![
                title(),
                body(10, "Summary", (0.65, 2.1, 32.5, 1.6)),
                body(26, "Left heading", (0.65, 4.0, 16.0, 0.9)),
                body(24, "Left text", (0.65, 5.0, 16.0, 13.5)),
                body(28, "Right heading", (17.2, 4.0, 16.0, 0.9)),
                body(27, "Right text", (17.2, 5.0, 16.0, 13.5)),
            ],
        ),
        (
            "Release Board",
            vec![
                title(),
                body(27, "Board heading", (0.65, 2.3, 20.0, 1.2)),
                body(28, "Release group", (21.0, 2.3, 12.2, 1.2)),
            ],
        ),
    ]
}

fn emu(cm: f64) -> i64 {
    Emu::cm(cm).value()
}

fn relationships(entries: &[(String, &str, String)]) -> String {
    let mut xml = format!("{}<Relationships xmlns=\"{}\">", XML_DECLARATION, NS_PACKAGE_RELS);
    for (id, kind, target) in entries {
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>",
            id, kind, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn placeholder_shape(id: usize, ph: &Placeholder) -> String {
    let (left, top, width, height) = ph.rect;
    let idx = ph.idx.map(|i| format!(" idx=\"{}\"", i)).unwrap_or_default();
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{prompt}\"/><p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph type=\"{kind}\"{idx}/></p:nvPr></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang=\"en-GB\"/><a:t>{prompt}</a:t></a:r></a:p></p:txBody></p:sp>",
        id = id,
        prompt = ph.prompt,
        kind = ph.kind,
        idx = idx,
        x = emu(left),
        y = emu(top),
        cx = emu(width),
        cy = emu(height),
    )
}

fn layout_xml(name: &str, placeholders: &[Placeholder]) -> String {
    let shapes: String = placeholders
        .iter()
        .enumerate()
        .map(|(i, ph)| placeholder_shape(i + 2, ph))
        .collect();
    format!(
        "{decl}<p:sldLayout xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\" preserve=\"1\">\
         <p:cSld name=\"{name}\"><p:spTree>{header}{shapes}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>",
        decl = XML_DECLARATION,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        name = name,
        header = SHAPE_TREE_HEADER,
        shapes = shapes,
    )
}

fn master_xml(layout_count: usize) -> String {
    let layout_ids: String = (0..layout_count)
        .map(|i| {
            format!(
                "<p:sldLayoutId id=\"{}\" r:id=\"rId{}\"/>",
                2_147_483_649_u64 + i as u64,
                i + 1
            )
        })
        .collect();
    let shapes = placeholder_shape(2, &title()) + &placeholder_shape(3, &body(1, "Text", (0.65, 2.2, 32.5, 16.0)));

    format!(
        "{decl}<p:sldMaster xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\">\
         <p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>\
         <p:spTree>{header}{shapes}</p:spTree></p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" \
         accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst>{layout_ids}</p:sldLayoutIdLst>\
         <p:txStyles>\
         <p:titleStyle><a:lvl1pPr><a:defRPr sz=\"2800\"><a:solidFill><a:schemeClr val=\"tx1\"/></a:solidFill>\
         <a:latin typeface=\"+mj-lt\"/></a:defRPr></a:lvl1pPr></p:titleStyle>\
         <p:bodyStyle><a:lvl1pPr><a:defRPr sz=\"1400\"><a:solidFill><a:schemeClr val=\"tx1\"/></a:solidFill>\
         <a:latin typeface=\"+mn-lt\"/></a:defRPr></a:lvl1pPr></p:bodyStyle>\
         <p:otherStyle><a:lvl1pPr><a:defRPr/></a:lvl1pPr></p:otherStyle>\
         </p:txStyles></p:sldMaster>",
        decl = XML_DECLARATION,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        header = SHAPE_TREE_HEADER,
        shapes = shapes,
        layout_ids = layout_ids,
    )
}

fn theme_xml() -> String {
    let colours = [
        ("dk1", "000000"),
        ("lt1", "FFFFFF"),
        ("dk2", "44546A"),
        ("lt2", "E7E6E6"),
        ("accent1", "00A19A"),
        ("accent2", "F28C28"),
        ("accent3", "2E75B6"),
        ("accent4", "70AD47"),
        ("accent5", "E6007E"),
        ("accent6", "7030A0"),
        ("hlink", "0563C1"),
        ("folHlink", "954F72"),
    ];
    let scheme: String = colours
        .iter()
        .map(|(slot, rgb)| format!("<a:{slot}><a:srgbClr val=\"{rgb}\"/></a:{slot}>", slot = slot, rgb = rgb))
        .collect();
    let solid = "<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>";
    let lines: String = [6350, 12700, 19050]
        .iter()
        .map(|w| format!("<a:ln w=\"{}\">{}</a:ln>", w, solid))
        .collect();

    format!(
        "{decl}<a:theme xmlns:a=\"{a}\" name=\"deckgen\"><a:themeElements>\
         <a:clrScheme name=\"deckgen\">{scheme}</a:clrScheme>\
         <a:fontScheme name=\"deckgen\">\
         <a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"deckgen\">\
         <a:fillStyleLst>{solid}{solid}{solid}</a:fillStyleLst>\
         <a:lnStyleLst>{lines}</a:lnStyleLst>\
         <a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle>\
         <a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>\
         <a:bgFillStyleLst>{solid}{solid}{solid}</a:bgFillStyleLst>\
         </a:fmtScheme></a:themeElements></a:theme>",
        decl = XML_DECLARATION,
        a = NS_A,
        scheme = scheme,
        solid = solid,
        lines = lines,
    )
}

fn content_types(layout_count: usize) -> String {
    let mut overrides = vec![
        ("/ppt/presentation.xml".to_string(), CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml".to_string(), CT_SLIDE_MASTER),
        ("/ppt/theme/theme1.xml".to_string(), CT_THEME),
        ("/ppt/presProps.xml".to_string(), CT_PRES_PROPS),
        ("/ppt/tableStyles.xml".to_string(), CT_TABLE_STYLES),
    ];
    for i in 1..=layout_count {
        overrides.push((format!("/ppt/slideLayouts/slideLayout{}.xml", i), CT_SLIDE_LAYOUT));
    }

    let mut xml = format!(
        "{}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"{}\"/><Default Extension=\"xml\" ContentType=\"application/xml\"/>",
        XML_DECLARATION, CT_RELATIONSHIPS
    );
    for (name, kind) in overrides {
        xml.push_str(&format!("<Override PartName=\"{}\" ContentType=\"{}\"/>", name, kind));
    }
    xml.push_str("</Types>");
    xml
}

/// Every part of the built-in package
pub fn parts() -> BTreeMap<String, Vec<u8>> {
    let layouts = layouts();
    let mut parts = BTreeMap::new();
    let mut add = |name: &str, xml: String| {
        parts.insert(name.to_string(), xml.into_bytes());
    };

    add("[Content_Types].xml", content_types(layouts.len()));
    add(
        "_rels/.rels",
        relationships(&[("rId1".into(), REL_OFFICE_DOCUMENT, "ppt/presentation.xml".into())]),
    );
    add(
        "ppt/presentation.xml",
        format!(
            "{decl}<p:presentation xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\" saveSubsetFonts=\"1\">\
             <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
             <p:sldSz cx=\"12192000\" cy=\"6858000\"/><p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
             </p:presentation>",
            decl = XML_DECLARATION,
            a = NS_A,
            r = NS_R,
            p = NS_P,
        ),
    );
    add(
        "ppt/_rels/presentation.xml.rels",
        relationships(&[
            ("rId1".into(), REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml".into()),
            ("rId2".into(), REL_THEME, "theme/theme1.xml".into()),
            ("rId3".into(), REL_PRES_PROPS, "presProps.xml".into()),
            ("rId4".into(), REL_TABLE_STYLES, "tableStyles.xml".into()),
        ]),
    );
    add(
        "ppt/presProps.xml",
        format!(
            "{}<p:presentationPr xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\"/>",
            XML_DECLARATION, NS_A, NS_R, NS_P
        ),
    );
    add(
        "ppt/tableStyles.xml",
        format!(
            "{}<a:tblStyleLst xmlns:a=\"{}\" def=\"{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}\"/>",
            XML_DECLARATION, NS_A
        ),
    );
    add("ppt/theme/theme1.xml", theme_xml());
    add("ppt/slideMasters/slideMaster1.xml", master_xml(layouts.len()));

    let mut master_rels: Vec<(String, &str, String)> = (1..=layouts.len())
        .map(|i| {
            (
                format!("rId{}", i),
                REL_SLIDE_LAYOUT,
                format!("../slideLayouts/slideLayout{}.xml", i),
            )
        })
        .collect();
    master_rels.push((format!("rId{}", layouts.len() + 1), REL_THEME, "../theme/theme1.xml".into()));
    add("ppt/slideMasters/_rels/slideMaster1.xml.rels", relationships(&master_rels));

    for (i, (name, placeholders)) in layouts.iter().enumerate() {
        add(&format!("ppt/slideLayouts/slideLayout{}.xml", i + 1), layout_xml(name, placeholders));
        add(
            &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", i + 1),
            relationships(&[("rId1".into(), REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml".into())]),
        );
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::elements;

    #[test]
    fn every_part_is_well_formed() {
        for (name, bytes) in parts() {
            let xml = std::str::from_utf8(&bytes).unwrap();
            elements(xml, &name, b"never-present").unwrap();
        }
    }

    #[test]
    fn master_lists_every_layout() {
        let parts = parts();
        let master = std::str::from_utf8(&parts["ppt/slideMasters/slideMaster1.xml"]).unwrap();
        let ids = elements(master, "master", b"p:sldLayoutId").unwrap();
        assert_eq!(ids.len(), 9);
        assert!(parts.contains_key("ppt/slideLayouts/slideLayout9.xml"));
        assert!(!parts.contains_key("ppt/slideLayouts/slideLayout10.xml"));
    }

    #[test]
    fn three_column_layout_placeholders() {
        let parts = parts();
        let layout = std::str::from_utf8(&parts["ppt/slideLayouts/slideLayout7.xml"]).unwrap();
        let idx: Vec<String> = elements(layout, "layout", b"p:ph")
            .unwrap()
            .into_iter()
            .filter_map(|ph| ph.get("idx").cloned())
            .collect();
        assert_eq!(idx, vec!["27", "29", "31"]);
    }
}
