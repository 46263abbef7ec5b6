//! PPTX packages re-opened and inspected part by part

use deckgen_core::{Button, ButtonStyle, Deck, Emu, RenderError, Renderer, Slide, SlideLayout, StagingColumns};
use deckgen_render::{LayoutMap, PptxRenderer, TemplatePackage};
use pretty_assertions::assert_eq;

fn part(package: &TemplatePackage, name: &str) -> String {
    String::from_utf8(package.part(name).unwrap().to_vec()).unwrap()
}

fn sample_deck() -> Deck {
    let mut deck = Deck::new();
    deck.push(Slide::section("Impacted Teams"));

    let mut grid = Slide::new(SlideLayout::TitleOnly, "Ada Lovelace - 1");
    grid.buttons.push(Button::styled(
        &ButtonStyle::project_card(),
        Emu::cm(0.65),
        Emu::cm(2.0),
        "Open",
        "Fibre Trial\nObjective: Cost",
    ));
    deck.push(grid);

    let mut board = Slide::new(SlideLayout::ThreeColumn, "Training - 1");
    for (idx, heading) in StagingColumns::HEADINGS {
        board = board.placeholder(idx, heading);
    }
    deck.push(board);

    deck.push(
        Slide::new(SlideLayout::DocumentBoard, "Technical Releases")
            .placeholder(27, "New Documents")
            .placeholder(28, "BDUK - P1"),
    );
    deck.push(
        Slide::new(SlideLayout::ProjectDetail, "Fibre Trial")
            .placeholder(10, "Project Summary: Trial new fibre")
            .placeholder(24, "Survey booked."),
    );
    deck
}

#[test]
fn builtin_template_receives_every_slide() {
    let bytes = PptxRenderer::new().render(&sample_deck()).unwrap();
    let package = TemplatePackage::from_bytes(&bytes).unwrap();

    for n in 1..=5 {
        assert!(package.part(&format!("ppt/slides/slide{}.xml", n)).is_some());
        assert!(package.part(&format!("ppt/slides/_rels/slide{}.xml.rels", n)).is_some());
    }
    assert!(package.part("ppt/slides/slide6.xml").is_none());

    let presentation = part(&package, "ppt/presentation.xml");
    assert!(presentation.contains("<p:sldId id=\"256\" r:id=\"rId5\"/>"));
    assert!(presentation.contains("<p:sldId id=\"260\" r:id=\"rId9\"/>"));
    assert!(presentation.find("</p:sldIdLst>").unwrap() < presentation.find("<p:sldSz").unwrap());

    let rels = package.relationships("ppt/presentation.xml").unwrap();
    let slide_targets: Vec<&str> = rels
        .iter()
        .filter(|rel| rel.kind.ends_with("/slide"))
        .map(|rel| rel.target.as_str())
        .collect();
    assert_eq!(
        slide_targets,
        vec![
            "slides/slide1.xml",
            "slides/slide2.xml",
            "slides/slide3.xml",
            "slides/slide4.xml",
            "slides/slide5.xml"
        ]
    );

    let content_types = part(&package, "[Content_Types].xml");
    assert!(content_types.contains("PartName=\"/ppt/slides/slide3.xml\""));
}

#[test]
fn slides_reference_mapped_layouts() {
    let bytes = PptxRenderer::new().render(&sample_deck()).unwrap();
    let package = TemplatePackage::from_bytes(&bytes).unwrap();

    let layout_of = |n: usize| {
        package
            .relationships(&format!("ppt/slides/slide{}.xml", n))
            .unwrap()
            .remove(0)
            .target
    };
    assert_eq!(layout_of(1), "../slideLayouts/slideLayout4.xml");
    assert_eq!(layout_of(2), "../slideLayouts/slideLayout6.xml");
    assert_eq!(layout_of(3), "../slideLayouts/slideLayout7.xml");
    assert_eq!(layout_of(4), "../slideLayouts/slideLayout9.xml");
    assert_eq!(layout_of(5), "../slideLayouts/slideLayout8.xml");
}

#[test]
fn slide_content() {
    let bytes = PptxRenderer::new().render(&sample_deck()).unwrap();
    let package = TemplatePackage::from_bytes(&bytes).unwrap();

    let grid = part(&package, "ppt/slides/slide2.xml");
    assert!(grid.contains("<a:t>Ada Lovelace - 1</a:t>"));
    assert!(grid.contains("prst=\"roundRect\""));
    assert!(grid.contains("<a:schemeClr val=\"accent5\"><a:lumMod val=\"50000\"/></a:schemeClr>"));
    assert!(grid.contains("b=\"1\" dirty=\"0\"><a:solidFill><a:schemeClr val=\"bg1\"></a:schemeClr></a:solidFill></a:rPr><a:t>Fibre Trial</a:t>"));

    let board = part(&package, "ppt/slides/slide3.xml");
    assert!(board.contains("<p:ph type=\"body\" idx=\"29\"/>"));
    assert!(board.contains("<a:t>Preparing Release:</a:t>"));
}

#[test]
fn rendered_deck_can_serve_as_template() {
    let first = PptxRenderer::new().render(&sample_deck()).unwrap();
    let template = TemplatePackage::from_bytes(&first).unwrap();

    let mut follow_up = Deck::new();
    follow_up.push(Slide::section("Commercial Impacts"));
    follow_up.push(Slide::new(SlideLayout::TitleOnly, "Open Tickets - 0"));

    let second = PptxRenderer::with_template(template)
        .layouts(LayoutMap::builtin())
        .render(&follow_up)
        .unwrap();
    let package = TemplatePackage::from_bytes(&second).unwrap();

    assert!(package.part("ppt/slides/slide1.xml").is_some());
    assert!(package.part("ppt/slides/slide7.xml").is_some());
    let presentation = part(&package, "ppt/presentation.xml");
    assert!(presentation.contains("<p:sldId id=\"261\" r:id=\"rId10\"/>"));
    assert!(presentation.contains("<p:sldId id=\"262\" r:id=\"rId11\"/>"));
    assert_eq!(presentation.matches("<p:sldIdLst>").count(), 1);
}

#[test]
fn template_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Template.pptx");
    std::fs::write(&path, TemplatePackage::builtin().to_bytes().unwrap()).unwrap();

    let template = TemplatePackage::open(&path).unwrap();
    let renderer = PptxRenderer::with_template(template).layouts(LayoutMap::builtin());
    assert_eq!(renderer.slide_size().unwrap().width, Emu(12_192_000));
    assert!(renderer.render(&sample_deck()).is_ok());
}

#[test]
fn corporate_layout_map_needs_second_master() {
    let renderer = PptxRenderer::with_template(TemplatePackage::builtin());
    let err = renderer.render(&sample_deck()).unwrap_err();
    assert!(matches!(err, RenderError::Template(_)));
    assert!(err.to_string().contains("slide master 1 not found"));
}

#[test]
fn missing_template_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = TemplatePackage::open(&dir.path().join("absent.pptx")).unwrap_err();
    assert!(err.to_string().contains("absent.pptx"));
}
