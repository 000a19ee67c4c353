//! End-to-end tests over synthesized .pptx archives.

use deck_core::{
    pipeline, store, AnalysisPaths, Category, Classifier, KeyInformation, ReportRenderer,
};
use deck_pptx::{Extractor, PptxParser};
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
const SLIDE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

/// A text shape on a test slide.
enum Shape<'a> {
    Title(&'a str),
    Body(&'a [&'a str]),
}

fn shape_xml(shape: &Shape<'_>) -> String {
    let (placeholder, paragraphs): (&str, Vec<&str>) = match shape {
        Shape::Title(text) => (r#"<p:ph type="title"/>"#, vec![*text]),
        Shape::Body(paragraphs) => ("", paragraphs.to_vec()),
    };
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", p))
        .collect();
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Shape\"/><p:cNvSpPr/><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/>{}</p:txBody></p:sp>",
        placeholder, body
    )
}

/// Build a .pptx archive whose slides are listed in the given order.
fn build_pptx(slides: &[Vec<Shape<'_>>]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    let mut ids = String::new();
    let mut rels = String::new();
    for (i, shapes) in slides.iter().enumerate() {
        let n = i + 1;
        ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n + 1));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
            n + 1,
            SLIDE_REL,
            n
        ));

        let tree: String = shapes.iter().map(shape_xml).collect();
        zip.start_file(format!("ppt/slides/slide{}.xml", n), options)
            .unwrap();
        write!(
            zip,
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
            NS, tree
        )
        .unwrap();
    }

    zip.start_file("ppt/presentation.xml", options).unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {}><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
        NS, ids
    )
    .unwrap();

    zip.start_file("ppt/_rels/presentation.xml.rels", options)
        .unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>{}</Relationships>"#,
        rels
    )
    .unwrap();

    zip.finish().unwrap().into_inner()
}

fn write_deck(dir: &Path, name: &str, slides: &[Vec<Shape<'_>>]) {
    std::fs::write(dir.join(name), build_pptx(slides)).unwrap();
}

#[test]
fn test_parse_slide_numbers_and_title() {
    let bytes = build_pptx(&[
        vec![
            Shape::Title("Our Team"),
            Shape::Body(&["We have 10 experts"]),
            Shape::Body(&["  Founded in 2015  "]),
        ],
        vec![Shape::Body(&["   "])],
        vec![Shape::Body(&["No title here"])],
    ]);

    let deck = PptxParser::new()
        .parse(Cursor::new(bytes), "Deck1.pptx")
        .unwrap();

    assert_eq!(deck.len(), 3);
    let numbers: Vec<usize> = deck.slides().iter().map(|s| s.slide_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let first = &deck.slides()[0];
    assert_eq!(first.slide_title, "Our Team");
    assert_eq!(
        first.slide_content,
        vec!["Our Team", "We have 10 experts", "Founded in 2015"]
    );

    assert!(!deck.slides()[1].has_text());
    assert_eq!(deck.slides()[2].slide_title, "");
    assert_eq!(deck.slides()[2].slide_content, vec!["No title here"]);
}

#[test]
fn test_title_is_not_trimmed() {
    let bytes = build_pptx(&[vec![Shape::Title(" Padded Title ")]]);
    let deck = PptxParser::new().parse(Cursor::new(bytes), "d.pptx").unwrap();

    let slide = &deck.slides()[0];
    assert_eq!(slide.slide_title, " Padded Title ");
    assert_eq!(slide.slide_content, vec!["Padded Title"]);
}

#[test]
fn test_multi_paragraph_shape() {
    let bytes = build_pptx(&[vec![Shape::Body(&["First line", "Second line"])]]);
    let deck = PptxParser::new().parse(Cursor::new(bytes), "d.pptx").unwrap();
    assert_eq!(
        deck.slides()[0].slide_content,
        vec!["First line\nSecond line"]
    );
}

#[test]
fn test_missing_slide_part_fails() {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    zip.start_file("ppt/presentation.xml", options).unwrap();
    write!(
        zip,
        r#"<p:presentation {}><p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst></p:presentation>"#,
        NS
    )
    .unwrap();
    zip.start_file("ppt/_rels/presentation.xml.rels", options)
        .unwrap();
    write!(
        zip,
        r#"<Relationships><Relationship Id="rId2" Type="{}" Target="slides/slide1.xml"/></Relationships>"#,
        SLIDE_REL
    )
    .unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let err = PptxParser::new()
        .parse(Cursor::new(bytes), "d.pptx")
        .unwrap_err();
    assert!(matches!(err, deck_core::Error::MissingPart(_)));
}

#[test]
fn test_slide_order_without_id_list() {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    let mut rels = String::new();
    for (rel_id, n, title) in [("rId7", 10, "Ten"), ("rId3", 2, "Two"), ("rId9", 1, "One")] {
        rels.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="slides/slide{}.xml"/>"#,
            rel_id, SLIDE_REL, n
        ));
        zip.start_file(format!("ppt/slides/slide{}.xml", n), options)
            .unwrap();
        write!(
            zip,
            r#"<p:sld {}><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#,
            NS,
            shape_xml(&Shape::Title(title))
        )
        .unwrap();
    }

    zip.start_file("ppt/presentation.xml", options).unwrap();
    write!(zip, r#"<p:presentation {}/>"#, NS).unwrap();
    zip.start_file("ppt/_rels/presentation.xml.rels", options)
        .unwrap();
    write!(zip, r#"<Relationships>{}</Relationships>"#, rels).unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let deck = PptxParser::new()
        .parse(Cursor::new(bytes), "d.pptx")
        .unwrap();

    let titles: Vec<&str> = deck
        .slides()
        .iter()
        .map(|s| s.slide_title.as_str())
        .collect();
    assert_eq!(titles, vec!["One", "Two", "Ten"]);
    let numbers: Vec<usize> = deck.slides().iter().map(|s| s.slide_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_extract_writes_outputs_in_sorted_order() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_deck(
        input.path(),
        "beta.pptx",
        &[vec![Shape::Title("Beta"), Shape::Body(&["Software platform"])]],
    );
    write_deck(input.path(), "Alpha.pptx", &[vec![Shape::Title("Alpha")]]);

    let paths = AnalysisPaths::new(input.path(), output.path());
    let summary = Extractor::new(paths.clone()).run().unwrap();

    assert!(summary.failures.is_empty());
    assert_eq!(summary.store.deck_count(), 2);

    let beta = store::load_deck(&output.path().join("beta_analysis.json")).unwrap();
    assert_eq!(beta.slides()[0].slide_content, vec!["Beta", "Software platform"]);
    assert!(output.path().join("Alpha_analysis.json").exists());

    let combined = store::load_combined(&paths.combined_path()).unwrap();
    assert_eq!(combined, summary.store);
    let names: Vec<&str> = combined.decks().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Alpha.pptx", "beta.pptx"]);
}

#[test]
fn test_corrupted_deck_is_skipped() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_deck(input.path(), "good.pptx", &[vec![Shape::Title("Our Team")]]);
    std::fs::write(input.path().join("corrupted.pptx"), b"PK\x03\x04garbage").unwrap();

    let paths = AnalysisPaths::new(input.path(), output.path());
    let summary = Extractor::new(paths.clone()).run().unwrap();

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].file_name, "corrupted.pptx");
    assert!(!summary.failures[0].reason.is_empty());

    let combined = store::load_combined(&paths.combined_path()).unwrap();
    assert_eq!(combined.deck_count(), 1);
    assert!(combined.get("good.pptx").is_some());
    assert!(combined.get("corrupted.pptx").is_none());
}

#[test]
fn test_full_pipeline_report() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_deck(
        input.path(),
        "Deck1.pptx",
        &[
            vec![
                Shape::Title("Our Team"),
                Shape::Body(&["We have 10 experts"]),
                Shape::Body(&["Founded in 2015"]),
            ],
            vec![],
        ],
    );

    let paths = AnalysisPaths::new(input.path(), output.path());
    Extractor::new(paths.clone()).run().unwrap();

    let info = pipeline::analyze(&paths, &Classifier::new(), &ReportRenderer::new()).unwrap();

    let team = info.matches(Category::TeamInformation);
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].slide_number, 1);
    assert_eq!(
        team[0].content,
        vec!["Our Team", "We have 10 experts", "Founded in 2015"]
    );

    let saved: KeyInformation = store::load_key_information(&paths.key_information_path()).unwrap();
    assert_eq!(saved, info);

    let again = Classifier::new().classify(&store::load_combined(&paths.combined_path()).unwrap());
    assert_eq!(again, info);

    let report = std::fs::read_to_string(paths.report_path()).unwrap();
    assert!(report.starts_with("# Jade Kite Business Analysis Summary\n\n"));
    assert!(report.contains(
        "## Team Information\n\n### From Deck1.pptx\n\n**Slide 1: Our Team**\n\n- Our Team\n- We have 10 experts\n- Founded in 2015\n\n"
    ));
    assert!(report.contains(
        "## Methodologies\n\nNo specific information found in the pitch decks.\n\n"
    ));
}
