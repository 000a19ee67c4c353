//! PPTX file parser implementation.

use deck_core::{DeckRecord, Error, Result, SlideRecord};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
const SLIDE_REL_TYPE_SUFFIX: &str = "/slide";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Open and parse a PPTX file from disk.
    pub fn parse_file(&self, path: &Path) -> Result<DeckRecord> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        self.parse(BufReader::new(file), file_name)
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, file_name: &str) -> Result<DeckRecord> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut deck = DeckRecord::new();

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("{}: {} slides", file_name, slide_order.len());

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            deck.push_slide(slide);
        }

        Ok(deck)
    }

    /// Get the ordered list of slide part paths.
    ///
    /// The slide id list in presentation.xml is authoritative. Packages
    /// without one fall back to slide relationships ordered by number.
    fn get_slide_order<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
    ) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, PRESENTATION_RELS_PART)?;
        let slide_rels: Vec<Relationship> = parse_relationships(&rels_content)?
            .into_iter()
            .filter(|rel| rel.rel_type.ends_with(SLIDE_REL_TYPE_SUFFIX))
            .collect();

        let presentation = self.read_file_from_archive(archive, PRESENTATION_PART)?;
        let slide_ids = parse_slide_id_list(&presentation)?;

        if !slide_ids.is_empty() {
            return slide_ids
                .iter()
                .map(|rel_id| {
                    slide_rels
                        .iter()
                        .find(|rel| &rel.id == rel_id)
                        .map(|rel| resolve_target(&rel.target))
                        .ok_or_else(|| {
                            Error::MissingPart(format!("slide relationship '{}'", rel_id))
                        })
                })
                .collect();
        }

        log::debug!("No slide id list in presentation.xml, ordering by relationship");
        let mut slides: Vec<(String, Option<usize>)> = slide_rels
            .iter()
            .map(|rel| {
                let order_num =
                    extract_slide_number(&rel.target).or_else(|| extract_slide_number(&rel.id));
                (resolve_target(&rel.target), order_num)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<SlideRecord> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let shapes = self
            .extract_shapes_from_xml(&content)
            .map_err(|e| Error::XmlError(format!("{}: {}", slide_path, e)))?;

        let mut slide = SlideRecord::new(slide_number);

        if let Some(title) = shapes.iter().find(|s| s.is_title()) {
            if !title.text.is_empty() {
                slide.slide_title = title.text.clone();
            }
        }

        for shape in &shapes {
            slide.add_content(&shape.text);
        }

        Ok(slide)
    }

    /// Extract top-level text shapes from slide XML, in document order.
    ///
    /// Only shapes that are direct children of `p:spTree` count. Shapes
    /// nested in groups or `mc:AlternateContent` are skipped, as are
    /// pictures, graphic frames and connectors.
    fn extract_shapes_from_xml(
        &self,
        xml_content: &str,
    ) -> std::result::Result<Vec<ShapeInfo>, String> {
        let mut shapes = Vec::new();
        let mut reader = Reader::from_str(xml_content);

        // Number of open elements, and the depth of the shape tree itself.
        let mut depth = 0usize;
        let mut sp_tree_depth: Option<usize> = None;
        let mut current_shape: Option<ShapeInfo> = None;
        let mut in_text_body = false;
        let mut in_paragraph = false;
        let mut in_run_text = false;
        let mut paragraph_count = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let parent_depth = depth;
                    depth += 1;

                    let name = e.name();
                    match local_name(name.as_ref()) {
                        b"spTree" => sp_tree_depth = Some(depth),
                        b"sp" if sp_tree_depth == Some(parent_depth) => {
                            current_shape = Some(ShapeInfo::default());
                            paragraph_count = 0;
                        }
                        b"ph" => {
                            if let Some(ref mut shape) = current_shape {
                                shape.placeholder_idx = Some(placeholder_idx(e));
                            }
                        }
                        b"txBody" if current_shape.is_some() => {
                            in_text_body = true;
                        }
                        b"p" if in_text_body => {
                            in_paragraph = true;
                            start_paragraph(&mut current_shape, &mut paragraph_count);
                        }
                        b"t" if in_paragraph => {
                            in_run_text = true;
                        }
                        b"br" if in_paragraph => {
                            push_text(&mut current_shape, "\n");
                        }
                        _ => {}
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name = e.name();
                    match local_name(name.as_ref()) {
                        b"ph" => {
                            if let Some(ref mut shape) = current_shape {
                                shape.placeholder_idx = Some(placeholder_idx(e));
                            }
                        }
                        b"p" if in_text_body => {
                            start_paragraph(&mut current_shape, &mut paragraph_count);
                        }
                        b"br" if in_paragraph => {
                            push_text(&mut current_shape, "\n");
                        }
                        _ => {}
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if in_run_text {
                        let text = e.unescape().map_err(|err| err.to_string())?;
                        push_text(&mut current_shape, &text);
                    }
                }
                Ok(Event::End(ref e)) => {
                    depth = depth.saturating_sub(1);

                    let name = e.name();
                    match local_name(name.as_ref()) {
                        b"spTree" => sp_tree_depth = None,
                        b"sp" => {
                            if let Some(shape) = current_shape.take() {
                                shapes.push(shape);
                            }
                            in_text_body = false;
                            in_paragraph = false;
                            in_run_text = false;
                        }
                        b"txBody" => in_text_body = false,
                        b"p" => in_paragraph = false,
                        b"t" => in_run_text = false,
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(format!("at position {}: {}", reader.buffer_position(), e));
                }
                _ => {}
            }
        }

        Ok(shapes)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive.by_name(path).map_err(|e| match e {
            ZipError::FileNotFound => Error::MissingPart(path.to_string()),
            e => Error::ZipError(format!("Failed to open '{}': {}", path, e)),
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A top-level shape with its text.
#[derive(Debug, Default)]
struct ShapeInfo {
    /// Paragraph text joined with newlines, untrimmed.
    text: String,
    /// Placeholder index if the shape is a placeholder.
    placeholder_idx: Option<u32>,
}

impl ShapeInfo {
    /// Title placeholders are the ones at index 0.
    fn is_title(&self) -> bool {
        self.placeholder_idx == Some(0)
    }
}

/// An entry from a relationships part.
#[derive(Debug)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

fn start_paragraph(shape: &mut Option<ShapeInfo>, paragraph_count: &mut usize) {
    if *paragraph_count > 0 {
        push_text(shape, "\n");
    }
    *paragraph_count += 1;
}

fn push_text(shape: &mut Option<ShapeInfo>, text: &str) {
    if let Some(shape) = shape {
        shape.text.push_str(text);
    }
}

/// Read the `idx` attribute of a `p:ph` element. Absent means 0.
fn placeholder_idx(e: &BytesStart<'_>) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"idx")
        .and_then(|attr| String::from_utf8_lossy(&attr.value).parse().ok())
        .unwrap_or(0)
}

/// Parse every `Relationship` element of a `.rels` part.
fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut rels = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                };

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        _ => {}
                    }
                }

                rels.push(rel);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(rels)
}

/// Relationship ids of `p:sldId` entries, in presentation order.
fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                // `id` is the numeric slide id; the prefixed `r:id` is the relationship.
                let rel_id = e
                    .attributes()
                    .flatten()
                    .find(|attr| {
                        attr.key.as_ref() != b"id" && local_name(attr.key.as_ref()) == b"id"
                    })
                    .map(|attr| String::from_utf8_lossy(&attr.value).to_string());

                if let Some(rel_id) = rel_id {
                    ids.push(rel_id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Turn a relationship target from `ppt/_rels` into an archive path.
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else {
        format!("ppt/{}", target)
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slides/slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
