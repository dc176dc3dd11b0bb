//! PDF export built directly with lopdf.
//!
//! Uses the built-in Helvetica faces with WinAnsiEncoding, so no font files
//! are embedded. That encoding cannot carry right-to-left scripts: those
//! locales are rejected and pointed at the HTML export.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::export::outline::{self, Block};
use crate::export::{ExportError, ReportDocument};
use crate::locale::TextDirection;

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

/// Font size, leading and wrap width (in characters) per block style.
struct Style {
    font: &'static str,
    size: i64,
    leading: i64,
    wrap: usize,
    space_after: i64,
}

const TITLE: Style = Style { font: BOLD, size: 18, leading: 24, wrap: 48, space_after: 10 };
const HEADING: Style = Style { font: BOLD, size: 14, leading: 20, wrap: 62, space_after: 4 };
const SUBHEADING: Style = Style { font: BOLD, size: 12, leading: 16, wrap: 72, space_after: 2 };
const BODY: Style = Style { font: REGULAR, size: 10, leading: 14, wrap: 92, space_after: 6 };
const LIST: Style = Style { font: REGULAR, size: 10, leading: 14, wrap: 86, space_after: 2 };

pub fn render(document: &ReportDocument<'_>) -> Result<Vec<u8>, ExportError> {
    if document.language.direction() == TextDirection::Rtl {
        return Err(ExportError::UnsupportedScript(
            document.language.display_name().to_string(),
        ));
    }

    let mut pages = PageWriter::default();
    for block in outline::build(document) {
        match block {
            Block::Title { text } => pages.write(&TITLE, &text, ""),
            Block::Heading { text } => {
                pages.gap(8);
                pages.write(&HEADING, &text, "");
            }
            Block::Subheading { text } => pages.write(&SUBHEADING, &text, ""),
            Block::Field { label, value } => {
                pages.write(&LIST, &format!("{label}: {value}"), "")
            }
            Block::Paragraph { text } => pages.write(&BODY, &text, ""),
            Block::Bullet { text } => pages.write(&LIST, &text, "\u{2022} "),
            Block::Numbered { index, text } => pages.write(&LIST, &text, &format!("{index}. ")),
        }
    }

    assemble(pages.finish())
}

/// Lays out lines top to bottom and starts a new page when one fills up.
struct PageWriter {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: i64,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }
}

impl PageWriter {
    fn gap(&mut self, points: i64) {
        self.y -= points;
    }

    /// Writes `text` wrapped to the style's width. `marker` prefixes the
    /// first line and later lines are indented to match.
    fn write(&mut self, style: &Style, text: &str, marker: &str) {
        let indent = marker.chars().count();
        for (i, line) in wrap(text, style.wrap.saturating_sub(indent)).into_iter().enumerate() {
            if self.y - style.leading < MARGIN {
                self.new_page();
            }
            self.y -= style.leading;
            let prefix = if i == 0 {
                marker.to_string()
            } else {
                " ".repeat(indent)
            };
            self.line(style, &format!("{prefix}{line}"));
        }
        self.y -= style.space_after;
    }

    fn line(&mut self, style: &Style, text: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![style.font.into(), style.size.into()]),
            Operation::new("Tm", integers([1, 0, 0, 1, MARGIN, self.y])),
            Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }
}

fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font = |doc: &mut Document, base: &str| -> ObjectId {
        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base,
            "Encoding" => "WinAnsiEncoding",
        })
    };
    let regular_id = font(&mut doc, "Helvetica");
    let bold_id = font(&mut doc, "Helvetica-Bold");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular_id,
            BOLD => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => integers([0, 0, PAGE_WIDTH, PAGE_HEIGHT]),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn integers<const N: usize>(values: [i64; N]) -> Vec<Object> {
    values.into_iter().map(Object::Integer).collect()
}

/// Greedy word wrap by character count. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = if line.is_empty() { 0 } else { 1 } + word.chars().count();
        if line.chars().count() + needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Encodes text for a WinAnsiEncoding font. Unmappable characters become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '\t' => b' ',
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            _ => b'?',
        })
        .collect()
}
