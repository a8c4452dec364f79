//! Paginated A4 writer turning a [`Report`] into PDF bytes with `lopdf`.
//!
//! Layout happens in two passes: blocks are first placed on pages as draw commands,
//! then every page is encoded once the total page count is known.

use lopdf::{
    Document, Object, Stream, StringFormat,
    content::{Content, Operation},
    dictionary,
};
use thiserror::Error;

use crate::report::{Block, Report, Table};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
/// Lowest baseline usable by body content; the page number lives below it.
const CONTENT_BOTTOM: f32 = MARGIN + 20.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const CELL_PADDING: f32 = 4.0;
const ELLIPSIS: &str = "...";

const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 12.0;
const HEADING_SIZE: f32 = 13.0;
const TEXT_SIZE: f32 = 11.0;
const TABLE_SIZE: f32 = 10.0;
const SMALL_SIZE: f32 = 9.0;

/// Failure while encoding the document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A page content stream could not be encoded.
    #[error("failed to encode page content: {0}")]
    Content(String),
    /// The document could not be serialized.
    #[error("failed to write PDF document: {0}")]
    Write(String),
}

/// Render the report fully in memory.
pub fn render(report: &Report) -> Result<Vec<u8>, RenderError> {
    let pages = layout(report);
    encode(&pages)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
enum Draw {
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        text: String,
    },
    Rule {
        y: f32,
        light: bool,
    },
}

struct Layout {
    pages: Vec<Vec<Draw>>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Start a new page unless `height` more points fit on the current one.
    fn reserve(&mut self, height: f32) {
        if self.y - height < CONTENT_BOTTOM {
            self.new_page();
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn push(&mut self, draw: Draw) {
        if let Some(page) = self.pages.last_mut() {
            page.push(draw);
        }
    }

    /// Write one line of text and advance the cursor below it.
    fn line(&mut self, text: &str, size: f32, font: Font, align: Align) {
        let height = size * 1.4;
        self.reserve(height);
        self.y -= size;
        let text = fit(text, CONTENT_WIDTH, size, font);
        let width = text_width(&text, size, font);
        let x = match align {
            Align::Left => MARGIN,
            Align::Center => MARGIN + (CONTENT_WIDTH - width) / 2.0,
            Align::Right => MARGIN + CONTENT_WIDTH - width,
        };
        let y = self.y;
        self.push(Draw::Text {
            x,
            y,
            size,
            font,
            text,
        });
        self.y -= height - size;
    }

    /// Bold `label:` followed by its value in the regular face.
    fn field(&mut self, label: &str, value: &str) {
        let height = TEXT_SIZE * 1.4;
        self.reserve(height);
        self.y -= TEXT_SIZE;
        let label = fit(&format!("{label}:"), CONTENT_WIDTH, TEXT_SIZE, Font::Bold);
        let value_x = MARGIN + text_width(&label, TEXT_SIZE, Font::Bold) + CELL_PADDING;
        let value = fit(value, MARGIN + CONTENT_WIDTH - value_x, TEXT_SIZE, Font::Regular);
        let y = self.y;
        self.push(Draw::Text {
            x: MARGIN,
            y,
            size: TEXT_SIZE,
            font: Font::Bold,
            text: label,
        });
        self.push(Draw::Text {
            x: value_x,
            y,
            size: TEXT_SIZE,
            font: Font::Regular,
            text: value,
        });
        self.y -= height - TEXT_SIZE;
    }

    fn rule(&mut self, light: bool) {
        let y = self.y;
        self.push(Draw::Rule { y, light });
    }

    fn table(&mut self, table: &Table) {
        let row_height = TABLE_SIZE * 1.8;

        if table.rows.is_empty() {
            self.line(&table.empty_message, SUBTITLE_SIZE, Font::Regular, Align::Center);
            return;
        }

        self.reserve(row_height * 2.0);
        self.table_header(table, row_height);
        for (index, row) in table.rows.iter().enumerate() {
            if self.y - row_height < CONTENT_BOTTOM {
                self.new_page();
                self.table_header(table, row_height);
            }
            self.table_row(table, row, Font::Regular, row_height);
            if index + 1 < table.rows.len() {
                self.rule(true);
            }
        }

        if let Some(label) = &table.summary_label {
            self.gap(TABLE_SIZE);
            self.line(
                &format!("{label}: {}", table.rows.len()),
                TABLE_SIZE,
                Font::Regular,
                Align::Center,
            );
        }
    }

    fn table_header(&mut self, table: &Table, row_height: f32) {
        let titles: Vec<String> = table
            .columns
            .iter()
            .map(|column| column.title.clone())
            .collect();
        self.table_row(table, &titles, Font::Bold, row_height);
        self.rule(false);
    }

    fn table_row(&mut self, table: &Table, cells: &[String], font: Font, row_height: f32) {
        let baseline = self.y - (row_height + TABLE_SIZE * 0.7) / 2.0;
        let mut x = MARGIN;
        for (column, cell) in table.columns.iter().zip(cells) {
            let text = fit(cell, column.width - CELL_PADDING, TABLE_SIZE, font);
            self.push(Draw::Text {
                x,
                y: baseline,
                size: TABLE_SIZE,
                font,
                text,
            });
            x += column.width;
        }
        self.y -= row_height;
    }
}

fn layout(report: &Report) -> Vec<Vec<Draw>> {
    let mut layout = Layout::new();

    layout.line(&report.title, TITLE_SIZE, Font::Bold, Align::Center);
    for subtitle in &report.subtitles {
        layout.line(subtitle, SUBTITLE_SIZE, Font::Bold, Align::Center);
    }
    layout.gap(SMALL_SIZE);
    layout.line(&report.generated_on, TABLE_SIZE, Font::Regular, Align::Right);
    layout.gap(TEXT_SIZE * 2.0);

    for block in &report.blocks {
        match block {
            Block::Heading(text) => {
                layout.gap(HEADING_SIZE / 2.0);
                layout.line(text, HEADING_SIZE, Font::Bold, Align::Left);
                layout.gap(HEADING_SIZE / 4.0);
            }
            Block::Text(text) => layout.line(text, TEXT_SIZE, Font::Regular, Align::Left),
            Block::Notice(text) => {
                layout.gap(TEXT_SIZE * 2.0);
                layout.line(text, TABLE_SIZE, Font::Regular, Align::Center);
            }
            Block::Fields(fields) => {
                layout.gap(TEXT_SIZE / 2.0);
                for (label, value) in fields {
                    layout.field(label, value);
                }
            }
            Block::Table(table) => {
                layout.table(table);
                layout.gap(TEXT_SIZE);
            }
        }
    }

    layout.pages
}

fn encode(pages: &[Vec<Draw>]) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font_dictionary("Helvetica"));
    let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource() => regular_id,
            Font::Bold.resource() => bold_id,
        },
    });

    let total = pages.len();
    let mut kids = Vec::with_capacity(total);
    for (index, draws) in pages.iter().enumerate() {
        let mut operations = Vec::new();
        for draw in draws {
            push_draw(&mut operations, draw);
        }
        let footer = format!("Page {} of {}", index + 1, total);
        let footer_width = text_width(&footer, SMALL_SIZE, Font::Regular);
        push_draw(
            &mut operations,
            &Draw::Text {
                x: MARGIN + (CONTENT_WIDTH - footer_width) / 2.0,
                y: MARGIN / 2.0,
                size: SMALL_SIZE,
                font: Font::Regular,
                text: footer,
            },
        );

        let content = Content { operations }
            .encode()
            .map_err(|err| RenderError::Content(err.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => total as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH as i64),
                Object::Integer(PAGE_HEIGHT as i64),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| RenderError::Write(err.to_string()))?;
    Ok(bytes)
}

fn font_dictionary(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn push_draw(operations: &mut Vec<Operation>, draw: &Draw) {
    match draw {
        Draw::Text {
            x,
            y,
            size,
            font,
            text,
        } => {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![font.resource().into(), Object::Integer(size.round() as i64)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![coordinate(*x), coordinate(*y)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(win_ansi(text), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        Draw::Rule { y, light } => {
            let (gray, width) = if *light { (0.75, 0.5) } else { (0.0, 1.0) };
            operations.push(Operation::new("q", vec![]));
            operations.push(Operation::new("G", vec![Object::Real(gray)]));
            operations.push(Operation::new("w", vec![Object::Real(width)]));
            operations.push(Operation::new(
                "m",
                vec![coordinate(MARGIN), coordinate(*y)],
            ));
            operations.push(Operation::new(
                "l",
                vec![coordinate(MARGIN + CONTENT_WIDTH), coordinate(*y)],
            ));
            operations.push(Operation::new("S", vec![]));
            operations.push(Operation::new("Q", vec![]));
        }
    }
}

fn coordinate(value: f32) -> Object {
    Object::Integer(value.round() as i64)
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`.
fn fit(text: &str, max_width: f32, size: f32, font: Font) -> String {
    if text_width(text, size, font) <= max_width {
        return text.to_owned();
    }

    let ellipsis_width = text_width(ELLIPSIS, size, font);
    let mut width = 0.0;
    let mut kept = String::new();
    for c in text.chars() {
        let advance = glyph_width(c, font) * size / 1000.0;
        if width + advance + ellipsis_width > max_width {
            break;
        }
        width += advance;
        kept.push(c);
    }
    kept.push_str(ELLIPSIS);
    kept
}

fn text_width(text: &str, size: f32, font: Font) -> f32 {
    text.chars().map(|c| glyph_width(c, font)).sum::<f32>() * size / 1000.0
}

/// Advance width in thousandths of an em for the standard Helvetica faces.
fn glyph_width(c: char, font: Font) -> f32 {
    let table = match font {
        Font::Regular => &HELVETICA_WIDTHS,
        Font::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match c as u32 {
        code @ 0x20..=0x7e => f32::from(table[(code - 0x20) as usize]),
        _ => 556.0,
    }
}

/// Encode text for a WinAnsi Type1 font; anything outside the code page becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => b' ',
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '\u{20ac}' => 0x80,
            '\u{201a}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201e}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02c6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8a,
            '\u{2039}' => 0x8b,
            '\u{0152}' => 0x8c,
            '\u{017d}' => 0x8e,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02dc}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9a,
            '\u{203a}' => 0x9b,
            '\u{0153}' => 0x9c,
            '\u{017e}' => 0x9e,
            '\u{0178}' => 0x9f,
            _ => b'?',
        })
        .collect()
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
