//! Printable league reports: a small document model, the fixed report layouts and a PDF writer.

pub mod layouts;
pub mod pdf;

/// Document to be rendered, independent of the output format.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Centered title on the first page.
    pub title: String,
    /// Centered lines printed under the title.
    pub subtitles: Vec<String>,
    /// Right-aligned date line under the subtitles.
    pub generated_on: String,
    /// Body content, top to bottom.
    pub blocks: Vec<Block>,
}

impl Report {
    /// Report with a title and the generation date line.
    pub fn new(title: impl Into<String>, generated_on: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitles: Vec::new(),
            generated_on: generated_on.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a centered line under the title.
    pub fn subtitle(mut self, line: impl Into<String>) -> Self {
        self.subtitles.push(line.into());
        self
    }

    /// Append a body block.
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

/// Body element of a report, laid out top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Bold section heading.
    Heading(String),
    /// Plain paragraph line.
    Text(String),
    /// Centered small-print note.
    Notice(String),
    /// Bold label followed by its value, one pair per line.
    Fields(Vec<(String, String)>),
    /// Table with a header row.
    Table(Table),
}

/// Tabular block with fixed column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column headers and widths.
    pub columns: Vec<Column>,
    /// One cell per column.
    pub rows: Vec<Vec<String>>,
    /// Line printed instead of the table when there are no rows.
    pub empty_message: String,
    /// Label of the centered row-count line printed after the rows (`"<label>: <n>"`).
    pub summary_label: Option<String>,
}

impl Table {
    /// Empty table; `empty_message` is printed while it has no rows.
    pub fn new(columns: Vec<Column>, empty_message: impl Into<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            empty_message: empty_message.into(),
            summary_label: None,
        }
    }

    /// Print a row count under the table.
    pub fn with_summary(mut self, label: impl Into<String>) -> Self {
        self.summary_label = Some(label.into());
        self
    }

    /// Append a row.
    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }
}

/// Column header and its width in points.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header text.
    pub title: String,
    /// Width in points.
    pub width: f32,
}

impl Column {
    /// Column of `width` points.
    pub fn new(title: impl Into<String>, width: f32) -> Self {
        Self {
            title: title.into(),
            width,
        }
    }
}

/// Keep only characters that are safe in a `Content-Disposition` filename.
pub fn sanitize_filename(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['_', '.']).is_empty() {
        "report.pdf".to_owned()
    } else {
        cleaned
    }
}
