//! Body reader for `word/document.xml`.
//!
//! Walks the WordprocessingML event stream once and groups top-level
//! content into [`Block`]s: maximal runs of body paragraphs, and tables.
//! Only `w:`-prefixed elements are structural; drawing text (`a:t`) and
//! `mc:Fallback` duplicates are ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{Block, Cell, Paragraph, Row};

use super::options::{ErrorMode, ParseOptions};

/// Read the document body into blocks.
pub(crate) fn read_body(xml: &str, options: &ParseOptions) -> Result<Vec<Block>> {
    let mut reader = Reader::from_str(xml);
    let mut body = BodyReader::new(options);

    loop {
        let result = match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => body.handle(event),
            Err(e) => Err(Error::Xml(format!(
                "{} (near byte {})",
                e,
                reader.buffer_position()
            ))),
        };

        if let Err(err) = result {
            match options.error_mode {
                ErrorMode::Strict => return Err(err),
                ErrorMode::Lenient => {
                    log::warn!("Stopping body read early: {}", err);
                    break;
                }
            }
        }
    }

    Ok(body.finish())
}

/// Local name of a `w:`-prefixed element.
fn wml(qname: &[u8]) -> Option<&[u8]> {
    qname.strip_prefix(b"w:".as_slice())
}

/// Value of the `w:val` attribute, if present.
fn val_attr(e: &BytesStart<'_>) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"val" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Word tables hold at most 63 columns.
const MAX_GRID_COLUMNS: usize = 63;

fn count_attr(e: &BytesStart<'_>) -> Result<usize> {
    Ok(val_attr(e)?
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum VMerge {
    #[default]
    None,
    Restart,
    Continue,
}

#[derive(Debug)]
struct RawCell {
    paragraphs: Vec<Paragraph>,
    span: usize,
    vmerge: VMerge,
}

impl Default for RawCell {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            span: 1,
            vmerge: VMerge::None,
        }
    }
}

#[derive(Debug, Default)]
struct RawRow {
    cells: Vec<RawCell>,
    grid_before: usize,
}

#[derive(Debug, Default)]
struct TableBuilder {
    rows: Vec<RawRow>,
    row: Option<RawRow>,
    cell: Option<RawCell>,
}

impl TableBuilder {
    fn start_row(&mut self) {
        self.end_row();
        self.row = Some(RawRow::default());
    }

    fn end_row(&mut self) {
        self.end_cell();
        if let Some(row) = self.row.take() {
            self.rows.push(row);
        }
    }

    fn start_cell(&mut self) {
        self.end_cell();
        if self.row.is_none() {
            self.row = Some(RawRow::default());
        }
        self.cell = Some(RawCell::default());
    }

    fn end_cell(&mut self) {
        if let Some(cell) = self.cell.take() {
            if let Some(row) = self.row.as_mut() {
                row.cells.push(cell);
            }
        }
    }

    /// Resolve spans and vertical merges into positional cells.
    fn finish(mut self, duplicate_merged: bool) -> Vec<Row> {
        self.end_row();

        // Content most recently placed at each grid column.
        let mut above: Vec<Vec<Paragraph>> = Vec::new();
        let mut rows = Vec::with_capacity(self.rows.len());

        for raw_row in self.rows {
            let mut col = raw_row.grid_before;
            let mut cells = Vec::with_capacity(raw_row.cells.len());

            for raw in raw_row.cells {
                let span = raw.span.max(1);
                let paragraphs = match raw.vmerge {
                    VMerge::Continue if duplicate_merged => {
                        above.get(col).cloned().unwrap_or(raw.paragraphs)
                    }
                    VMerge::Continue => Vec::new(),
                    VMerge::None | VMerge::Restart => raw.paragraphs,
                };

                let end = col.saturating_add(span);
                if above.len() < end {
                    above.resize(end, Vec::new());
                }
                for slot in &mut above[col..end] {
                    slot.clone_from(&paragraphs);
                }

                if duplicate_merged {
                    for _ in 1..span {
                        cells.push(Cell::new(paragraphs.clone()));
                    }
                }
                cells.push(Cell::new(paragraphs));
                col = end;
            }

            rows.push(Row::new(cells));
        }

        rows
    }
}

#[derive(Debug, Default)]
struct OpenParagraph {
    paragraph: Paragraph,
    run: Option<String>,
}

impl OpenParagraph {
    fn close_run(&mut self) {
        if let Some(run) = self.run.take() {
            if !run.is_empty() {
                self.paragraph.add_run(run);
            }
        }
    }

    /// Inline content outside a run (e.g. `w:tab` stops in `w:pPr`) is not text.
    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.push_str(text);
        }
    }
}

struct BodyReader {
    duplicate_merged: bool,
    error_mode: ErrorMode,
    blocks: Vec<Block>,
    pending: Vec<Paragraph>,
    tables: Vec<TableBuilder>,
    // Text box content opens paragraphs inside a paragraph.
    paragraphs: Vec<OpenParagraph>,
    in_text: bool,
    in_cell_props: bool,
    in_row_props: bool,
    skip_depth: usize,
}

impl BodyReader {
    fn new(options: &ParseOptions) -> Self {
        Self {
            duplicate_merged: options.duplicate_merged_cells,
            error_mode: options.error_mode,
            blocks: Vec::new(),
            pending: Vec::new(),
            tables: Vec::new(),
            paragraphs: Vec::new(),
            in_text: false,
            in_cell_props: false,
            in_row_props: false,
            skip_depth: 0,
        }
    }

    fn handle(&mut self, event: Event<'_>) -> Result<()> {
        match event {
            Event::Start(e) => {
                if self.skip_depth > 0 {
                    self.skip_depth += 1;
                    return Ok(());
                }
                let qname = e.name();
                if qname.as_ref() == b"mc:Fallback" {
                    self.skip_depth = 1;
                } else if let Some(name) = wml(qname.as_ref()) {
                    self.start(name, &e)?;
                }
            }
            Event::Empty(e) => {
                if self.skip_depth == 0 {
                    let qname = e.name();
                    if let Some(name) = wml(qname.as_ref()) {
                        self.empty(name, &e)?;
                    }
                }
            }
            Event::End(e) => {
                if self.skip_depth > 0 {
                    self.skip_depth -= 1;
                    return Ok(());
                }
                let qname = e.name();
                if let Some(name) = wml(qname.as_ref()) {
                    self.end(name);
                }
            }
            Event::Text(t) => {
                if self.in_text && self.skip_depth == 0 {
                    let text = t.unescape()?;
                    self.push_text(&text);
                }
            }
            Event::CData(c) => {
                if self.in_text && self.skip_depth == 0 {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    self.push_text(&text);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn start(&mut self, name: &[u8], e: &BytesStart<'_>) -> Result<()> {
        match name {
            b"p" => self.paragraphs.push(OpenParagraph::default()),
            b"r" => {
                if let Some(open) = self.paragraphs.last_mut() {
                    open.close_run();
                    open.run = Some(String::new());
                }
            }
            b"t" => self.in_text = true,
            b"tbl" => self.tables.push(TableBuilder::default()),
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.start_row();
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.start_cell();
                }
            }
            b"tcPr" => self.in_cell_props = true,
            b"trPr" => self.in_row_props = true,
            _ => self.property(name, e)?,
        }
        Ok(())
    }

    fn empty(&mut self, name: &[u8], e: &BytesStart<'_>) -> Result<()> {
        match name {
            b"p" => self.deliver(Paragraph::new()),
            b"tab" => self.push_text("\t"),
            b"br" | b"cr" => self.push_text("\n"),
            b"noBreakHyphen" => self.push_text("-"),
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.start_cell();
                    table.end_cell();
                }
            }
            _ => self.property(name, e)?,
        }
        Ok(())
    }

    /// Cell and row properties that shape the grid.
    fn property(&mut self, name: &[u8], e: &BytesStart<'_>) -> Result<()> {
        match name {
            b"gridSpan" if self.in_cell_props => {
                let span = self.grid_count(e, "gridSpan")?;
                if let Some(cell) = self.tables.last_mut().and_then(|t| t.cell.as_mut()) {
                    cell.span = span;
                }
            }
            b"vMerge" if self.in_cell_props => {
                let vmerge = match val_attr(e)?.as_deref() {
                    Some("restart") => VMerge::Restart,
                    _ => VMerge::Continue,
                };
                if let Some(cell) = self.tables.last_mut().and_then(|t| t.cell.as_mut()) {
                    cell.vmerge = vmerge;
                }
            }
            b"gridBefore" if self.in_row_props => {
                let before = self.grid_count(e, "gridBefore")?;
                if let Some(row) = self.tables.last_mut().and_then(|t| t.row.as_mut()) {
                    row.grid_before = before;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Column count of a grid property, bounded by the widest legal table.
    fn grid_count(&self, e: &BytesStart<'_>, property: &str) -> Result<usize> {
        let count = count_attr(e)?;
        if count <= MAX_GRID_COLUMNS {
            return Ok(count);
        }
        match self.error_mode {
            ErrorMode::Strict => Err(Error::Xml(format!(
                "{} of {} exceeds {} columns",
                property, count, MAX_GRID_COLUMNS
            ))),
            ErrorMode::Lenient => {
                log::warn!(
                    "Clamping {} of {} to {} columns",
                    property,
                    count,
                    MAX_GRID_COLUMNS
                );
                Ok(MAX_GRID_COLUMNS)
            }
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"t" => self.in_text = false,
            b"r" => {
                if let Some(open) = self.paragraphs.last_mut() {
                    open.close_run();
                }
            }
            b"p" => {
                if let Some(mut open) = self.paragraphs.pop() {
                    open.close_run();
                    self.deliver(open.paragraph);
                }
            }
            b"tc" => {
                if let Some(table) = self.tables.last_mut() {
                    table.end_cell();
                }
            }
            b"tr" => {
                if let Some(table) = self.tables.last_mut() {
                    table.end_row();
                }
            }
            b"tcPr" => self.in_cell_props = false,
            b"trPr" => self.in_row_props = false,
            b"tbl" => self.close_table(),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(open) = self.paragraphs.last_mut() {
            open.push_text(text);
        }
    }

    /// Hand a finished paragraph to the innermost open container.
    fn deliver(&mut self, paragraph: Paragraph) {
        match self.tables.last_mut() {
            Some(table) => match table.cell.as_mut() {
                Some(cell) => cell.paragraphs.push(paragraph),
                None => log::debug!("Dropping paragraph outside of a table cell"),
            },
            None => self.pending.push(paragraph),
        }
    }

    fn close_table(&mut self) {
        let Some(table) = self.tables.pop() else {
            return;
        };
        let rows = table.finish(self.duplicate_merged);

        if self.tables.is_empty() {
            self.flush_pending();
            log::debug!("Read table with {} rows", rows.len());
            self.blocks.push(Block::Table(rows));
        } else {
            // Nested tables flatten into the enclosing cell.
            let nested: Vec<Paragraph> = rows
                .into_iter()
                .flat_map(|row| row.cells)
                .flat_map(|cell| cell.paragraphs)
                .collect();
            for paragraph in nested {
                self.deliver(paragraph);
            }
        }
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            self.blocks
                .push(Block::Paragraphs(std::mem::take(&mut self.pending)));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        while let Some(mut open) = self.paragraphs.pop() {
            open.close_run();
            self.deliver(open.paragraph);
        }
        while !self.tables.is_empty() {
            self.close_table();
        }
        self.flush_pending();
        self.blocks
    }
}
