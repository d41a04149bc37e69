//! Elastic tabstops: tab-terminated cells in consecutive lines are padded to
//! a common column width.

use std::io::{self, Write};

pub const DEFAULT_MIN_WIDTH: usize = 5;
pub const DEFAULT_PADDING: usize = 5;
pub const DEFAULT_PAD_CHAR: char = ' ';

/// Buffers everything written to it and aligns it on [`Write::flush`].
///
/// Buffered text left over when the writer is dropped is flushed then, so
/// output is never lost on an early return.
pub struct TabWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
    min_width: usize,
    padding: usize,
    pad_char: char,
}

impl<W: Write> TabWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            min_width: DEFAULT_MIN_WIDTH,
            padding: DEFAULT_PADDING,
            pad_char: DEFAULT_PAD_CHAR,
        }
    }

    pub fn min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn pad_char(mut self, pad_char: char) -> Self {
        self.pad_char = pad_char;
        self
    }

    fn flush_buffer(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();

        let aligned = align(&text, self.min_width, self.padding, self.pad_char);
        self.inner.write_all(aligned.as_bytes())
    }
}

impl<W: Write> Write for TabWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_buffer()?;
        self.inner.flush()
    }
}

impl<W: Write> Drop for TabWriter<W> {
    fn drop(&mut self) {
        if !self.buf.is_empty() {
            let _ = self.flush();
        }
    }
}

/// Aligns `text`. Every cell but the last of each line is padded to the
/// widest cell of its column block (the run of adjacent lines that all have
/// that column), plus `padding`, and never below `min_width`.
pub fn align(text: &str, min_width: usize, padding: usize, pad_char: char) -> String {
    let terminated = text.ends_with('\n');
    let body = if terminated {
        &text[..text.len() - 1]
    } else {
        text
    };

    let lines: Vec<Vec<&str>> = body.split('\n').map(|l| l.split('\t').collect()).collect();
    let column_count = lines.iter().map(|cells| cells.len() - 1).max().unwrap_or(0);

    let mut widths = vec![vec![0usize; column_count]; lines.len()];
    for column in 0..column_count {
        let mut row = 0;
        while row < lines.len() {
            if lines[row].len() - 1 <= column {
                row += 1;
                continue;
            }

            let start = row;
            let mut width = min_width;
            while row < lines.len() && lines[row].len() - 1 > column {
                width = width.max(cell_width(lines[row][column]) + padding);
                row += 1;
            }
            for w in &mut widths[start..row] {
                w[column] = width;
            }
        }
    }

    let mut out = String::with_capacity(text.len());
    for (row, cells) in lines.iter().enumerate() {
        let last = cells.len() - 1;
        for (column, cell) in cells.iter().enumerate() {
            out.push_str(cell);
            if column < last {
                let pad = widths[row][column].saturating_sub(cell_width(cell));
                out.extend(std::iter::repeat(pad_char).take(pad));
            }
        }
        if row + 1 < lines.len() || terminated {
            out.push('\n');
        }
    }
    out
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}
