//! Line and column lookup for diagnostic positions.

/// Pre-computed line offset table for efficient line/column lookup.
///
/// Stores the byte offset of each line start, so lookups are a binary
/// search instead of a scan of the source.
///
/// # Example
///
/// ```
/// use llr_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 14), (3, 3));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// offsets[0] = 0; offsets[n] = byte after the n-th newline.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// Get 1-based line number from a byte offset.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// The column counts characters, not bytes, from the line start.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col_chars = source
            .get(line_start..end)
            .map_or(end.saturating_sub(line_start), |s| s.chars().count());
        let col = u32::try_from(col_chars).unwrap_or(u32::MAX - 1) + 1;
        (line, col)
    }

    /// Get the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
