//! Row/column tokenizer for delimited field sheets.

use csv::{ReaderBuilder, StringRecord, Terminator, Trim};

use crate::config::{Delimiters, RowDelimiter};
use crate::error::{Error, ErrorKind, Result};

/// Splits raw sheet text into a header and data rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    delimiters: Delimiters,
}

/// A tokenized sheet: trimmed header names and the data rows below them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// One data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Zero-based position among the data rows.
    pub index: usize,
    /// Line of the input the row starts on.
    pub line: u64,
    /// Trimmed cells, one per header.
    pub cells: Vec<String>,
}

impl Row {
    /// Record number used in error messages; the header is record 1.
    pub fn record_number(&self) -> usize {
        self.index + 2
    }
}

impl Tokenizer {
    pub fn new(delimiters: Delimiters) -> Self {
        Self { delimiters }
    }

    /// Tokenize a whole sheet.
    ///
    /// The first non-blank row is the header. Blank rows, including the
    /// trailing one left by a final row delimiter, are skipped. Empty header
    /// names at the end of the header row (a trailing delimiter) are dropped,
    /// and data rows may carry matching empty cells. Every data row must
    /// otherwise have as many cells as the header.
    ///
    /// A cell that opens with the quote character must be quoted as a whole;
    /// text after its closing quote is rejected instead of being merged.
    pub fn tokenize(&self, text: &str) -> Result<TokenizedSheet> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let records = self
            .builder()
            .from_reader(text.as_bytes())
            .into_records()
            .collect::<csv::Result<Vec<StringRecord>>>()?;

        let mut headers: Option<Vec<String>> = None;
        let mut padding = 0;
        let mut rows = Vec::new();

        for (i, record) in records.iter().enumerate() {
            if is_blank(record) {
                continue;
            }

            let (start, line) = record
                .position()
                .map_or((0, 0), |p| (p.byte() as usize, p.line()));
            let end = records
                .get(i + 1)
                .and_then(StringRecord::position)
                .map_or(text.len(), |p| p.byte() as usize);
            let raw = text.as_bytes().get(start..end).unwrap_or_default();

            // a record can start on terminators and blank lines left before it
            let lead = raw
                .iter()
                .take_while(|&&b| self.is_row_terminator(b))
                .count();
            let line = line + raw[..lead].iter().filter(|&&b| b == b'\n').count() as u64;
            let raw = &raw[lead..];
            let mut cells: Vec<String> = record.iter().map(str::to_string).collect();

            if headers.is_none() {
                if let Some(cell) = self.text_after_closing_quote(raw) {
                    let column = cells.get(cell).cloned().unwrap_or_default();
                    return Err(stray_quote(1, line, column));
                }
                padding = cells.iter().rev().take_while(|c| c.is_empty()).count();
                cells.truncate(cells.len() - padding);
                headers = Some(cells);
                continue;
            }
            let header = headers.as_deref().unwrap_or_default();

            let index = rows.len();
            let record_number = index + 2;
            if let Some(cell) = self.text_after_closing_quote(raw) {
                let column = header
                    .get(cell)
                    .cloned()
                    .unwrap_or_else(|| unnamed_column(cell));
                return Err(stray_quote(record_number, line, column));
            }

            let expected = header.len();
            if padding > 0 && cells.len() == expected + padding {
                if let Some(offset) = cells[expected..].iter().position(|c| !c.is_empty()) {
                    return Err(Error::new(ErrorKind::Decode {
                        record: record_number,
                        line,
                        column: unnamed_column(expected + offset),
                        message: "the column has no header name".to_string(),
                    }));
                }
                cells.truncate(expected);
            }

            if cells.len() != expected {
                return Err(Error::new(ErrorKind::MalformedRow {
                    record: record_number,
                    line,
                    expected,
                    actual: cells.len(),
                }));
            }

            rows.push(Row { index, line, cells });
        }

        let headers = headers.ok_or_else(|| Error::new(ErrorKind::EmptyInput))?;
        tracing::debug!(columns = headers.len(), rows = rows.len(), "tokenized sheet");

        Ok(TokenizedSheet { headers, rows })
    }

    /// Index of the first cell in a raw record whose closing quote is
    /// followed by more text, e.g. `"Big" deal`.
    fn text_after_closing_quote(&self, raw: &[u8]) -> Option<usize> {
        let Delimiters { field, quote, .. } = self.delimiters;
        let is_terminator = |b: u8| self.is_row_terminator(b);

        let mut i = 0;
        let mut cell = 0;
        loop {
            if raw.get(i) == Some(&quote) {
                i += 1;
                loop {
                    match raw.get(i) {
                        None => return None,
                        Some(&b) if b == quote && raw.get(i + 1) == Some(&quote) => i += 2,
                        Some(&b) if b == quote => {
                            i += 1;
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
                while let Some(&b) = raw.get(i) {
                    if b == field || is_terminator(b) {
                        break;
                    }
                    if !b.is_ascii_whitespace() {
                        return Some(cell);
                    }
                    i += 1;
                }
            } else {
                while let Some(&b) = raw.get(i) {
                    if b == field || is_terminator(b) {
                        break;
                    }
                    i += 1;
                }
            }

            match raw.get(i) {
                Some(&b) if b == field => {
                    cell += 1;
                    i += 1;
                }
                _ => return None,
            }
        }
    }

    fn is_row_terminator(&self, b: u8) -> bool {
        match self.delimiters.row {
            RowDelimiter::LineEnding => b == b'\r' || b == b'\n',
            RowDelimiter::Byte(t) => b == t,
        }
    }

    fn builder(&self) -> ReaderBuilder {
        let terminator = match self.delimiters.row {
            RowDelimiter::LineEnding => Terminator::CRLF,
            RowDelimiter::Byte(b) => Terminator::Any(b),
        };

        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiters.field)
            .quote(self.delimiters.quote)
            .terminator(terminator);
        builder
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn unnamed_column(index: usize) -> String {
    format!("#{}", index + 1)
}

fn stray_quote(record: usize, line: u64, column: String) -> Error {
    Error::new(ErrorKind::Decode {
        record,
        line,
        column,
        message: "text follows the closing quote; quote the whole cell and double any quotes inside it"
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(text: &str) -> Result<TokenizedSheet> {
        Tokenizer::new(Delimiters::semicolon()).tokenize(text)
    }

    #[test]
    fn test_header_and_rows() {
        let sheet = tokenize("sobject; fullName ;label\r\nAccount;Tier__c;Tier\r\n").unwrap();
        assert_eq!(sheet.headers, vec!["sobject", "fullName", "label"]);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].cells, vec!["Account", "Tier__c", "Tier"]);
        assert_eq!(sheet.rows[0].record_number(), 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = "sobject;fullName\n\nAccount;A__c\n\n;\nAccount;B__c\n\n";
        let sheet = tokenize(text).unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1].cells, vec!["Account", "B__c"]);
        assert_eq!(sheet.rows[1].index, 1);
    }

    #[test]
    fn test_quoted_cell_keeps_field_delimiter() {
        let text = "fullName;valueSet\nTier__c;\"true<false<GOLD<Gold|GOLD;Silver|SILVER\"\n";
        let sheet = tokenize(text).unwrap();
        assert_eq!(
            sheet.rows[0].cells[1],
            "true<false<GOLD<Gold|GOLD;Silver|SILVER"
        );
    }

    #[test]
    fn test_doubled_quotes_unescape() {
        let text = "fullName;lookupFilter\nA__c;\"{\"\"active\"\":true}\"\n";
        let sheet = tokenize(text).unwrap();
        assert_eq!(sheet.rows[0].cells[1], "{\"active\":true}");
    }

    #[test]
    fn test_short_row_is_malformed() {
        let err = tokenize("sobject;fullName;label\nAccount;A__c;A\nAccount;B__c\n").unwrap_err();
        match err.kind {
            ErrorKind::MalformedRow {
                record,
                line,
                expected,
                actual,
            } => {
                assert_eq!(record, 3);
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let err = tokenize("\n\n").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EmptyInput));
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let sheet = tokenize("\u{feff}sobject;fullName\nAccount;A__c").unwrap();
        assert_eq!(sheet.headers[0], "sobject");
    }

    #[test]
    fn test_comma_and_custom_row_delimiters() {
        let delimiters = Delimiters::comma().with_row(RowDelimiter::Byte(b'|'));
        let sheet = Tokenizer::new(delimiters)
            .tokenize("sobject,fullName|Account,A__c|Contact,B__c|")
            .unwrap();
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1].cells, vec!["Contact", "B__c"]);
    }

    #[test]
    fn test_malformed_row_reports_source_line() {
        let text = "sobject;fullName;description\nAccount;A__c;\"two\nlines\"\n\nAccount;B__c\n";
        let err = tokenize(text).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::MalformedRow {
                record: 3,
                line: 5,
                ..
            }
        ));
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn test_trailing_delimiter_in_header() {
        let text = "sobject;fullName;label;\nAccount;A__c;A;\nAccount;B__c;B\n";
        let sheet = tokenize(text).unwrap();
        assert_eq!(sheet.headers, vec!["sobject", "fullName", "label"]);
        assert_eq!(sheet.rows[0].cells, vec!["Account", "A__c", "A"]);
        assert_eq!(sheet.rows[1].cells, vec!["Account", "B__c", "B"]);
    }

    #[test]
    fn test_value_under_unnamed_column_rejected() {
        let err = tokenize("sobject;fullName;\nAccount;A__c;stray\n").unwrap_err();
        match err.kind {
            ErrorKind::Decode { record, column, .. } => {
                assert_eq!(record, 2);
                assert_eq!(column, "#3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_text_after_closing_quote_rejected() {
        let err = tokenize("sobject;fullName;description\nAccount;A__c;\"Big\" deal\n").unwrap_err();
        match err.kind {
            ErrorKind::Decode {
                record,
                line,
                column,
                message,
            } => {
                assert_eq!(record, 2);
                assert_eq!(line, 2);
                assert_eq!(column, "description");
                assert!(message.contains("closing quote"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_quotes_inside_cells_are_kept() {
        let text = "sobject;fullName;description;label\r\n\
            Account;A__c;\"\"\"Big\"\" deal\";Say \"hi\"\r\n\
            Account;B__c;\"quoted\" ;B\r\n";
        let sheet = tokenize(text).unwrap();
        assert_eq!(sheet.rows[0].cells[2], "\"Big\" deal");
        assert_eq!(sheet.rows[0].cells[3], "Say \"hi\"");
        assert_eq!(sheet.rows[1].cells[2], "quoted");
    }
}
