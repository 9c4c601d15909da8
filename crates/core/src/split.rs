//! Section Splitter -- divides raw document text on `<!-- ... -->`
//! directive markers into an ordered list of header/body sections.

use crate::ast::Provenance;
use crate::error::ParseError;

/// One directive marker plus the body text that follows it, up to the
/// next marker or end of input.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Trimmed contents of the marker, e.g. `question id="q1"`.
    pub header: String,
    /// Trimmed prose between this marker and the next.
    pub body: String,
    pub prov: Provenance,
}

const OPEN: &str = "<!--";
const CLOSE: &str = "-->";

/// Split source text into sections.
///
/// The close delimiter of a marker is the first `-->` after its `<!--`,
/// so attribute text can never contain the close sequence. Prose before
/// the first marker is discarded. A marker with nothing between it and
/// the next marker yields an empty body. An `<!--` with no matching
/// `-->` anywhere after it is a structural defect and aborts the split.
pub fn split_sections(src: &str, filename: &str) -> Result<Vec<Section>, ParseError> {
    let mut sections = Vec::new();
    let mut rest = src;
    // 1-based line of the first byte of `rest`
    let mut line: u32 = 1;

    while let Some(open_at) = rest.find(OPEN) {
        line += count_newlines(&rest[..open_at]);
        let open_line = line;

        let after_open = &rest[open_at + OPEN.len()..];
        let close_at = after_open.find(CLOSE).ok_or_else(|| {
            ParseError::split(
                filename,
                open_line,
                "unterminated directive marker: '<!--' with no matching '-->'",
            )
        })?;

        let header = after_open[..close_at].trim().to_owned();
        line += count_newlines(&after_open[..close_at + CLOSE.len()]);

        let after_close = &after_open[close_at + CLOSE.len()..];
        let body_end = after_close.find(OPEN).unwrap_or(after_close.len());
        let body = after_close[..body_end].trim().to_owned();

        sections.push(Section {
            header,
            body,
            prov: Provenance {
                file: filename.to_owned(),
                line: open_line,
            },
        });

        line += count_newlines(&after_close[..body_end]);
        rest = &after_close[body_end..];
    }

    Ok(sections)
}

fn count_newlines(s: &str) -> u32 {
    s.bytes().filter(|b| *b == b'\n').count() as u32
}
