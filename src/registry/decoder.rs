//! Response decoding: codepage bytes → CSV rows.

use encoding_rs::Encoding;

use crate::error::{Result, SchtasksError};

/// Codepage the utility writes on a Japanese-locale host (cp932).
pub const DEFAULT_CODEPAGE: &str = "windows-31j";

/// Decodes the utility's standard output into rows of string fields.
#[derive(Debug, Clone, Copy)]
pub struct ResponseDecoder {
    encoding: &'static Encoding,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::SHIFT_JIS,
        }
    }
}

impl ResponseDecoder {
    /// Create a decoder for a WHATWG encoding label (e.g. `"windows-31j"`, `"utf-8"`).
    ///
    /// # Errors
    ///
    /// Returns [`SchtasksError::Config`] if the label is not recognised.
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| SchtasksError::Config(format!("unknown codepage label: {label}")))?;
        Ok(Self { encoding })
    }

    /// Name of the underlying encoding.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode strictly and strip every carriage return.
    ///
    /// # Errors
    ///
    /// Returns [`SchtasksError::Decode`] on the first malformed byte sequence.
    pub fn decode_text(&self, bytes: &[u8]) -> Result<String> {
        let text = self
            .encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or(SchtasksError::Decode {
                encoding: self.encoding.name(),
            })?;
        Ok(text.replace('\r', ""))
    }

    /// Decode with replacement characters; used for mutation output, which never fails.
    pub fn decode_lossy(&self, bytes: &[u8]) -> String {
        let (text, _had_errors) = self.encoding.decode_without_bom_handling(bytes);
        text.replace('\r', "")
    }

    /// Decode `bytes` and split them into CSV rows.
    ///
    /// Rows whose first field is empty are dropped; the rest keep their order.
    ///
    /// # Errors
    ///
    /// Returns [`SchtasksError::Decode`] for invalid bytes.
    pub fn decode_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>> {
        let text = self.decode_text(bytes)?;
        parse_rows(&text)
    }
}

/// Split already-decoded text into CSV rows, dropping blank-first-field rows.
///
/// An unterminated quote closes its field at end of input rather than failing.
///
/// # Errors
///
/// Returns [`SchtasksError::Csv`] only if the CSV reader reports a failure,
/// which flexible parsing of in-memory text does not produce in practice.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.get(0).is_none_or(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}
