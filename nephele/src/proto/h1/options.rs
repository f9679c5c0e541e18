use serde::{Deserialize, Serialize};

use crate::proto::h1::{MAX_CHUNK_LINE_LENGTH, MAX_HEADERS, MAX_HEAD_LENGTH, MAX_START_LINE_LENGTH};

/// Limits applied while framing a message.
///
/// Every tokenizer searches at most this many bytes for its terminator, so a
/// peer cannot make the parser rescan an unbounded buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    max_start_line_length: usize,
    max_head_length: usize,
    max_headers: usize,
    max_chunk_line_length: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_start_line_length: MAX_START_LINE_LENGTH,
            max_head_length: MAX_HEAD_LENGTH,
            max_headers: MAX_HEADERS,
            max_chunk_line_length: MAX_CHUNK_LINE_LENGTH,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_start_line_length(mut self, len: usize) -> Self {
        self.max_start_line_length = len;
        self
    }

    /// Bound for a header or trailer block, terminating empty line included.
    pub fn with_max_head_length(mut self, len: usize) -> Self {
        self.max_head_length = len;
        self
    }

    pub fn with_max_headers(mut self, count: usize) -> Self {
        self.max_headers = count;
        self
    }

    /// Bound for a chunk-size line, extensions included.
    pub fn with_max_chunk_line_length(mut self, len: usize) -> Self {
        self.max_chunk_line_length = len;
        self
    }

    pub fn max_start_line_length(&self) -> usize {
        self.max_start_line_length
    }

    pub fn max_head_length(&self) -> usize {
        self.max_head_length
    }

    pub fn max_headers(&self) -> usize {
        self.max_headers
    }

    pub fn max_chunk_line_length(&self) -> usize {
        self.max_chunk_line_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let opts: ParserOptions = serde_json::from_str(r#"{ "max_headers": 16 }"#).unwrap();
        assert_eq!(opts.max_headers(), 16);
        assert_eq!(opts.max_head_length(), MAX_HEAD_LENGTH);
        assert_eq!(opts.max_chunk_line_length(), MAX_CHUNK_LINE_LENGTH);
    }

    #[test]
    fn serializes_every_limit() {
        let opts = ParserOptions::new().with_max_head_length(1024);
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["max_head_length"], 1024);
        assert_eq!(json["max_start_line_length"], MAX_START_LINE_LENGTH);
    }
}
