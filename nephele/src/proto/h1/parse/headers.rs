use crate::common::http_types::content::ContentLength;
use crate::common::http_types::headers::{
    HeaderBlock, HeaderName, HeaderValue, CONTENT_LENGTH, TRAILER, TRANSFER_ENCODING,
};
use crate::common::http_types::{ParseError, Result, Trailers};
use crate::proto::h1::frame::BodyMetadata;
use crate::proto::h1::parse::{strip_eol, trim_ows};
use crate::proto::h1::status::Status;
use crate::proto::h1::{is_field_value_byte, is_token, ParserOptions, LF};

/// Parses a header block and derives the body framing from it.
///
/// `bytes` is the flattened front of the pending buffer, at most
/// `max_head_length` long.
pub(crate) fn parse_header_block(
    bytes: &[u8],
    opts: &ParserOptions,
) -> Result<Status<(usize, HeaderBlock, BodyMetadata)>> {
    let (used, headers) = complete!(parse_fields(bytes, opts)?);
    let metadata = body_metadata(&headers)?;
    Ok(Status::Complete((used, headers, metadata)))
}

/// Same grammar as a header block; framing fields carry no meaning here.
pub(crate) fn parse_trailer_block(
    bytes: &[u8],
    opts: &ParserOptions,
) -> Result<Status<(usize, Trailers)>> {
    let (used, fields) = complete!(parse_fields(bytes, opts)?);
    Ok(Status::Complete((used, Trailers::from(fields))))
}

/// Field lines up to and including the empty line that ends the block.
pub(crate) fn parse_fields(
    bytes: &[u8],
    opts: &ParserOptions,
) -> Result<Status<(usize, HeaderBlock)>> {
    let mut block = HeaderBlock::new();
    let mut pos = 0;

    loop {
        let rest = &bytes[pos..];
        let eol = match memchr::memchr(LF, rest) {
            Some(eol) => eol,
            None if bytes.len() >= opts.max_head_length() => {
                return Err(ParseError::HeadTooLarge);
            }
            None => return Ok(Status::Partial),
        };
        let line = strip_eol(&rest[..=eol]);
        pos += eol + 1;

        if line.is_empty() {
            return Ok(Status::Complete((pos, block)));
        }

        if line[0] == b' ' || line[0] == b'\t' {
            let continuation = field_value(line)?;
            if !block.fold_into_last(continuation) {
                return Err(ParseError::MalformedGrammar(
                    "continuation line without a header field",
                ));
            }
            continue;
        }

        if block.len() >= opts.max_headers() {
            return Err(ParseError::TooManyHeaders);
        }

        let colon = memchr::memchr(b':', line)
            .ok_or(ParseError::MalformedGrammar("header line without a colon"))?;
        let name = &line[..colon];
        if name.is_empty() {
            return Err(ParseError::MalformedGrammar("empty header name"));
        }
        if matches!(name.last(), Some(b' ') | Some(b'\t')) {
            return Err(ParseError::MalformedGrammar(
                "whitespace between header name and colon",
            ));
        }
        if !name.iter().all(|&b| is_token(b)) {
            return Err(ParseError::MalformedGrammar("invalid header name"));
        }

        let value = field_value(&line[colon + 1..])?;
        block.append(
            HeaderName::from_token(name),
            HeaderValue::from_string(value.to_owned()),
        );
    }
}

fn field_value(raw: &[u8]) -> Result<&str> {
    let value = trim_ows(raw);
    if !value.iter().all(|&b| is_field_value_byte(b)) {
        return Err(ParseError::MalformedGrammar("invalid header value"));
    }
    std::str::from_utf8(value).map_err(|_| ParseError::MalformedGrammar("invalid header value"))
}

fn body_metadata(headers: &HeaderBlock) -> Result<BodyMetadata> {
    let is_chunked = headers
        .get_all(&TRANSFER_ENCODING)
        .last()
        .and_then(|value| value.as_str().rsplit(',').next())
        .map_or(false, |coding| coding.trim().eq_ignore_ascii_case("chunked"));

    let mut content_length = None;
    for value in headers.get_all(&CONTENT_LENGTH) {
        let len = ContentLength::parse(value.as_str())?.len();
        match content_length {
            Some(previous) if previous != len => return Err(ParseError::InvalidContentLength),
            _ => content_length = Some(len),
        }
    }

    if is_chunked && content_length.is_some() {
        return Err(ParseError::ConflictingLength);
    }

    Ok(BodyMetadata {
        is_chunked,
        content_length,
        has_trailer: headers.contains(&TRAILER),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &str) -> Result<Status<(usize, HeaderBlock, BodyMetadata)>> {
        parse_header_block(raw.as_bytes(), &ParserOptions::default())
    }

    fn complete(raw: &str) -> (usize, HeaderBlock, BodyMetadata) {
        match headers(raw).unwrap() {
            Status::Complete(parsed) => parsed,
            Status::Partial => panic!("expected a complete block for {:?}", raw),
        }
    }

    #[test]
    fn parses_fields_and_stops_at_empty_line() {
        let raw = "Host: example.com\r\nAccept:  */* \r\n\r\nbody";
        let (used, block, metadata) = complete(raw);
        assert_eq!(used, raw.len() - 4);
        assert_eq!(block.len(), 2);
        assert_eq!(block.get("host").unwrap(), "example.com");
        assert_eq!(block.get("ACCEPT").unwrap(), "*/*");
        assert_eq!(metadata, BodyMetadata::default());
    }

    #[test]
    fn accepts_lf_only_terminators_and_empty_blocks() {
        let (used, block, _) = complete("a: 1\nb: 2\n\n");
        assert_eq!(used, 11);
        assert_eq!(block.len(), 2);

        let (used, block, _) = complete("\r\n");
        assert_eq!(used, 2);
        assert!(block.is_empty());
    }

    #[test]
    fn needs_more_until_the_block_ends() {
        assert!(headers("").unwrap().is_partial());
        assert!(headers("Host: a\r\n").unwrap().is_partial());
        assert!(headers("Host: a\r\n\r").unwrap().is_partial());
    }

    #[test]
    fn folded_lines_join_the_previous_value() {
        let (_, block, _) = complete("X-Folded: one\r\n  two\r\n\tthree \r\nNext: n\r\n\r\n");
        assert_eq!(block.get("x-folded").unwrap(), "one two three");
        assert_eq!(block.get("next").unwrap(), "n");
    }

    #[test]
    fn derives_body_metadata() {
        let (_, _, metadata) = complete("Content-Length: 42\r\n\r\n");
        assert_eq!(metadata.content_length, Some(42));
        assert!(!metadata.is_chunked);

        let (_, _, metadata) =
            complete("transfer-encoding: gzip, Chunked\r\nTRAILER: Expires\r\n\r\n");
        assert!(metadata.is_chunked);
        assert!(metadata.has_trailer);
        assert_eq!(metadata.content_length, None);

        let (_, _, metadata) = complete("Transfer-Encoding: chunked, gzip\r\n\r\n");
        assert!(!metadata.is_chunked);
    }

    #[test]
    fn repeated_content_length_must_agree() {
        let (_, _, metadata) = complete("Content-Length: 5\r\nContent-Length: 5\r\n\r\n");
        assert_eq!(metadata.content_length, Some(5));
        assert!(matches!(
            headers("Content-Length: 5\r\nContent-Length: 6\r\n\r\n"),
            Err(ParseError::InvalidContentLength)
        ));
    }

    #[test]
    fn rejects_bad_content_length() {
        for raw in &[
            "Content-Length: 99999999999999999999999999\r\n\r\n",
            "Content-Length: -1\r\n\r\n",
            "Content-Length: ten\r\n\r\n",
            "Content-Length:\r\n\r\n",
        ] {
            assert!(
                matches!(headers(raw), Err(ParseError::InvalidContentLength)),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn chunked_with_content_length_conflicts() {
        assert!(matches!(
            headers("Transfer-Encoding: chunked\r\nContent-Length: 3\r\n\r\n"),
            Err(ParseError::ConflictingLength)
        ));
    }

    #[test]
    fn rejects_malformed_field_lines() {
        for raw in &[
            ": no-name\r\n\r\n",
            "Host : a\r\n\r\n",
            "Ho st: a\r\n\r\n",
            "Ho\x01st: a\r\n\r\n",
            "NoColon\r\n\r\n",
            "X: a\0b\r\n\r\n",
            "X: a\x7fb\r\n\r\n",
            "X: a\rb\r\n\r\n",
            " leading-fold\r\n\r\n",
        ] {
            let err = headers(raw).unwrap_err();
            assert!(err.is_malformed(), "{:?} gave {:?}", raw, err);
        }
    }

    #[test]
    fn enforces_limits() {
        let opts = ParserOptions::default().with_max_headers(2);
        assert!(matches!(
            parse_fields(b"a: 1\r\nb: 2\r\nc: 3\r\n\r\n", &opts),
            Err(ParseError::TooManyHeaders)
        ));

        let opts = ParserOptions::default().with_max_head_length(8);
        assert!(matches!(
            parse_fields(b"X-Long: abcdefgh", &opts),
            Err(ParseError::HeadTooLarge)
        ));
    }

    #[test]
    fn trailers_ignore_framing_fields() {
        let opts = ParserOptions::default();
        match parse_trailer_block(b"Content-Length: nope\r\nExpires: never\r\n\r\n", &opts).unwrap() {
            Status::Complete((used, trailers)) => {
                assert_eq!(used, 40);
                assert_eq!(trailers.get("content-length").unwrap(), "nope");
                assert_eq!(trailers.get("expires").unwrap(), "never");
            }
            Status::Partial => panic!("expected complete trailers"),
        }
    }
}
