use std::borrow::Cow;

use crate::common::buffer::PendingBuf;
use crate::common::http_types::{ParseError, Result, Version};
use crate::proto::h1::frame::{RequestLine, StatusLine};
use crate::proto::h1::parse::strip_eol;
use crate::proto::h1::status::Status;
use crate::proto::h1::{is_field_value_byte, is_token, ParserOptions, LF};

/// Shortest request line accepted: `A / HTTP/1.0\n`.
const MIN_REQUEST_LINE: usize = 13;

/// Shortest status line accepted: `HTTP/1.0 200\n`.
const MIN_STATUS_LINE: usize = 13;

const HTTP_VERSION_LEN: usize = 8;

pub(crate) fn parse_request_line<B: PendingBuf>(
    buf: &B,
    opts: &ParserOptions,
) -> Result<Status<(usize, RequestLine)>> {
    let line = complete!(take_line(buf, MIN_REQUEST_LINE, opts.max_start_line_length())?);
    let request = request_line(strip_eol(&line))?;
    Ok(Status::Complete((line.len(), request)))
}

pub(crate) fn parse_status_line<B: PendingBuf>(
    buf: &B,
    opts: &ParserOptions,
) -> Result<Status<(usize, StatusLine)>> {
    let line = complete!(take_line(buf, MIN_STATUS_LINE, opts.max_start_line_length())?);
    let status = status_line(strip_eol(&line))?;
    Ok(Status::Complete((line.len(), status)))
}

/// Flattens the first line, LF included. The newline search never looks
/// past `limit` bytes.
fn take_line<B: PendingBuf>(buf: &B, min: usize, limit: usize) -> Result<Status<Cow<'_, [u8]>>> {
    if buf.len() < min {
        return Ok(Status::Partial);
    }
    match buf.find_byte(LF, limit) {
        Some(pos) => Ok(Status::Complete(buf.flatten(pos + 1))),
        None if buf.len() >= limit => Err(ParseError::HeadTooLarge),
        None => Ok(Status::Partial),
    }
}

fn request_line(line: &[u8]) -> Result<RequestLine> {
    let method_end = line
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::MalformedGrammar("missing request target"))?;
    let method = &line[..method_end];
    if method.is_empty() {
        return Err(ParseError::MalformedGrammar("empty request method"));
    }
    if !method.iter().all(|&b| is_token(b)) {
        return Err(ParseError::MalformedGrammar("invalid request method"));
    }

    let rest = &line[method_end + 1..];
    let target_end = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::MalformedGrammar("missing HTTP version"))?;
    let target = &rest[..target_end];
    if target.is_empty() {
        return Err(ParseError::MalformedGrammar("empty request target"));
    }
    if !target.iter().all(|&b| b > b' ' && b != 0x7f) {
        return Err(ParseError::MalformedGrammar("invalid request target"));
    }

    let target = std::str::from_utf8(target)
        .map_err(|_| ParseError::MalformedGrammar("invalid request target"))?;

    let version = http_version(&rest[target_end + 1..])?;

    Ok(RequestLine {
        method: method.iter().map(|&b| char::from(b)).collect(),
        target: target.to_owned(),
        version,
    })
}

fn status_line(line: &[u8]) -> Result<StatusLine> {
    if line.len() < HTTP_VERSION_LEN {
        return Err(ParseError::MalformedGrammar("invalid HTTP version"));
    }
    let version = http_version(&line[..HTTP_VERSION_LEN])?;

    let rest = &line[HTTP_VERSION_LEN..];
    let rest = match rest.split_first() {
        Some((b' ', rest)) => rest,
        _ => return Err(ParseError::MalformedGrammar("missing status code")),
    };
    if rest.len() < 3 || !rest[..3].iter().all(u8::is_ascii_digit) {
        return Err(ParseError::MalformedGrammar("invalid status code"));
    }
    let code = rest[..3]
        .iter()
        .fold(0u16, |code, &d| code * 10 + u16::from(d - b'0'));

    let reason = match rest[3..].split_first() {
        None => &[][..],
        Some((b' ', reason)) => reason,
        Some(_) => return Err(ParseError::MalformedGrammar("invalid status code")),
    };
    if !reason.iter().all(|&b| is_field_value_byte(b)) {
        return Err(ParseError::MalformedGrammar("invalid reason phrase"));
    }
    let reason = std::str::from_utf8(reason)
        .map_err(|_| ParseError::MalformedGrammar("invalid reason phrase"))?;

    Ok(StatusLine {
        version,
        code,
        reason: reason.to_owned(),
    })
}

fn http_version(bytes: &[u8]) -> Result<Version> {
    if bytes.len() != HTTP_VERSION_LEN || !bytes.starts_with(b"HTTP/1.") {
        return Err(ParseError::MalformedGrammar("invalid HTTP version"));
    }
    Version::from_minor(bytes[HTTP_VERSION_LEN - 1])
        .ok_or(ParseError::MalformedGrammar("unsupported HTTP version"))
}
