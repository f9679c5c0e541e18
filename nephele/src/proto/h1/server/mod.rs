use crate::common::buffer::PendingBuf;
use crate::common::http_types::Result;
use crate::proto::h1::frame::StartLine;
use crate::proto::h1::parse::parse_request_line;
use crate::proto::h1::status::Status;
use crate::proto::h1::stream::{Role, StreamHandler};
use crate::proto::h1::ParserOptions;

/// The accepting side: parses requests.
#[derive(Clone, Copy, Debug)]
pub enum Server {}

/// Parses one request off an accepted connection.
pub type ServerStreamHandler = StreamHandler<Server>;

impl Role for Server {
    const NAME: &'static str = "server";

    fn parse_start_line<B: PendingBuf>(
        buf: &B,
        opts: &ParserOptions,
    ) -> Result<Status<(usize, StartLine)>> {
        Ok(parse_request_line(buf, opts)?.map(|(used, line)| (used, StartLine::Request(line))))
    }
}
