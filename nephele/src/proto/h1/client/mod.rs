use crate::common::buffer::PendingBuf;
use crate::common::http_types::Result;
use crate::proto::h1::frame::StartLine;
use crate::proto::h1::parse::parse_status_line;
use crate::proto::h1::status::Status;
use crate::proto::h1::stream::{Role, StreamHandler};
use crate::proto::h1::ParserOptions;

/// The requesting side: parses responses.
#[derive(Clone, Copy, Debug)]
pub enum Client {}

/// Parses the response to one request.
pub type ClientStreamHandler = StreamHandler<Client>;

impl Role for Client {
    const NAME: &'static str = "client";

    fn parse_start_line<B: PendingBuf>(
        buf: &B,
        opts: &ParserOptions,
    ) -> Result<Status<(usize, StartLine)>> {
        Ok(parse_status_line(buf, opts)?.map(|(used, line)| (used, StartLine::Status(line))))
    }

    /// Only `100 Continue` is skipped over; every other status line,
    /// informational or not, starts the response proper.
    fn is_interim(line: &StartLine) -> bool {
        match line {
            StartLine::Status(line) => line.is_continue(),
            StartLine::Request(_) => false,
        }
    }
}
