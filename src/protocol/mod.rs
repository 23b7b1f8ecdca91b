//! Protocol Module
//!
//! Defines the memcached text wire protocol for client-server communication.
//!
//! ## Protocol Format (text, CR-LF framed)
//!
//! ### Requests
//! ```text
//! set <key> <flags> <exptime> <bytes>\r\n<data>\r\n
//! get <key>\r\n
//! delete <key>\r\n
//! ```
//!
//! ### Responses
//! A response is one or more CR-LF terminated lines. Each line begins with a
//! status token; the stream for one command ends at the first line carrying
//! a terminal token:
//!
//! - `STORED` / `NOT_STORED` - outcome of a storage command
//! - `DELETED` / `NOT_FOUND` - outcome of a delete
//! - `END`                   - end of a retrieval response
//! - `OK`, `EXISTS`, `ERROR`, `RESET`, `VERSION` - other terminal statuses
//!
//! `VALUE` is the one non-terminal token: it announces a data block,
//! `VALUE <key> <flags> <bytes>\r\n<data>\r\n`, and is followed by `END`.

mod command;
mod status;
mod codec;

pub use command::Command;
pub use status::Status;
pub use codec::{
    encode_command, parse_value, read_reply, reply_complete, Reply, CRLF, MAX_LINE_READ, QUEUED,
};
