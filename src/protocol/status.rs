//! Response status tokens
//!
//! Every response line from the server starts with one of a fixed set of
//! status tokens. Parsing them into a tagged enum keeps the termination
//! logic explicit and exhaustive.

/// Status token opening a response line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Data block header (`VALUE <key> <flags> <bytes>`); not terminal
    Value,
    Stored,
    NotStored,
    Deleted,
    NotFound,
    End,
    Ok,
    Exists,
    Error,
    Reset,
    Version,
}

impl Status {
    /// All recognized tokens
    pub const ALL: [Status; 11] = [
        Status::Value,
        Status::Stored,
        Status::NotStored,
        Status::Deleted,
        Status::NotFound,
        Status::End,
        Status::Ok,
        Status::Exists,
        Status::Error,
        Status::Reset,
        Status::Version,
    ];

    /// The wire spelling of this token
    pub fn token(&self) -> &'static str {
        match self {
            Status::Value => "VALUE",
            Status::Stored => "STORED",
            Status::NotStored => "NOT_STORED",
            Status::Deleted => "DELETED",
            Status::NotFound => "NOT_FOUND",
            Status::End => "END",
            Status::Ok => "OK",
            Status::Exists => "EXISTS",
            Status::Error => "ERROR",
            Status::Reset => "RESET",
            Status::Version => "VERSION",
        }
    }

    /// Whether a line carrying this token ends the response stream
    ///
    /// `VALUE` announces a data block and is always followed by more lines;
    /// every other token terminates the response.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Value)
    }

    /// Parse the status token a line starts with.
    ///
    /// Matching is a case-insensitive prefix match anchored at the start of
    /// the line. No token is a prefix of another, so the match is
    /// unambiguous. Returns `None` for unrecognized lines (such as
    /// `CLIENT_ERROR`/`SERVER_ERROR` diagnostics, which the accumulation
    /// loop reads past).
    pub fn parse(line: &[u8]) -> Option<Status> {
        Status::ALL
            .iter()
            .copied()
            .find(|status| starts_with_token(line, status.token()))
    }
}

/// Case-insensitive, start-anchored token match
fn starts_with_token(line: &[u8], token: &str) -> bool {
    let token = token.as_bytes();
    line.len() >= token.len() && line[..token.len()].eq_ignore_ascii_case(token)
}
