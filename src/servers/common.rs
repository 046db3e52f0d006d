use std::io::{Error, ErrorKind};

/// Determines if an std::io::Error results from a broken connection
pub fn is_disconnect(error: &Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::ConnectionReset | ErrorKind::BrokenPipe
    )
}
