//! Flat result contract for hosts that cannot consume `Result`.

use crate::error::{Error, Result};

/// Uniform operation outcome.
///
/// On success `code` is the number of bytes written and the message is
/// empty; on failure `code` is the error's numeric classification (see
/// [`Error::code`]) and the message is non-empty. The two field sets are
/// never mixed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub success: bool,
    pub code: u64,
    pub error_message: String,
}

impl Report {
    /// Flatten an operation result into the uniform contract.
    pub fn from_result(result: &Result<u64>) -> Self {
        match result {
            Ok(bytes_written) => Report {
                success: true,
                code: *bytes_written,
                error_message: String::new(),
            },
            Err(e) => Report {
                success: false,
                code: e.code(),
                error_message: e.to_string(),
            },
        }
    }
}

impl From<Result<u64>> for Report {
    fn from(result: Result<u64>) -> Self {
        Report::from_result(&result)
    }
}
