//! Response body helpers.

use serde::Serialize;

/// Every non-2xx JSON body: `{ "error": "<message>" }`.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_body(message: impl Into<String>) -> ErrorBody {
    ErrorBody {
        error: message.into(),
    }
}
