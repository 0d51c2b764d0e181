//! Client-facing messages of the response envelope.

pub const OK: &str = "ok";
pub const BAD_REQUEST: &str = "bad request";
pub const NOT_FOUND: &str = "not found";
pub const METHOD_NOT_ALLOWED: &str = "method not allowed";
pub const PAYLOAD_TOO_LARGE: &str = "payload too large";
pub const INTERNAL_ERROR: &str = "internal server error";
