//! Category pictures travel as standard base64 strings.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use salvo::http::StatusError;

use crate::extensions::*;

pub(crate) fn encode(picture: &[u8]) -> String {
    STANDARD.encode(picture)
}

pub(crate) fn decode(picture: Option<&str>) -> Result<Option<Vec<u8>>, StatusError> {
    picture
        .map(|encoded| STANDARD.decode(encoded.trim()))
        .transpose()
        .or_400("Picture must be base64")
}
