//! Categories

mod errors;
mod handlers;
mod picture;

pub(crate) use handlers::*;
