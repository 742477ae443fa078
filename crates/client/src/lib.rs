//! Northwind Client
//!
//! Typed access to the Northwind catalogue JSON API.

mod client;
mod error;
mod links;
mod models;

pub use client::{CategoriesClient, NorthwindClient, ProductsClient};
pub use error::ClientError;
pub use links::PageLinks;
pub use models::*;
