//! Northwind catalogue domain: products, categories and their persistence.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod pagination;
pub mod validation;

mod patch;

#[cfg(test)]
mod test;
