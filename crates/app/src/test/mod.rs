//! Test support shared by repository and service tests.

pub(crate) mod helpers;

pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
pub(crate) use helpers::lazy_db;
