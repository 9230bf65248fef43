//! thrl6p-manifest - builds a JSON catalog from a directory of `.thrl6p` tone patches

pub mod config;
pub mod manifest;
pub mod models;
