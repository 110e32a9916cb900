//! schema_doc library - Table definition workbooks from database metadata
//!
//! Reads column metadata per schema from PostgreSQL (or a JSON dump), groups
//! it by table and lays each schema out as one sheet of formatted table blocks.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod grouping;
pub mod layout;
pub mod output;
pub mod types;
pub mod workbook;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
pub mod test_utils;
