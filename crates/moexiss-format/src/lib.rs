//! Output formatters for the moexiss candle downloader.
//!
//! This crate provides streaming writers for decoded rows:
//!
//! - [`CsvFormatter`] - CSV or TSV format
//! - [`JsonFormatter`] - Newline-delimited JSON format
//! - [`RowWriter`] - The header-then-rows sink both implement

#![doc(issue_tracker_base_url = "https://github.com/moexiss/moexiss/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

pub use crate::csv::{CsvFormatter, CsvRowWriter};
pub use formatter::{FormatError, OutputFormat, RowWriter};
pub use json::{JsonFormatter, JsonRowWriter};
