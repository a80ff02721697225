//! CSV input and output for the fundus CLI.

use std::fs::File;
use std::path::Path;

use fundus_traits::{FundusError, Result};
use polars::prelude::*;

/// Read a CSV file with a header row, parsing ISO dates.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .map_err(|e| FundusError::InvalidData(format!("{}: {e}", path.display())))?;

    let parse_opts = CsvParseOptions::default().with_try_parse_dates(true);

    Ok(CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1000))
        .with_parse_options(parse_opts)
        .into_reader_with_file_handle(file)
        .finish()?)
}

/// Write a frame as CSV, creating or truncating `path`.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .map_err(|e| FundusError::InvalidData(format!("{}: {e}", path.display())))?;

    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}
