//! Candles command implementation.
//!
//! Pages through one security's candles and streams them to the chosen
//! output as they arrive.

use crate::display::{Format, open_output, row_spinner};
use anyhow::{Context, Result};
use chrono::FixedOffset;
use clap::Args;
use indicatif::ProgressBar;
use moexiss_lib::BASE_URL;
use moexiss_lib::prelude::*;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Arguments of the `candles` command.
#[derive(Debug, Args)]
pub(crate) struct CandlesArgs {
    /// Security symbol (e.g., SBER, USD000UTSTOM)
    pub(crate) symbol: String,

    /// Start of range (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS")
    #[arg(short, long)]
    pub(crate) from: String,

    /// End of range. Omit to read up to the latest candle.
    #[arg(short, long)]
    pub(crate) till: Option<String>,

    /// Market the security trades on (equity, currency)
    #[arg(short, long, default_value = "equity")]
    pub(crate) market: Market,

    /// Sampling interval (1, 10, 60, 24, 7, 31, 4 or m1, m10, h1, d1, w1, mn1, q1)
    #[arg(short, long, default_value = "1")]
    pub(crate) interval: Interval,

    /// UTC offset of exchange timestamps
    #[arg(long, default_value = "+03:00", allow_hyphen_values = true)]
    pub(crate) utc_offset: FixedOffset,

    /// Output file path. Defaults to stdout
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub(crate) format: Format,

    /// ISS base URL
    #[arg(long, default_value = BASE_URL)]
    pub(crate) base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "60")]
    pub(crate) timeout: u64,
}

impl CandlesArgs {
    /// Builds the library query from the parsed arguments.
    pub(crate) fn query(&self) -> CandleQuery {
        CandleQuery::new(self.market, self.symbol.as_str(), self.from.as_str())
            .with_interval(self.interval)
            .with_till(self.till.clone().unwrap_or_default())
            .with_utc_offset(self.utc_offset)
    }

    /// Builds the HTTP client configuration.
    pub(crate) fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        }
    }
}

/// Download candles for one security.
pub(crate) fn candles(args: &CandlesArgs, quiet: bool) -> Result<()> {
    let query = args.query();
    let client = IssClient::new(args.client_config()).context("Failed to create HTTP client")?;

    info!(%query, "opening candle cursor");
    let mut cursor =
        moexiss_lib::candles(client, &query).with_context(|| format!("Failed to query {query}"))?;

    let sink = open_output(args.output.as_deref())?;
    let mut writer = args.format.output_format().row_writer(sink);

    let progress = row_spinner(quiet, &query.to_string());
    let rows = export(&mut cursor, writer.as_mut(), &progress);
    progress.finish_and_clear();
    let rows = rows?;

    if let Some(err) = cursor.into_error() {
        return Err(err).with_context(|| format!("Stopped after {rows} rows"));
    }

    if !quiet {
        match &args.output {
            Some(path) => eprintln!("Wrote {rows} rows to {}", path.display()),
            None => eprintln!("Wrote {rows} rows"),
        }
    }

    Ok(())
}

/// Writes the header and every row the cursor yields, then flushes.
///
/// Returns the number of rows written. A cursor error is left on the
/// cursor for the caller to inspect; rows written before it stay written.
pub(crate) fn export<S: ChunkSource>(
    cursor: &mut Cursor<S>,
    writer: &mut dyn RowWriter,
    progress: &ProgressBar,
) -> Result<u64> {
    writer
        .write_header(cursor.column_names())
        .context("Failed to write header")?;

    let mut rows = 0u64;
    while cursor.advance() {
        if let Some(row) = cursor.current_row() {
            writer.write_row(row).context("Failed to write row")?;
            rows += 1;
            progress.inc(1);
        }
    }

    writer.flush().context("Failed to flush output")?;
    Ok(rows)
}
