//! Markets command implementation.

use moexiss_lib::prelude::*;

/// Renders the market table: one line per market with its candle endpoint.
pub(crate) fn market_table() -> String {
    let mut out = format!("{:<10} {}\n", "MARKET", "ENDPOINT");
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for market in Market::all() {
        out.push_str(&format!(
            "{:<10} {}\n",
            market.as_str(),
            market.endpoint_template()
        ));
    }
    out
}

/// List supported markets and their candle endpoints.
pub(crate) fn list_markets() {
    print!("{}", market_table());
    println!("\nTotal: {} markets", Market::all().len());
}
