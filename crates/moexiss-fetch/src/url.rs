//! ISS URL construction.

use moexiss_types::{CandleQuery, Market};
use url::Url;

use crate::IssError;

/// Base URL for the Moscow Exchange ISS API.
pub const BASE_URL: &str = "https://iss.moex.com/iss";

/// Query parameter carrying the pagination offset.
pub const START_PARAM: &str = "start";

/// Appends the candles endpoint for `symbol` on `market` to `base`.
///
/// The symbol becomes a single percent-encoded path segment.
///
/// # Example
///
/// ```
/// use moexiss_fetch::url::candles_url;
/// use moexiss_types::Market;
/// use url::Url;
///
/// let base = Url::parse("https://iss.moex.com/iss").unwrap();
/// let url = candles_url(&base, Market::Equity, "SBER").unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://iss.moex.com/iss/engines/stock/markets/shares/securities/SBER/candles.json"
/// );
/// ```
///
/// # Errors
///
/// Returns [`IssError::UrlBuild`] if `base` cannot carry a path.
pub fn candles_url(base: &Url, market: Market, symbol: &str) -> Result<Url, IssError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| IssError::UrlBuild(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(market.path_prefix())
        .push(symbol)
        .push("candles.json");
    Ok(url)
}

/// Builds the first-page URL for a query: endpoint plus every non-empty
/// request parameter. The pagination offset is set per page by
/// [`set_query_param`].
///
/// # Errors
///
/// Returns [`IssError::UrlBuild`] if `base` cannot carry a path.
pub fn query_url(base: &Url, query: &CandleQuery, series: &str) -> Result<Url, IssError> {
    let mut url = candles_url(base, query.market(), query.symbol())?;
    let columns_key = format!("{series}.columns");
    let columns = query.columns().joined();
    set_non_empty_query_params(
        &mut url,
        &[
            (columns_key.as_str(), columns.as_str()),
            ("from", query.from()),
            ("interval", query.interval().code()),
            ("till", query.till()),
        ],
    );
    Ok(url)
}

/// Sets `key` to `value`, replacing any existing value for `key`.
pub fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (k, v) in &kept {
        pairs.append_pair(k, v);
    }
    pairs.append_pair(key, value);
}

/// Sets every parameter whose value is non-empty; empty ones are skipped,
/// never sent as `key=`.
pub fn set_non_empty_query_params(url: &mut Url, params: &[(&str, &str)]) {
    for (key, value) in params {
        if !value.is_empty() {
            set_query_param(url, key, value);
        }
    }
}
