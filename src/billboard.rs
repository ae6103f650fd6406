//! Billboard Hot 100 chart fetching.
//!
//! The chart for a date lives at `{chart_url}/{date}`. Billboard rejects clients
//! that do not look like a browser, so the request carries a desktop Firefox
//! `User-Agent`. Song titles are the `h3` headings inside the nested chart
//! lists, read in document order.

use scraper::{Html, Selector};

use crate::{config::Config, http::HttpClient, Res};

pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:131.0) Gecko/20100101 Firefox/131.0";

pub const TITLE_SELECTOR: &str = "div ul li ul li h3";

/// Builds the chart page address. The date is used verbatim.
pub fn chart_url(config: &Config, date: &str) -> String {
    format!("{base}/{date}", base = config.chart_url, date = date)
}

/// Extracts the song titles from a chart page.
///
/// Each match's text is trimmed. Duplicates are kept. A page without matches
/// yields an empty list.
pub fn parse_chart(html: &str) -> Res<Vec<String>> {
    let selector = Selector::parse(TITLE_SELECTOR).map_err(|e| e.to_string())?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|heading| heading.text().collect::<String>().trim().to_string())
        .collect())
}

/// Downloads and parses the chart for `date`.
///
/// The response status is not checked. An error page simply parses to an
/// empty list, the same as a date without a published chart.
pub async fn fetch_chart<H: HttpClient>(http: &H, config: &Config, date: &str) -> Res<Vec<String>> {
    let url = chart_url(config, date);
    let response = http.get_page(&url, BROWSER_USER_AGENT).await?;
    parse_chart(&response.body)
}
