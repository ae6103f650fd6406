use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Asks for the chart date on stdin and returns the trimmed answer.
pub fn prompt_date() -> io::Result<String> {
    let stdin = io::stdin();
    read_date(&mut stdin.lock(), &mut io::stdout())
}

/// Writes the date prompt to `output` and reads one line from `input`.
pub fn read_date<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    write!(
        output,
        "What point in time would you like to travel to? Type the date in this format YYYY-MM-DD: "
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Whether `date` is a real calendar date in `YYYY-MM-DD` form.
///
/// Only used for a warning, the date is always sent as typed.
pub fn is_valid_chart_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok()
}

/// Playlist name for a chart date, e.g. `Billboard Top 100 - 2020`.
///
/// The year is everything before the first `-`, so an unparseable date still
/// produces a name.
pub fn playlist_name(date: &str) -> String {
    let year = date.split('-').next().unwrap_or_default();
    format!("Billboard Top 100 - {}", year)
}

pub fn playlist_description(date: &str) -> String {
    format!("Top 100 songs from Billboard on {}", date)
}

/// Keeps the resolved references and drops the misses, preserving order.
pub fn collect_resolved<I>(results: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    results.into_iter().flatten().collect()
}
