use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    billboard, config::Config, error, http::ReqwestClient, info, types::ChartTableRow, utils,
    warning,
};

/// `chartify chart`: prints the chart for a date without touching Spotify.
pub async fn chart(date: Option<String>) {
    let date = super::chart_date(date);
    if !utils::is_valid_chart_date(&date) {
        warning!("'{}' is not a valid YYYY-MM-DD date, the chart will likely be empty.", date);
    }

    let config = Config::from_env();

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching chart for {}...", date));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let titles = match billboard::fetch_chart(&ReqwestClient::new(), &config, &date).await {
        Ok(titles) => titles,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch chart: {}", e);
        }
    };
    pb.finish_and_clear();

    if titles.is_empty() {
        warning!("No chart entries found for {}.", date);
        return;
    }

    let rows: Vec<ChartTableRow> = titles
        .into_iter()
        .enumerate()
        .map(|(i, title)| ChartTableRow { rank: i + 1, title })
        .collect();

    println!("{}", Table::new(rows));
    info!("Go to: {}", billboard::chart_url(&config, &date));
}
