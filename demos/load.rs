use chrono::{Duration, Utc};
use terna::api::DateRange;
use terna::{ClientConfig, TernaClient};

fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env_values()?
        .with_timeout(std::time::Duration::from_secs(30))
        .with_log_level(tracing::Level::DEBUG);
    let client = TernaClient::with_config(config)?;

    let today = Utc::now().date_naive();
    let range = DateRange::new(today - Duration::days(7), today - Duration::days(1));
    println!("range: {:?}", range);

    match client.load().total_load(Some(range), Some("Italy"))? {
        Some(table) => println!("{}", table.to_polars_df()?),
        None => println!("no data"),
    }

    let peaks = client.load().peak_valley_load(Some(range))?;
    if let Some(table) = peaks {
        println!("{}", table.to_polars_df()?);
    }
    Ok(())
}
