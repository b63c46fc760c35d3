use terna::TernaClient;

fn main() -> anyhow::Result<()> {
    let client = TernaClient::from_env_values()?;
    let generation = client.generation();

    let capacity = generation.installed_capacity(Some(2023), None)?;
    if let Some(table) = capacity {
        println!("years: {:?}", table.index().as_year());
        println!("{}", table.to_polars_df()?);
    }

    let wind = generation.installed_capacity(Some(2023), Some("Wind"))?;
    println!("{:?}", wind.map(|t| t.height()));
    Ok(())
}
