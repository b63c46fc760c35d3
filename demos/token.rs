use terna::TernaClient;

fn main() -> anyhow::Result<()> {
    let client = TernaClient::from_env_values()?;
    println!("client: {:?}", client);

    let token = client.obtain_token()?;
    println!("token: {:?}", token);

    // Second call is served from the cache.
    let again = client.obtain_token()?;
    assert_eq!(token.secret(), again.secret());
    Ok(())
}
