use env_logger::Env;
use log::{error, info};

use longpub::{Client, Config, Error, Keys, WebSocketConnector};

#[tokio::main]
async fn main() {
  env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

  if let Err(err) = run().await {
    error!("{}", err);
    std::process::exit(1);
  }
}

async fn run() -> Result<(), Error> {
  let config = Config::from_env()?;

  let keys = match &config.secret_key {
    Some(secret_key) => Keys::from_hex(secret_key)?,
    None => Keys::generate()?,
  };
  let mut client = Client::new(WebSocketConnector, keys, config);
  let author = client.author().await?;

  info!(
    "Fetching articles of {} from {} relays",
    author,
    client.config().relays.len()
  );
  let d_tags = client.fetch_notes(&author).await?;

  if d_tags.is_empty() {
    info!("No articles found");
  }
  for d_tag in d_tags {
    println!("{d_tag}");
  }

  Ok(())
}
