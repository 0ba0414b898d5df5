#![warn(clippy::all)]

use q_and_a_forum::{config::Config, run};

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    let config = Config::new()?;
    run(config).await
}
