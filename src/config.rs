use clap::Parser;
use std::env;

/// Q&A forum web service
#[derive(Parser, Debug, PartialEq)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    /// Which errors we want to log (info, warn or error)
    #[clap(short, long, default_value = "warn")]
    pub log_level: String,
    /// Which PORT the server is listening to
    #[clap(short, long, default_value = "4000")]
    pub port: u16,
    /// Database user
    #[clap(long, default_value = "postgres")]
    pub database_user: String,
    /// Database password
    #[clap(long, default_value = "")]
    pub database_password: String,
    /// URL for the postgres database
    #[clap(long, default_value = "localhost")]
    pub database_host: String,
    /// PORT number for the database connection
    #[clap(long, default_value = "5432")]
    pub database_port: u16,
    /// Database name
    #[clap(long, default_value = "q_and_a")]
    pub database_name: String,
    /// Upper bound on pooled database connections
    #[clap(long, default_value = "5")]
    pub max_connections: u32,
}

impl Config {
    /// Reads `.env`, then the command line; `PORT` and `DATABASE_PORT` in
    /// the environment win over the flags.
    pub fn new() -> Result<Config, handle_errors::Error> {
        dotenv::dotenv().ok();
        Config::parse().with_env_overrides()
    }

    fn with_env_overrides(self) -> Result<Config, handle_errors::Error> {
        let port = env::var("PORT")
            .ok()
            .map(|val| val.parse::<u16>())
            .unwrap_or(Ok(self.port))
            .map_err(handle_errors::Error::ParseError)?;

        let database_port = env::var("DATABASE_PORT")
            .ok()
            .map(|val| val.parse::<u16>())
            .unwrap_or(Ok(self.database_port))
            .map_err(handle_errors::Error::ParseError)?;

        Ok(Config {
            port,
            database_port,
            ..self
        })
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.database_user,
            self.database_password,
            self.database_host,
            self.database_port,
            self.database_name
        )
    }
}
