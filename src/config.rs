use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    /// Reads settings from the environment, after loading `.env` if one exists.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "db.json".into());
        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());

        Config {
            host,
            port,
            database_path: database_path.into(),
            static_dir: static_dir.into(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
