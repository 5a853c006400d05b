//! Process configuration, from command-line flags or the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::db::Database;

/// Load a `.env` file from the working directory or one of its parents.
///
/// Variables already set in the process environment win over the file.
/// Returns the path of the file that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Where the store lives.
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    /// Path to the database file (defaults to the platform data directory)
    #[arg(long = "database", env = "DATABASE_URL")]
    pub path: Option<PathBuf>,
}

impl DatabaseArgs {
    /// Open the configured store and bring its schema up to date.
    pub fn open(&self) -> Result<Database> {
        let db = match &self.path {
            Some(path) => Database::open(path)?,
            None => Database::open_default()?,
        };
        db.migrate().context("Failed to migrate database")?;
        Ok(db)
    }
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Port for HTTP
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Directory of static assets (stylesheets, images)
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: PathBuf,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
            static_dir: PathBuf::from("public"),
            database: DatabaseArgs::default(),
        }
    }
}

impl ServeArgs {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn dotenv_values_feed_env_backed_flags() {
        // Values exported by the surrounding shell would shadow the file.
        if std::env::var_os("PORT").is_some() || std::env::var_os("STATIC_DIR").is_some() {
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "PORT=4000\nSTATIC_DIR=assets\n").unwrap();
        dotenvy::from_path(&env_file).unwrap();

        let cli = TestCli::try_parse_from(["todolist"]).unwrap();
        assert_eq!(cli.serve.port, 4000);
        assert_eq!(cli.serve.static_dir, PathBuf::from("assets"));

        let cli = TestCli::try_parse_from(["todolist", "--port", "5000"]).unwrap();
        assert_eq!(cli.serve.port, 5000);
    }

    #[test]
    fn default_binds_localhost_3000() {
        let addr = ServeArgs::default().bind_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let args = ServeArgs {
            host: "not a host".to_string(),
            ..ServeArgs::default()
        };
        assert!(args.bind_addr().is_err());
    }

    #[test]
    fn explicit_database_path_is_created_and_migrated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("todo.db");
        let args = DatabaseArgs {
            path: Some(path.clone()),
        };

        let db = args.open().unwrap();
        assert!(db.get_all_items().unwrap().is_empty());
        assert!(path.exists());
    }
}
