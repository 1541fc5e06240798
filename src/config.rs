use std::path::PathBuf;

use eyre::WrapErr;

use crate::cli::RootArgs;

const DATA_DIR_ENV: &str = "SCHWINGEN_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// `--data-dir` wins over the environment, which wins over `./data`.
    pub fn from_env_and_args(args: &RootArgs) -> eyre::Result<Self> {
        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => match std::env::var(DATA_DIR_ENV) {
                Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
                Ok(_) | Err(std::env::VarError::NotPresent) => PathBuf::from(DEFAULT_DATA_DIR),
                Err(e) => return Err(e).wrap_err_with(|| format!("invalid env var: {DATA_DIR_ENV}")),
            },
        };

        Ok(Self { data_dir })
    }

    pub fn ensure_dirs(&self) -> eyre::Result<()> {
        std::fs::create_dir_all(&self.data_dir).wrap_err("create data_dir")?;
        Ok(())
    }
}
