use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Creates the directory (and parents) if it does not exist yet.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes the contents atomically by staging to a temporary file.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Resolves the on-disk locations used by the recovery tooling.
pub struct PathResolver;

impl PathResolver {
    pub fn base_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("recovery_core"))
            .unwrap_or_else(|| PathBuf::from(".recovery_core"))
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join("config.json")
    }

    pub fn wallets_file_in(base: &Path) -> PathBuf {
        base.join("wallets.json")
    }

    pub fn recovered_wallet_file_in(base: &Path) -> PathBuf {
        base.join("recovered_wallet.json")
    }
}
