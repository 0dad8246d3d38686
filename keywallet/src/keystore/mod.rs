//! Encrypted named-seed keystore
//!
//! Seeds are stored by name in a single JSON file under the keystore
//! directory, each entry sealed with the password chosen when it was created.

mod cipher;

pub use cipher::SealedSeed;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::error::{Error, Result};

const SEEDS_FILE: &str = "seeds.json";
const DEFAULT_DIR: &str = ".keywallet";

/// On-disk store of sealed seeds, keyed by name
pub struct Keystore {
    path: PathBuf,
    seeds: BTreeMap<String, SealedSeed>,
}

impl Keystore {
    /// Open the keystore in the given directory, creating it if needed
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
            }
        }

        let path = dir.join(SEEDS_FILE);
        let seeds = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, seeds })
    }

    /// The default keystore directory under the user's home directory
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Keystore("could not find home directory".to_string()))?;
        Ok(home.join(DEFAULT_DIR))
    }

    /// Whether a seed with this name exists
    pub fn has(&self, name: &str) -> bool {
        self.seeds.contains_key(name)
    }

    /// Names of all stored seeds
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.seeds.keys().map(String::as_str)
    }

    /// Seal a mnemonic under a password and persist it under `name`
    pub fn create(&mut self, name: &str, mnemonic: &str, password: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidInput("seed name cannot be empty".to_string()));
        }
        if self.has(name) {
            return Err(Error::Keystore(format!("seed {:?} already exists", name)));
        }

        let sealed = cipher::seal(mnemonic, password)?;
        self.seeds.insert(name.to_string(), sealed);
        self.save()?;
        tracing::debug!(name, "seed stored");
        Ok(())
    }

    /// Decrypt the mnemonic stored under `name`
    pub fn unseal(&self, name: &str, password: &str) -> Result<Zeroizing<String>> {
        let sealed = self
            .seeds
            .get(name)
            .ok_or_else(|| Error::SeedNotFound(name.to_string()))?;
        cipher::open(sealed, password)
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.seeds)?;
        fs::write(&self.path, json)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}
