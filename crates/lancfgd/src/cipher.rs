//! RMCP+ cipher suite policy.
//!
//! The supported cipher list lives in a JSON file shipped with the
//! firmware image. The per-channel privilege levels live in a writable
//! JSON file seeded from a read-only default file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ipmi_transport_common::{TransportError, TransportResult};
use serde::Deserialize;
use tracing::{error, warn};

use crate::types::MAX_CS_RECORDS;

/// Default location of the cipher suite list.
pub const CIPHER_LIST_FILE: &str = "/usr/share/ipmi-providers/cipher_list.json";

/// Writable per-channel privilege file and its read-only seed.
pub const CS_PRIV_FILE: &str = "/var/lib/ipmi/cs_privilege_levels.json";
pub const CS_PRIV_DEFAULT_FILE: &str = "/usr/share/ipmi-providers/cs_privilege_levels.json";

#[derive(Debug, Deserialize)]
struct CipherRecord {
    #[serde(default)]
    cipher: u8,
}

/// Reads the cipher suite list file into its wire form.
///
/// The first byte of the wire form is reserved and always zero.
pub fn read_cipher_list(path: &Path) -> TransportResult<Vec<u8>> {
    let contents = fs::read_to_string(path).map_err(|err| {
        error!(path = %path.display(), %err, "cipher suite file not found");
        TransportError::config(path.display().to_string(), err.to_string())
    })?;
    let records: Vec<CipherRecord> = serde_json::from_str(&contents).map_err(|err| {
        error!(path = %path.display(), %err, "parsing cipher suite file failed");
        TransportError::config(path.display().to_string(), err.to_string())
    })?;
    let mut list = Vec::with_capacity(records.len() + 1);
    list.push(0x00);
    for record in &records {
        list.push(record.cipher);
    }
    Ok(list)
}

/// Lazily-loaded cipher list, cached only once a load succeeds so a
/// missing file is retried on the next request.
pub struct CipherList {
    path: PathBuf,
    cached: Option<Vec<u8>>,
}

impl CipherList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    /// The wire-form list, or `None` while the file remains unreadable.
    pub fn get(&mut self) -> Option<&[u8]> {
        if self.cached.is_none() {
            match read_cipher_list(&self.path) {
                Ok(list) => self.cached = Some(list),
                Err(_) => return None,
            }
        }
        self.cached.as_deref()
    }
}

/// Per-channel cipher suite privilege levels, one 4-bit level per record.
pub trait CipherPolicy: Send + Sync {
    fn get_levels(&self, channel: u8) -> TransportResult<[u8; MAX_CS_RECORDS]>;

    fn set_levels(&mut self, channel: u8, levels: &[u8; MAX_CS_RECORDS]) -> TransportResult<()>;
}

/// JSON-file-backed policy with a read-only default file fallback.
pub struct FileCipherPolicy {
    path: PathBuf,
    default_path: PathBuf,
}

impl FileCipherPolicy {
    pub fn new(path: impl Into<PathBuf>, default_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            default_path: default_path.into(),
        }
    }

    fn load(&self) -> TransportResult<HashMap<String, Vec<u8>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => {
                warn!(path = %self.path.display(), "privilege file missing, using defaults");
                fs::read_to_string(&self.default_path).map_err(|err| {
                    TransportError::config(self.default_path.display().to_string(), err.to_string())
                })?
            }
        };
        serde_json::from_str(&contents).map_err(|err| {
            TransportError::config(self.path.display().to_string(), err.to_string())
        })
    }

    fn store(&self, levels: &HashMap<String, Vec<u8>>) -> TransportResult<()> {
        let contents = serde_json::to_string_pretty(levels).map_err(|err| {
            TransportError::config(self.path.display().to_string(), err.to_string())
        })?;
        fs::write(&self.path, contents).map_err(|err| {
            TransportError::config(self.path.display().to_string(), err.to_string())
        })
    }
}

impl CipherPolicy for FileCipherPolicy {
    fn get_levels(&self, channel: u8) -> TransportResult<[u8; MAX_CS_RECORDS]> {
        let all = self.load()?;
        let mut levels = [0u8; MAX_CS_RECORDS];
        if let Some(stored) = all.get(&channel.to_string()) {
            for (slot, value) in levels.iter_mut().zip(stored.iter()) {
                *slot = value & 0x0f;
            }
        }
        Ok(levels)
    }

    fn set_levels(&mut self, channel: u8, levels: &[u8; MAX_CS_RECORDS]) -> TransportResult<()> {
        let mut all = self.load().unwrap_or_default();
        all.insert(channel.to_string(), levels.to_vec());
        self.store(&all)
    }
}
