//! Directory-backed storage: one `<slot>.json` file per slot

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::Storage;

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a save directory
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        if !root.exists() {
            log::info!("Creating save directory {}", root.display());
            fs::create_dir_all(&root)?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(format!("{slot}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: &str) -> Option<Vec<u8>> {
        fs::read(self.slot_path(slot)).ok()
    }

    /// Writes through a temporary file so a failed write keeps the old slot
    fn write(&mut self, slot: &str, data: &[u8]) -> io::Result<()> {
        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)
    }
}
