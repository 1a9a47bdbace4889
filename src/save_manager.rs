//! Saving and loading battle snapshots with a checksummed binary format.
//!
//! Each side is keyed independently (`hunter.sav`, `monster.sav`), matching
//! the original's two save files. A missing or corrupt file on either side
//! means "no saved session" — load degrades to `None` instead of failing.

use crate::combatant::{Hunter, Monster};
use crate::constants::{HUNTER_SAVE_FILE, MONSTER_SAVE_FILE, SAVE_VERSION_MAGIC};
use crate::display::BattleSnapshot;
use crate::errors::{BattleError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Load/save contract the battle core consumes. The scheduler never calls
/// this; persistence happens only on explicit save actions.
pub trait PersistenceGateway {
    /// Persist both sides. Failures are surfaced once, not retried.
    fn save(&self, snapshot: &BattleSnapshot) -> Result<()>;

    /// Restore the last saved pair, or `None` when there is no usable save.
    fn load(&self) -> Option<BattleSnapshot>;
}

/// Hunter-side payload; carries the save timestamp for the whole session.
#[derive(Serialize, Deserialize)]
struct HunterRecord {
    hunter: Hunter,
    saved_at: i64,
}

/// Manages the two snapshot files with checksum verification.
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Save directory at the platform's config location.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "monster-hunter").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let save_dir = project_dirs.config_dir().to_path_buf();
        fs::create_dir_all(&save_dir)?;

        Ok(Self { save_dir })
    }

    /// Save directory at an explicit path (tests).
    pub fn at_dir(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
        }
    }

    pub fn save_exists(&self) -> bool {
        self.hunter_path().exists() && self.monster_path().exists()
    }

    fn hunter_path(&self) -> PathBuf {
        self.save_dir.join(HUNTER_SAVE_FILE)
    }

    fn monster_path(&self) -> PathBuf {
        self.save_dir.join(MONSTER_SAVE_FILE)
    }

    /// Write one record.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized record (variable length)
    /// - SHA256 checksum (32 bytes)
    fn write_record<T: Serialize>(path: &Path, record: &T) -> io::Result<()> {
        let data = bincode::serialize(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        // Checksum over version + length + data
        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        Ok(())
    }

    /// Read one record, verifying magic and checksum.
    fn read_record<T: DeserializeOwned>(path: &Path) -> io::Result<T> {
        let mut file = fs::File::open(path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl PersistenceGateway for SaveManager {
    fn save(&self, snapshot: &BattleSnapshot) -> Result<()> {
        let record = HunterRecord {
            hunter: snapshot.hunter.clone(),
            saved_at: chrono::Utc::now().timestamp(),
        };
        Self::write_record(&self.hunter_path(), &record).map_err(BattleError::SaveFailed)?;
        Self::write_record(&self.monster_path(), &snapshot.monster)
            .map_err(BattleError::SaveFailed)?;
        Ok(())
    }

    fn load(&self) -> Option<BattleSnapshot> {
        let record: HunterRecord = match Self::read_record(&self.hunter_path()) {
            Ok(record) => record,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("hunter save unusable, starting fresh: {e}");
                }
                return None;
            }
        };
        let monster: Monster = match Self::read_record(&self.monster_path()) {
            Ok(monster) => monster,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("monster save unusable, starting fresh: {e}");
                }
                return None;
            }
        };

        Some(BattleSnapshot {
            hunter: record.hunter,
            monster,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_snapshot() -> BattleSnapshot {
        let mut rng = ChaCha8Rng::seed_from_u64(30);
        let mut snapshot = BattleSnapshot::fresh(&mut rng);
        snapshot.hunter.level = 3;
        snapshot.hunter.exp = 45;
        snapshot.hunter.max_exp = 110;
        snapshot.hunter.health = 77;
        snapshot.monster.level = 4;
        snapshot.monster.health = 151;
        snapshot
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::at_dir(dir.path());
        let original = sample_snapshot();

        manager.save(&original).unwrap();
        assert!(manager.save_exists());

        let loaded = manager.load().expect("saved battle should load");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_without_save_is_fresh_session() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::at_dir(dir.path());

        assert!(!manager.save_exists());
        assert!(manager.load().is_none());
    }

    #[test]
    fn test_corrupt_file_is_fresh_session() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::at_dir(dir.path());
        manager.save(&sample_snapshot()).unwrap();

        // Flip one payload byte; the checksum catches it
        let path = dir.path().join(HUNTER_SAVE_FILE);
        let mut bytes = fs::read(&path).unwrap();
        bytes[14] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        assert!(manager.load().is_none());
    }

    #[test]
    fn test_missing_monster_file_is_fresh_session() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::at_dir(dir.path());
        manager.save(&sample_snapshot()).unwrap();

        fs::remove_file(dir.path().join(MONSTER_SAVE_FILE)).unwrap();

        assert!(manager.load().is_none());
    }

    #[test]
    fn test_wrong_magic_is_fresh_session() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SaveManager::at_dir(dir.path());
        manager.save(&sample_snapshot()).unwrap();

        let path = dir.path().join(MONSTER_SAVE_FILE);
        let mut bytes = fs::read(&path).unwrap();
        bytes[0] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        assert!(manager.load().is_none());
    }
}
