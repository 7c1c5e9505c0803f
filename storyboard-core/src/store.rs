//! Board persistence.
//!
//! The board is written to `board.toml` in the data directory, with a JSON copy
//! kept as a local fallback. Writes are whole-board, last writer wins.

use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::board::Board;

pub const BOARD_FILE: &str = "board.toml";
pub const FALLBACK_FILE: &str = "board.json";

pub trait BoardStore {
    /// The saved board, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Board>>;
    fn save(&self, board: &Board) -> Result<()>;
}

/// One array of tables per column:
///
/// ```toml
/// [[production]]
/// id = "3"
/// type = "story"
/// title = "Rome and the Golden King"
/// date = "Fri Jan 30"
/// time = "7:00 PM"
/// ```
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    pub path: PathBuf,
}

impl TomlFileStore {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(BOARD_FILE),
        }
    }
}

impl BoardStore for TomlFileStore {
    fn load(&self) -> Result<Option<Board>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let board = toml::from_str::<Board>(&s)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(board))
    }

    fn save(&self, board: &Board) -> Result<()> {
        let s = toml::to_string(board).context("serializing board")?;
        write_file(&self.path, &s)
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    pub path: PathBuf,
}

impl JsonFileStore {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(FALLBACK_FILE),
        }
    }
}

impl BoardStore for JsonFileStore {
    fn load(&self) -> Result<Option<Board>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let board = serde_json::from_str::<Board>(&s)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(board))
    }

    fn save(&self, board: &Board) -> Result<()> {
        let s = serde_json::to_string_pretty(board).context("serializing board")?;
        write_file(&self.path, &s)
    }
}

/// Keeps the board in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    board: Mutex<Option<Board>>,
}

impl MemoryStore {
    pub fn with_board(board: Board) -> Self {
        Self {
            board: Mutex::new(Some(board)),
        }
    }
}

impl BoardStore for MemoryStore {
    fn load(&self) -> Result<Option<Board>> {
        Ok(self
            .board
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, board: &Board) -> Result<()> {
        *self.board.lock().unwrap_or_else(PoisonError::into_inner) = Some(board.clone());
        Ok(())
    }
}

/// Reads from `primary`, falling back when it fails or has nothing saved.
/// Saves go to both; the save succeeds if either one does.
#[derive(Debug)]
pub struct FallbackStore<P, F> {
    pub primary: P,
    pub fallback: F,
}

impl<P: BoardStore, F: BoardStore> BoardStore for FallbackStore<P, F> {
    fn load(&self) -> Result<Option<Board>> {
        match self.primary.load() {
            Ok(Some(board)) => Ok(Some(board)),
            Ok(None) => self.fallback.load(),
            Err(e) => {
                warn!("primary board store failed, using fallback: {e:#}");
                self.fallback.load()
            }
        }
    }

    fn save(&self, board: &Board) -> Result<()> {
        let primary = self.primary.save(board);
        let fallback = self.fallback.save(board);
        match (primary, fallback) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), Ok(())) => {
                warn!("primary board store failed, saved fallback only: {e:#}");
                Ok(())
            }
            (Ok(()), Err(e)) => {
                warn!("fallback board store failed: {e:#}");
                Ok(())
            }
            (Err(e), Err(_)) => Err(e),
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating parent directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::sample_board;
    use tempfile::tempdir;

    #[test]
    fn toml_store_round_trip() {
        let tmp = tempdir().unwrap();
        let store = TomlFileStore::in_dir(&tmp.path().join("data"));
        assert!(store.load().unwrap().is_none());

        let board = sample_board();
        store.save(&board).unwrap();
        assert_eq!(store.load().unwrap(), Some(board));

        let s = fs::read_to_string(&store.path).unwrap();
        assert!(s.contains("[[production]]"));
        assert!(s.contains("type = \"story\""));
    }

    #[test]
    fn toml_store_reads_sparse_file() {
        let tmp = tempdir().unwrap();
        let store = TomlFileStore::in_dir(tmp.path());
        fs::write(
            &store.path,
            r#"
            [[review]]
            id = "7"
            title = "I Am A King"
            date = "Sat Feb 1"
            "#,
        )
        .unwrap();

        let board = store.load().unwrap().unwrap();
        assert!(board.ideas.is_empty());
        assert_eq!(board.review.len(), 1);
        assert_eq!(board.review[0].theme, "");
        assert!(board.review[0].views.is_none());
    }

    #[test]
    fn json_store_round_trip() {
        let tmp = tempdir().unwrap();
        let store = JsonFileStore::in_dir(tmp.path());
        let board = sample_board();
        store.save(&board).unwrap();
        assert_eq!(store.load().unwrap(), Some(board));
    }

    #[test]
    fn fallback_used_when_primary_is_broken() {
        let tmp = tempdir().unwrap();
        let primary = TomlFileStore::in_dir(tmp.path());
        fs::write(&primary.path, "this is [not toml").unwrap();
        let store = FallbackStore {
            primary,
            fallback: MemoryStore::with_board(sample_board()),
        };
        assert_eq!(store.load().unwrap(), Some(sample_board()));
    }

    #[test]
    fn fallback_used_when_primary_is_empty() {
        let store = FallbackStore {
            primary: MemoryStore::default(),
            fallback: MemoryStore::with_board(sample_board()),
        };
        assert_eq!(store.load().unwrap(), Some(sample_board()));
    }

    #[test]
    fn save_writes_both_and_survives_one_failure() {
        let tmp = tempdir().unwrap();
        // A directory where the file should be makes the primary write fail.
        let blocked = tmp.path().join("blocked");
        fs::create_dir_all(blocked.join(BOARD_FILE)).unwrap();
        let store = FallbackStore {
            primary: TomlFileStore::in_dir(&blocked),
            fallback: JsonFileStore::in_dir(tmp.path()),
        };

        store.save(&sample_board()).unwrap();
        assert_eq!(store.fallback.load().unwrap(), Some(sample_board()));
    }
}
