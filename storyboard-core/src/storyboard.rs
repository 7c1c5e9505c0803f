use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use log::info;
use std::fs;

use crate::{
    Config,
    board::{Board, BoardStats, Column, ContentItem, ContentType},
    parse_date::normalize_date_input,
    parse_time::normalize_time_input,
    store::{BoardStore, FallbackStore, JsonFileStore, TomlFileStore},
    week::{WeekBoundaries, WeekView, filter_board, week_boundaries_for},
};

/// The default on-disk store: `board.toml`, backed up by `board.json`.
pub type FileStore = FallbackStore<TomlFileStore, JsonFileStore>;

/// Card fields supplied by the user. `None` leaves a field as it is.
///
/// `date` and `time` are raw text; they are normalized on the way in and kept
/// verbatim when they can't be understood.
#[derive(Debug, Clone, Default)]
pub struct CardFields {
    pub kind: Option<ContentType>,
    pub title: Option<String>,
    pub theme: Option<String>,
    pub date: Option<String>,
    /// An empty string clears the time.
    pub time: Option<String>,
    pub views: Option<u64>,
    pub subs: Option<u64>,
}

pub struct Storyboard<S: BoardStore = FileStore> {
    pub config: Config,
    store: S,
}

impl Storyboard {
    /// Creates a new `Storyboard` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Storyboard` with a specific `Config`, stored under its data dir.
    ///
    /// This also ensures that the data directory exists.
    pub fn with_config(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;
        let store = FallbackStore {
            primary: TomlFileStore::in_dir(&config.data_dir),
            fallback: JsonFileStore::in_dir(&config.data_dir),
        };
        Ok(Self { config, store })
    }
}

impl<S: BoardStore> Storyboard<S> {
    pub fn with_store(config: Config, store: S) -> Self {
        Self { config, store }
    }

    /// The saved board, or an empty one on first use.
    pub fn load_board(&self) -> Result<Board> {
        Ok(self.store.load()?.unwrap_or_default())
    }

    pub fn save_board(&self, board: &Board) -> Result<()> {
        self.store.save(board)
    }

    /// Canonical date string for `raw`, or `raw` itself when it doesn't parse.
    pub fn normalize_date(&self, raw: &str) -> String {
        normalize_date_input(
            raw,
            self.config.parse_options(),
            self.config.date_with_year,
        )
    }

    /// Canonical time string for `raw`; `None` when `raw` is blank.
    pub fn normalize_time(&self, raw: &str) -> Option<String> {
        normalize_time_input(raw)
    }

    /// This week and next week as seen from `now` in the board's zone.
    pub fn weeks(&self, now: DateTime<Utc>) -> WeekBoundaries {
        week_boundaries_for(self.config.today(now))
    }

    /// The saved board narrowed to `view`.
    pub fn view(&self, view: WeekView, weeks: &WeekBoundaries) -> Result<Board> {
        let board = self.load_board()?;
        Ok(filter_board(&board, view, weeks))
    }

    /// Adds a card to `column` and saves the board. A title is required.
    pub fn add_card(&self, column: Column, fields: CardFields) -> Result<ContentItem> {
        let mut board = self.load_board()?;
        let title = fields.title.clone().unwrap_or_default();
        let mut item = ContentItem::new(board.next_id()?, title);
        self.apply(&mut item, fields);

        board.add_item(column, item.clone())?;
        self.save_board(&board)?;
        info!("added card {} to {}", item.id, column.as_ref());
        Ok(item)
    }

    /// Updates the given fields of card `id` in place and saves the board.
    pub fn edit_card(&self, id: &str, fields: CardFields) -> Result<ContentItem> {
        let mut board = self.load_board()?;
        let mut item = board
            .find_item(id)
            .map(|(_, item)| item.clone())
            .ok_or_else(|| anyhow!("no card with id '{id}'"))?;
        self.apply(&mut item, fields);
        if item.title.trim().is_empty() {
            anyhow::bail!("a card needs a title");
        }

        board.update_item(item.clone());
        self.save_board(&board)?;
        info!("edited card {id}");
        Ok(item)
    }

    pub fn move_card(&self, id: &str, to: Column) -> Result<()> {
        let mut board = self.load_board()?;
        board.move_item(id, to)?;
        self.save_board(&board)?;
        info!("moved card {id} to {}", to.as_ref());
        Ok(())
    }

    pub fn delete_card(&self, id: &str) -> Result<ContentItem> {
        let mut board = self.load_board()?;
        let item = board
            .remove_item(id)
            .ok_or_else(|| anyhow!("no card with id '{id}'"))?;
        self.save_board(&board)?;
        info!("deleted card {id}");
        Ok(item)
    }

    pub fn stats(&self) -> Result<BoardStats> {
        Ok(self.load_board()?.stats())
    }

    fn apply(&self, item: &mut ContentItem, fields: CardFields) {
        if let Some(kind) = fields.kind {
            item.kind = kind;
        }
        if let Some(title) = fields.title {
            item.title = title.trim().to_string();
        }
        if let Some(theme) = fields.theme {
            item.theme = theme;
        }
        if let Some(date) = fields.date {
            item.date = self.normalize_date(&date);
        }
        if let Some(time) = fields.time {
            item.time = self.normalize_time(&time);
        }
        if fields.views.is_some() {
            item.views = fields.views;
        }
        if fields.subs.is_some() {
            item.subs = fields.subs;
        }
    }
}
