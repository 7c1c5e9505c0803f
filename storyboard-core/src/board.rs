//! The kanban board: content items grouped into four fixed columns.

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::parse_date::TBD;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentType {
    #[default]
    Short,
    Story,
    Song,
}

/// Board stages, in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Column {
    Ideas,
    Production,
    Review,
    Published,
}

impl Column {
    pub fn title(self) -> &'static str {
        match self {
            Column::Ideas => "Ideas",
            Column::Production => "In Production",
            Column::Review => "Ready / Review",
            Column::Published => "Published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ContentType,
    pub title: String,
    #[serde(default)]
    pub theme: String,
    /// Canonical date string when it parsed, the user's raw text otherwise.
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subs: Option<u64>,
}

impl ContentItem {
    /// A fresh card: a short with no date assigned yet.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ContentType::default(),
            title: title.into(),
            theme: String::new(),
            date: TBD.to_string(),
            time: None,
            views: None,
            subs: None,
        }
    }
}

/// Totals shown under the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    /// Views across published items.
    pub total_views: u64,
    /// Subscribers gained across published items.
    pub total_subs: u64,
    pub shorts: usize,
    pub stories: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub ideas: Vec<ContentItem>,
    #[serde(default)]
    pub production: Vec<ContentItem>,
    #[serde(default)]
    pub review: Vec<ContentItem>,
    #[serde(default)]
    pub published: Vec<ContentItem>,
}

impl Board {
    pub fn column(&self, column: Column) -> &[ContentItem] {
        match column {
            Column::Ideas => &self.ideas,
            Column::Production => &self.production,
            Column::Review => &self.review,
            Column::Published => &self.published,
        }
    }

    pub fn column_mut(&mut self, column: Column) -> &mut Vec<ContentItem> {
        match column {
            Column::Ideas => &mut self.ideas,
            Column::Production => &mut self.production,
            Column::Review => &mut self.review,
            Column::Published => &mut self.published,
        }
    }

    /// Columns in display order with their items.
    pub fn columns(&self) -> impl Iterator<Item = (Column, &[ContentItem])> {
        Column::iter().map(move |c| (c, self.column(c)))
    }

    pub fn len(&self) -> usize {
        self.columns().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_item(&self, id: &str) -> Option<(Column, &ContentItem)> {
        self.columns()
            .find_map(|(c, items)| items.iter().find(|i| i.id == id).map(|i| (c, i)))
    }

    /// Appends a new card to `column`. Titles may not be blank and ids must be unique.
    pub fn add_item(&mut self, column: Column, item: ContentItem) -> Result<()> {
        if item.title.trim().is_empty() {
            bail!("a card needs a title");
        }
        if self.find_item(&item.id).is_some() {
            bail!("a card with id '{}' already exists", item.id);
        }
        self.column_mut(column).push(item);
        Ok(())
    }

    /// Replaces the card with the same id, keeping its column and position.
    /// Returns `false` when no such card exists.
    pub fn update_item(&mut self, item: ContentItem) -> bool {
        let Some((column, _)) = self.find_item(&item.id) else {
            return false;
        };
        let items = self.column_mut(column);
        match items.iter().position(|i| i.id == item.id) {
            Some(pos) => {
                items[pos] = item;
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, id: &str) -> Option<ContentItem> {
        let (column, _) = self.find_item(id)?;
        let items = self.column_mut(column);
        let pos = items.iter().position(|i| i.id == id)?;
        Some(items.remove(pos))
    }

    /// Moves a card to the end of `to`. Moving within the same column is a no-op.
    pub fn move_item(&mut self, id: &str, to: Column) -> Result<()> {
        let (from, _) = self
            .find_item(id)
            .ok_or_else(|| anyhow!("no card with id '{id}'"))?;
        if from == to {
            return Ok(());
        }
        if let Some(item) = self.remove_item(id) {
            self.column_mut(to).push(item);
        }
        Ok(())
    }

    /// Next free numeric id (one past the largest numeric id on the board).
    pub fn next_id(&self) -> Result<String> {
        let max = self
            .columns()
            .flat_map(|(_, items)| items.iter())
            .filter_map(|i| i.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let next = max
            .checked_add(1)
            .ok_or_else(|| anyhow!("no numeric card id left after '{max}'"))?;
        Ok(next.to_string())
    }

    pub fn stats(&self) -> BoardStats {
        let mut stats = BoardStats::default();
        for item in &self.published {
            stats.total_views = stats.total_views.saturating_add(item.views.unwrap_or(0));
            stats.total_subs = stats.total_subs.saturating_add(item.subs.unwrap_or(0));
        }
        for (_, items) in self.columns() {
            for item in items {
                match item.kind {
                    ContentType::Short => stats.shorts += 1,
                    ContentType::Story => stats.stories += 1,
                    ContentType::Song => {}
                }
            }
        }
        stats
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(id: &str, kind: ContentType, date: &str) -> ContentItem {
        ContentItem {
            kind,
            date: date.to_string(),
            ..ContentItem::new(id, format!("Card {id}"))
        }
    }

    /// A small board shaped like a real planning week in late January 2026.
    pub(crate) fn sample_board() -> Board {
        Board {
            ideas: vec![
                item("1", ContentType::Short, "Future"),
                item("2", ContentType::Short, "Jan 31"),
            ],
            production: vec![
                item("3", ContentType::Story, "Fri Jan 31"),
                item("4", ContentType::Short, "Thu Jan 29"),
                item("6", ContentType::Short, "Wed Jan 28"),
            ],
            review: vec![
                item("7", ContentType::Song, "Fri Jan 31"),
                item("8", ContentType::Song, "Sat Feb 7"),
            ],
            published: vec![
                ContentItem {
                    views: Some(971),
                    subs: Some(3),
                    ..item("10", ContentType::Short, "Mon Jan 26")
                },
                ContentItem {
                    views: Some(894),
                    subs: Some(0),
                    ..item("11", ContentType::Short, "Sun Jan 25")
                },
            ],
        }
    }

    #[test]
    fn new_item_defaults() {
        let i = ContentItem::new("5", "Title");
        assert_eq!(i.kind, ContentType::Short);
        assert_eq!(i.date, "TBD");
        assert!(i.time.is_none());
    }

    #[test]
    fn column_parsing_and_titles() {
        assert_eq!("review".parse::<Column>().unwrap(), Column::Review);
        assert_eq!("Published".parse::<Column>().unwrap(), Column::Published);
        assert!("backlog".parse::<Column>().is_err());
        assert_eq!(Column::Production.title(), "In Production");
        assert_eq!("SONG".parse::<ContentType>().unwrap(), ContentType::Song);
    }

    #[test]
    fn add_requires_title_and_unique_id() {
        let mut board = sample_board();
        assert!(board.add_item(Column::Ideas, ContentItem::new("99", "  ")).is_err());
        assert!(board.add_item(Column::Ideas, ContentItem::new("1", "dup")).is_err());
        board.add_item(Column::Ideas, ContentItem::new("99", "New")).unwrap();
        assert_eq!(board.ideas.last().unwrap().id, "99");
    }

    #[test]
    fn update_keeps_position() {
        let mut board = sample_board();
        let mut edited = board.production[1].clone();
        edited.title = "Edited".to_string();
        assert!(board.update_item(edited));
        assert_eq!(board.production[1].title, "Edited");
        assert!(!board.update_item(ContentItem::new("404", "x")));
    }

    #[test]
    fn move_appends_to_target() {
        let mut board = sample_board();
        board.move_item("4", Column::Review).unwrap();
        assert_eq!(board.production.len(), 2);
        assert_eq!(board.review.last().unwrap().id, "4");
        assert_eq!(board.find_item("4").unwrap().0, Column::Review);
    }

    #[test]
    fn move_to_same_column_is_a_no_op() {
        let mut board = sample_board();
        let before = board.clone();
        board.move_item("3", Column::Production).unwrap();
        assert_eq!(board, before);
        assert!(board.move_item("404", Column::Ideas).is_err());
    }

    #[test]
    fn remove_and_next_id() {
        let mut board = sample_board();
        assert_eq!(board.next_id().unwrap(), "12");
        let removed = board.remove_item("11").unwrap();
        assert_eq!(removed.id, "11");
        assert!(board.remove_item("11").is_none());
        assert_eq!(board.next_id().unwrap(), "11");
        assert_eq!(Board::default().next_id().unwrap(), "1");
    }

    #[test]
    fn huge_ids_and_metrics_do_not_overflow() {
        let mut board = Board::default();
        board.published.push(ContentItem {
            views: Some(u64::MAX),
            subs: Some(u64::MAX),
            ..item(&u64::MAX.to_string(), ContentType::Short, "Mon Jan 26")
        });
        board.published.push(ContentItem {
            views: Some(5),
            subs: Some(1),
            ..item("2", ContentType::Short, "Sun Jan 25")
        });

        assert!(board.next_id().is_err());
        let stats = board.stats();
        assert_eq!(stats.total_views, u64::MAX);
        assert_eq!(stats.total_subs, u64::MAX);
    }

    #[test]
    fn stats_sum_published_and_count_kinds() {
        let stats = sample_board().stats();
        assert_eq!(stats.total_views, 1865);
        assert_eq!(stats.total_subs, 3);
        assert_eq!(stats.shorts, 6);
        assert_eq!(stats.stories, 1);
        assert_eq!(sample_board().len(), 9);
    }
}
