pub mod board;
pub mod config;
pub mod error;
pub mod keywords;
pub mod parse_date;
pub mod parse_time;
pub mod store;
pub mod storyboard;
pub mod week;

pub use board::{Board, BoardStats, Column, ContentItem, ContentType};
pub use config::Config;
pub use error::NormalizeError;
pub use parse_date::{CanonicalDate, ParseOptions};
pub use storyboard::{CardFields, Storyboard};
pub use week::{WeekBoundaries, WeekView, WeekWindow};
