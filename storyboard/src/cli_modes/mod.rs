mod change_mode;
mod cli_mode;
mod parse_mode;
mod stats_mode;
mod use_color;
mod view_mode;
mod write_mode;

pub use change_mode::change_mode;
pub use cli_mode::CliModeResult;
pub use parse_mode::parse_mode;
pub use stats_mode::stats_mode;
pub use use_color::use_color;
pub use view_mode::view_mode;
pub use write_mode::write_mode;
