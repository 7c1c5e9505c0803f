mod cli_modes;
mod render;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use cli_modes::{
    CliModeResult, change_mode, parse_mode, stats_mode, use_color, view_mode, write_mode,
};
use log::debug;
use render::{ColorMode, RenderOptions, Renderer};
use std::process::ExitCode;
use storyboard_core::{Column, ContentType, Storyboard, WeekView};

/// Plan, schedule and track short-form content on a four-column board.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("write_mode").args(["add", "edit"])),
    group(ArgGroup::new("change_mode").args(["move_card", "delete"]).conflicts_with("write_mode")),
    group(
        ArgGroup::new("solo")
            .args(["path", "parse_date", "parse_time"])
            .conflicts_with_all(["write_mode", "change_mode"])
    ),
)]
pub struct Cli {
    /// Prints the board data directory
    #[arg(long, short)]
    pub path: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Which cards to show: `this-week`, `next-week` or `all`.
    #[arg(long, short, env = "SB_VIEW", default_value = "this-week")]
    pub view: WeekView,
    /// Treat this date as today when working out the weeks (e.g. `--today 2026-01-29`).
    #[arg(long)]
    pub today: Option<String>,
    /// Prints total views, subscribers gained and content counts.
    #[arg(long)]
    pub stats: bool,

    /// Adds a card to a column (`ideas`, `production`, `review`, `published`).
    #[arg(long, value_name = "COLUMN", requires = "title")]
    pub add: Option<Column>,
    /// Edits the card with this id.
    #[arg(long, value_name = "ID")]
    pub edit: Option<String>,
    /// Moves the card with this id to the column given with `--to`.
    #[arg(long = "move", value_name = "ID", requires = "to")]
    pub move_card: Option<String>,
    /// Target column for `--move`.
    #[arg(long, value_name = "COLUMN")]
    pub to: Option<Column>,
    /// Deletes the card with this id.
    #[arg(long, value_name = "ID")]
    pub delete: Option<String>,

    /// Card title.
    #[arg(long)]
    pub title: Option<String>,
    /// Card type: `short`, `story` or `song`.
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<ContentType>,
    /// Card theme (e.g. `Humor`, `BHM/Identity`).
    #[arg(long)]
    pub theme: Option<String>,
    /// Publish date (e.g. `Feb 6`, `02-06`, `2026-02-06`, `Future`, `TBD`).
    #[arg(long)]
    pub date: Option<String>,
    /// Publish time (e.g. `3pm`, `15:30`, `1530`). An empty value clears it.
    #[arg(long)]
    pub time: Option<String>,
    /// Views after publishing.
    #[arg(long)]
    pub views: Option<u64>,
    /// Subscribers gained after publishing.
    #[arg(long)]
    pub subs: Option<u64>,

    /// Shows how a date would be stored, without touching the board.
    #[arg(long, value_name = "TEXT")]
    pub parse_date: Option<String>,
    /// Shows how a time would be stored, without touching the board.
    #[arg(long, value_name = "TEXT")]
    pub parse_time: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sb: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let storyboard = Storyboard::new()?;
    debug!("board data in {}", storyboard.config.data_dir.display());

    let renderer = Renderer::new(Some(RenderOptions {
        use_color: use_color(&cli),
    }));

    if cli.path {
        renderer.print_info(&format!("{}", storyboard.config.data_dir.display()));
        return Ok(());
    }

    if let CliModeResult::Finish = parse_mode(&cli, &renderer, &storyboard)? {
        return Ok(());
    }

    if let CliModeResult::Finish = write_mode(&cli, &renderer, &storyboard)? {
        return Ok(());
    }

    if let CliModeResult::Finish = change_mode(&cli, &renderer, &storyboard)? {
        return Ok(());
    }

    if let CliModeResult::Finish = stats_mode(&cli, &renderer, &storyboard)? {
        return Ok(());
    }

    view_mode(&cli, &renderer, &storyboard)?;
    Ok(())
}
