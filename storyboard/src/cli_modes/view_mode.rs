use crate::{Cli, render::Renderer};
use anyhow::{Result, bail};
use chrono::Utc;
use storyboard_core::{
    CanonicalDate, Storyboard, WeekBoundaries, WeekView, parse_date::parse_date,
    week::week_boundaries_for,
};

pub fn view_mode(cli: &Cli, renderer: &Renderer, storyboard: &Storyboard) -> Result<()> {
    let weeks = resolve_weeks(cli, storyboard)?;
    let board = storyboard.view(cli.view, &weeks)?;

    let heading = match weeks.window(cli.view) {
        Some(window) => window.label(),
        None => "All content".to_string(),
    };
    renderer.print_board(&heading, &board);

    if board.is_empty() && cli.view != WeekView::All {
        renderer.print_info("Nothing scheduled. Try `--view all`.");
    }
    Ok(())
}

/// Weeks around `--today` when given, otherwise around the current moment.
fn resolve_weeks(cli: &Cli, storyboard: &Storyboard) -> Result<WeekBoundaries> {
    let Some(text) = &cli.today else {
        return Ok(storyboard.weeks(Utc::now()));
    };
    match parse_date(text, storyboard.config.parse_options()) {
        Ok(CanonicalDate::Date(today)) => Ok(week_boundaries_for(today)),
        Ok(_) => bail!("'{text}' is not a calendar date"),
        Err(e) => Err(e.into()),
    }
}
