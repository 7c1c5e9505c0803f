use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use storyboard_core::{
    Storyboard,
    parse_date::{format_date, format_date_with_year, parse_date},
    parse_time::{format_time, parse_time},
};

pub fn parse_mode(
    cli: &Cli,
    renderer: &Renderer,
    storyboard: &Storyboard,
) -> Result<CliModeResult> {
    if let Some(text) = &cli.parse_date {
        match parse_date(text, storyboard.config.parse_options()) {
            Ok(date) if storyboard.config.date_with_year => {
                renderer.print_info(&format_date_with_year(&date))
            }
            Ok(date) => renderer.print_info(&format_date(&date)),
            Err(e) => renderer.print_error(&format!("{e}. It would be stored as typed.")),
        }
        return Ok(CliModeResult::Finish);
    }

    if let Some(text) = &cli.parse_time {
        match parse_time(text) {
            Ok(time) => renderer.print_info(&format_time(time)),
            Err(e) => renderer.print_error(&format!("{e}. It would be stored as typed.")),
        }
        return Ok(CliModeResult::Finish);
    }

    Ok(CliModeResult::NothingToDo)
}
