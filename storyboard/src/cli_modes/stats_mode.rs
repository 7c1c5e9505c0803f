use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use storyboard_core::Storyboard;

pub fn stats_mode(
    cli: &Cli,
    renderer: &Renderer,
    storyboard: &Storyboard,
) -> Result<CliModeResult> {
    if !cli.stats {
        return Ok(CliModeResult::NothingToDo);
    }
    let stats = storyboard.stats()?;
    renderer.print_stats(&stats);
    Ok(CliModeResult::Finish)
}
