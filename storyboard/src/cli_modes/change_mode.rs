use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use storyboard_core::Storyboard;

pub fn change_mode(
    cli: &Cli,
    renderer: &Renderer,
    storyboard: &Storyboard,
) -> Result<CliModeResult> {
    if let (Some(id), Some(to)) = (&cli.move_card, cli.to) {
        storyboard.move_card(id, to)?;
        renderer.print_info(&format!("Moved card {id} to {}", to.title()));
        return Ok(CliModeResult::Finish);
    }

    if let Some(id) = &cli.delete {
        let item = storyboard.delete_card(id)?;
        renderer.print_info(&format!("Deleted card {id}"));
        renderer.print_card_line(&item);
        return Ok(CliModeResult::Finish);
    }

    Ok(CliModeResult::NothingToDo)
}
