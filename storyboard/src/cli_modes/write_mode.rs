use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use storyboard_core::{CardFields, Storyboard};

pub fn write_mode(
    cli: &Cli,
    renderer: &Renderer,
    storyboard: &Storyboard,
) -> Result<CliModeResult> {
    if let Some(column) = cli.add {
        let item = storyboard.add_card(column, card_fields(cli))?;
        renderer.print_info(&format!("Added card {} to {}", item.id, column.title()));
        renderer.print_card_line(&item);
        return Ok(CliModeResult::Finish);
    }

    if let Some(id) = &cli.edit {
        let item = storyboard.edit_card(id, card_fields(cli))?;
        renderer.print_info(&format!("Updated card {}", item.id));
        renderer.print_card_line(&item);
        return Ok(CliModeResult::Finish);
    }

    Ok(CliModeResult::NothingToDo)
}

fn card_fields(cli: &Cli) -> CardFields {
    CardFields {
        kind: cli.kind,
        title: cli.title.clone(),
        theme: cli.theme.clone(),
        date: cli.date.clone(),
        time: cli.time.clone(),
        views: cli.views,
        subs: cli.subs,
    }
}
