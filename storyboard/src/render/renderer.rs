use super::theme::OneDark;
use storyboard_core::{Board, BoardStats, ContentItem, ContentType};
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(options: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::skin(),
            opts: options.unwrap_or(RenderOptions { use_color: true }),
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            println!("{}", message.with(OneDark::CYAN));
        } else {
            println!("{message}");
        }
    }

    pub fn print_error(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.with(OneDark::RED));
        } else {
            eprintln!("{message}");
        }
    }

    /// `7  [song] I Am A King (Identity) - Fri Jan 30 7:00 PM`
    pub fn print_card_line(&self, item: &ContentItem) {
        let mut id = format!("{:>3}", item.id);
        let mut kind = format!("[{}]", item.kind);
        let mut title = item.title.clone();
        let mut theme = if item.theme.is_empty() {
            String::new()
        } else {
            format!(" ({})", item.theme)
        };
        let mut when = match &item.time {
            Some(time) => format!("{} {time}", item.date),
            None => item.date.clone(),
        };
        let mut metrics = match (item.views, item.subs) {
            (None, None) => String::new(),
            (views, subs) => format!(
                "  {} views, +{} subs",
                views.unwrap_or(0),
                subs.unwrap_or(0)
            ),
        };

        if self.opts.use_color {
            id = id.with(OneDark::COMMENT).to_string();
            kind = kind.with(kind_color(item.kind)).to_string();
            title = title.with(OneDark::YELLOW).to_string();
            theme = theme.with(OneDark::COMMENT).to_string();
            when = when.with(OneDark::CYAN).to_string();
            metrics = metrics.with(OneDark::GREEN).to_string();
        }
        println!("{id} {kind} {title}{theme} - {when}{metrics}");
    }

    /// Prints every column under `heading`, empty columns included.
    pub fn print_board(&self, heading: &str, board: &Board) {
        self.print_md(&format!("# {heading}\n"));
        for (column, items) in board.columns() {
            println!();
            self.print_md(&format!("## {} ({})\n", column.title(), items.len()));
            if items.is_empty() {
                self.print_md("*nothing here*\n");
                continue;
            }
            for item in items {
                self.print_card_line(item);
            }
        }
    }

    pub fn print_stats(&self, stats: &BoardStats) {
        let md = format!(
            "|:-|-:|\n\
             | **Total views** | {} |\n\
             | **Subscribers gained** | {} |\n\
             | **Shorts** | {} |\n\
             | **Stories** | {} |\n\
             |-|-|\n",
            stats.total_views, stats.total_subs, stats.shorts, stats.stories
        );
        if self.opts.use_color {
            self.skin.print_text(&md);
        } else {
            println!("Total views: {}", stats.total_views);
            println!("Subscribers gained: {}", stats.total_subs);
            println!("Shorts: {}", stats.shorts);
            println!("Stories: {}", stats.stories);
        }
    }
}

fn kind_color(kind: ContentType) -> termimad::crossterm::style::Color {
    match kind {
        ContentType::Short => OneDark::BLUE,
        ContentType::Story => OneDark::PURPLE,
        ContentType::Song => OneDark::ORANGE,
    }
}
