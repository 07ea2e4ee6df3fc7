//! Response table screen
//!
//! Shows the submitted responses for the form picked on the dashboard.
//! The screen owns no network access: the dashboard fetches the records
//! and hands over an immutable snapshot.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{Form, FormResponse};
use crate::tui::components::ResponseTable;
use crate::tui::ui::Styles;

pub struct ResponsesScreen {
    pub table: Option<ResponseTable>,
}

impl ResponsesScreen {
    pub fn new() -> Self {
        Self { table: None }
    }

    /// Install the fetched snapshot for one form.
    pub fn set_data(&mut self, form: Form, responses: Vec<FormResponse>) {
        self.table = Some(ResponseTable::new(form, responses));
    }

    pub fn navigate_up(&mut self) {
        if let Some(table) = &mut self.table {
            table.navigate_up();
        }
    }

    pub fn navigate_down(&mut self) {
        if let Some(table) = &mut self.table {
            table.navigate_down();
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Table
                Constraint::Length(3), // Instructions
            ])
            .split(area);

        match &mut self.table {
            Some(table) => table.render(f, chunks[0]),
            None => {
                let empty = Paragraph::new("No form selected")
                    .style(Styles::inactive())
                    .block(
                        Block::default()
                            .title("Responses")
                            .borders(Borders::ALL)
                            .border_style(Styles::inactive_border()),
                    );
                f.render_widget(empty, chunks[0]);
            }
        }

        let instructions = Paragraph::new(Line::from(
            "↑/↓: Navigate | w: Web link | ESC: Back to forms | ?: Help | q: Quit",
        ))
        .style(Styles::info())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(instructions, chunks[1]);
    }
}
