//! Help screen for the dashboard TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::tui::ui::Styles;

/// Help sections
#[derive(Debug, Clone, PartialEq)]
pub enum HelpSection {
    Overview,
    Dashboard,
    Responses,
    Shortcuts,
}

impl HelpSection {
    pub fn as_str(&self) -> &str {
        match self {
            HelpSection::Overview => "Overview",
            HelpSection::Dashboard => "Form Catalog",
            HelpSection::Responses => "Response Table",
            HelpSection::Shortcuts => "Keyboard Shortcuts",
        }
    }

    fn content(&self) -> &str {
        match self {
            HelpSection::Overview => {
                "formdash is a terminal dashboard for your form-builder account.\n\n\
                 It lists the forms you own, shows the responses each form has \
                 collected, and can create a new form from a template. Editing a \
                 form happens in the web editor; the dashboard hands you the link."
            }
            HelpSection::Dashboard => {
                "The catalog lists your forms with their creation date and response \
                 totals.\n\n\
                 Enter or r opens the selected form's responses. n opens the \
                 template picker; choosing a template creates the form and prints \
                 the editor link. e and v put the editor and public links in the \
                 status bar. R reloads the list from the server."
            }
            HelpSection::Responses => {
                "One row per submitted response, newest first as the server \
                 returns them. The first column shows how long ago the response \
                 was submitted; the remaining columns follow the form's question \
                 order. Questions that are just screens or statements never get \
                 a column."
            }
            HelpSection::Shortcuts => {
                "Global:\n\
                 q - quit\n\
                 ? - toggle this help\n\
                 ESC - go back\n\n\
                 Catalog:\n\
                 Enter/r - responses, n - new form, R - reload\n\
                 e - editor link, v - public link\n\n\
                 Responses:\n\
                 ↑/↓ - move through rows"
            }
        }
    }
}

/// Help screen state
pub struct HelpScreen {
    pub current_section: usize,
    pub sections: Vec<HelpSection>,
    pub section_state: ListState,
}

impl HelpScreen {
    pub fn new() -> Self {
        let sections = vec![
            HelpSection::Overview,
            HelpSection::Dashboard,
            HelpSection::Responses,
            HelpSection::Shortcuts,
        ];

        let mut section_state = ListState::default();
        section_state.select(Some(0));

        Self {
            current_section: 0,
            sections,
            section_state,
        }
    }

    pub fn previous_section(&mut self) {
        if self.current_section > 0 {
            self.current_section -= 1;
            self.section_state.select(Some(self.current_section));
        }
    }

    pub fn next_section(&mut self) {
        if self.current_section < self.sections.len() - 1 {
            self.current_section += 1;
            self.section_state.select(Some(self.current_section));
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(0)])
            .split(area);

        let items: Vec<ListItem> = self
            .sections
            .iter()
            .map(|section| ListItem::new(Line::from(section.as_str().to_string())))
            .collect();

        let section_list = List::new(items)
            .block(
                Block::default()
                    .title("Help")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());

        f.render_stateful_widget(section_list, chunks[0], &mut self.section_state);

        let section = &self.sections[self.current_section];
        let content = Paragraph::new(section.content())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(section.as_str().to_string())
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(content, chunks[1]);
    }
}
