//! Form catalog screen
//!
//! Lists the signed-in user's forms as cards and hosts the
//! template-selection modal for creating new ones.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::FormWithStats;
use crate::tui::components::TemplatePicker;
use crate::tui::format::format_created_date;
use crate::tui::ui::Styles;

pub struct DashboardScreen {
    pub forms: Vec<FormWithStats>,
    pub list_state: ListState,
    pub is_loading: bool,
    pub picker: TemplatePicker,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            forms: Vec::new(),
            list_state: ListState::default(),
            is_loading: true,
            picker: TemplatePicker::new(),
        }
    }

    /// Replace the catalog contents and reset the selection.
    pub fn set_forms(&mut self, forms: Vec<FormWithStats>) {
        self.forms = forms;
        self.list_state
            .select(if self.forms.is_empty() { None } else { Some(0) });
    }

    pub fn selected_form(&self) -> Option<&FormWithStats> {
        self.list_state.selected().and_then(|i| self.forms.get(i))
    }

    pub fn navigate_up(&mut self) {
        if self.forms.is_empty() {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.forms.len() - 1
        } else {
            selected - 1
        };
        self.list_state.select(Some(new_selected));
    }

    pub fn navigate_down(&mut self) {
        if self.forms.is_empty() {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((selected + 1) % self.forms.len()));
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect, user_name: Option<&str>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Form cards
                Constraint::Length(4), // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0], user_name);

        if self.is_loading {
            self.draw_loading(f, chunks[1]);
        } else if self.forms.is_empty() {
            self.draw_empty_state(f, chunks[1]);
        } else {
            self.draw_form_cards(f, chunks[1]);
        }

        self.draw_instructions(f, chunks[2]);
    }

    fn draw_title(&self, f: &mut Frame, area: Rect, user_name: Option<&str>) {
        let title_text = match user_name {
            Some(name) => format!("My Forms - {}", name),
            None => "My Forms".to_string(),
        };
        let title = Paragraph::new(title_text)
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_loading(&self, f: &mut Frame, area: Rect) {
        let loading = Paragraph::new("Loading forms...")
            .style(Styles::info())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(loading, area);
    }

    fn draw_empty_state(&self, f: &mut Frame, area: Rect) {
        let placeholder = vec![
            Line::from(Span::styled(
                "No forms yet",
                Styles::title(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Create your first form to get started",
                Styles::inactive(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" to create a form"),
            ]),
        ];
        let card = Paragraph::new(placeholder)
            .alignment(ratatui::layout::Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(card, area);
    }

    fn draw_form_cards(&mut self, f: &mut Frame, area: Rect) {
        let selected = self.list_state.selected();
        let items: Vec<ListItem> = self
            .forms
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if Some(i) == selected {
                    Styles::selected()
                } else {
                    Style::default()
                };

                let responses = match entry.response_count() {
                    Some(1) => "1 response".to_string(),
                    Some(n) => format!("{} responses", n),
                    None => String::new(),
                };
                let mut meta = format!(
                    "     Created on {}",
                    format_created_date(entry.form.created_at)
                );
                if !responses.is_empty() {
                    meta.push_str(" · ");
                    meta.push_str(&responses);
                }

                let content = vec![
                    Line::from(Span::styled(
                        entry.form.title.clone(),
                        style.add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        meta,
                        if Some(i) == selected { style } else { Styles::inactive() },
                    )),
                ];
                ListItem::new(content)
            })
            .collect();

        let title = format!("Forms ({})", self.forms.len());
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let instructions = vec![
            Line::from("↑/↓: Navigate | Enter/r: Responses | n: New form | R: Reload"),
            Line::from("e: Editor link | v: Public link | ?: Help | q: Quit"),
        ];
        let widget = Paragraph::new(instructions).style(Styles::info()).block(
            Block::default()
                .title("Instructions")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Form;

    fn entry(id: &str) -> FormWithStats {
        FormWithStats {
            form: Form {
                id: id.to_string(),
                title: format!("Form {}", id),
                created_at: None,
                custom_slug: None,
                elements: Vec::new(),
            },
            count: None,
        }
    }

    #[test]
    fn test_set_forms_selects_first() {
        let mut screen = DashboardScreen::new();
        screen.set_forms(vec![entry("f1"), entry("f2")]);
        assert_eq!(screen.selected_form().unwrap().form.id, "f1");
    }

    #[test]
    fn test_set_forms_empty_clears_selection() {
        let mut screen = DashboardScreen::new();
        screen.set_forms(vec![entry("f1")]);
        screen.set_forms(Vec::new());
        assert!(screen.selected_form().is_none());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut screen = DashboardScreen::new();
        screen.set_forms(vec![entry("f1"), entry("f2"), entry("f3")]);
        screen.navigate_up();
        assert_eq!(screen.selected_form().unwrap().form.id, "f3");
        screen.navigate_down();
        assert_eq!(screen.selected_form().unwrap().form.id, "f1");
    }
}
