//! Template selection modal for creating a new form

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::ui::{centered_rect, Styles};

/// A starting point offered by the create-form dialog.
#[derive(Debug, Clone, Copy)]
pub struct FormTemplate {
    pub icon: &'static str,
    pub name: &'static str,
}

/// The fixed template set the backend understands.
pub static TEMPLATES: [FormTemplate; 4] = [
    FormTemplate {
        icon: "✍️",
        name: "Custom",
    },
    FormTemplate {
        icon: "🤠",
        name: "DAO Membership Application Form",
    },
    FormTemplate {
        icon: "🧩",
        name: "Product Feedback Form",
    },
    FormTemplate {
        icon: "🤝",
        name: "Booth Survey",
    },
];

/// Modal state for picking a template.
pub struct TemplatePicker {
    pub is_open: bool,
    pub state: ListState,
}

impl TemplatePicker {
    pub fn new() -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            is_open: false,
            state,
        }
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.state.select(Some(0));
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn navigate_up(&mut self) {
        let selected = self.state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            TEMPLATES.len() - 1
        } else {
            selected - 1
        };
        self.state.select(Some(new_selected));
    }

    pub fn navigate_down(&mut self) {
        let selected = self.state.selected().unwrap_or(0);
        self.state.select(Some((selected + 1) % TEMPLATES.len()));
    }

    pub fn selected(&self) -> Option<&'static FormTemplate> {
        self.state.selected().and_then(|i| TEMPLATES.get(i))
    }

    /// Draw the modal over the whole screen area. `busy` disables the
    /// selection hint while a creation request is in flight.
    pub fn render(&mut self, f: &mut Frame, area: Rect, busy: bool) {
        let popup_area = centered_rect(50, 50, area);
        f.render_widget(Clear, popup_area);

        let selected = self.state.selected();
        let items: Vec<ListItem> = TEMPLATES
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let style = if Some(i) == selected {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}  ", template.icon)),
                    Span::styled(template.name, style),
                ]))
            })
            .collect();

        let hint = if busy {
            "Creating..."
        } else {
            "↑/↓: Navigate | Enter: Create | ESC: Cancel"
        };

        let list = List::new(items).block(
            Block::default()
                .title("Select a Template")
                .title_bottom(hint)
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );

        f.render_stateful_widget(list, popup_area, &mut self.state);

        if busy {
            // Thin overlay strip so the in-flight state is unmissable.
            let strip = Rect {
                y: popup_area.y + popup_area.height.saturating_sub(2),
                height: 1,
                ..popup_area
            };
            f.render_widget(
                Paragraph::new("Creating form...").style(Styles::info()),
                strip,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_set_matches_product() {
        let names: Vec<&str> = TEMPLATES.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "Custom",
                "DAO Membership Application Form",
                "Product Feedback Form",
                "Booth Survey"
            ]
        );
    }

    #[test]
    fn test_open_resets_selection() {
        let mut picker = TemplatePicker::new();
        picker.navigate_down();
        picker.navigate_down();
        picker.open();
        assert_eq!(picker.selected().unwrap().name, "Custom");
        assert!(picker.is_open);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut picker = TemplatePicker::new();
        picker.navigate_up();
        assert_eq!(picker.selected().unwrap().name, "Booth Survey");
        picker.navigate_down();
        assert_eq!(picker.selected().unwrap().name, "Custom");
    }
}
