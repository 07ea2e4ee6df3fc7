//! Response table component
//!
//! Renders submitted responses for one form: a header of data-bearing
//! element questions plus a leading "Submitted" column, one row per
//! response in the order the caller supplied.

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::{Form, FormElement, FormResponse};
use crate::tui::format::{format_response_value, format_time_ago};
use crate::tui::ui::{truncate_pad, Styles};

/// Display width of the "Submitted" column; wide enough for the longest
/// relative phrase ("less than a minute ago").
const SUBMITTED_WIDTH: usize = 22;
/// Display width of each question column.
const QUESTION_WIDTH: usize = 24;

const EMPTY_MESSAGE: &str = "No responses yet";

pub struct ResponseTable {
    pub form: Form,
    pub responses: Vec<FormResponse>,
    pub state: ListState,
}

impl ResponseTable {
    pub fn new(form: Form, responses: Vec<FormResponse>) -> Self {
        let mut state = ListState::default();
        if !responses.is_empty() {
            state.select(Some(0));
        }
        Self {
            form,
            responses,
            state,
        }
    }

    /// The form's elements that can hold answers, in display order.
    /// Welcome/end screens and statements never become columns.
    pub fn displayable_elements(&self) -> Vec<&FormElement> {
        self.form
            .elements
            .iter()
            .filter(|el| el.element_type.is_data_bearing())
            .collect()
    }

    /// Header cells: the timestamp column followed by one question per
    /// displayable element. An element with an empty question falls back
    /// to its type label so the column stays identifiable.
    pub fn header_cells(&self) -> Vec<String> {
        std::iter::once("Submitted".to_string())
            .chain(self.displayable_elements().iter().map(|el| {
                if el.question.is_empty() {
                    el.element_type.as_str().to_string()
                } else {
                    el.question.clone()
                }
            }))
            .collect()
    }

    /// Cells for one response row, aligned with `header_cells`. Answers
    /// keyed by element ids the form no longer contains are never
    /// rendered; missing answers yield empty cells.
    pub fn row_cells(
        &self,
        response: &FormResponse,
        now: chrono::DateTime<Utc>,
    ) -> Vec<String> {
        std::iter::once(format_time_ago(response.submitted_at, now))
            .chain(self.displayable_elements().iter().map(|el| {
                format_response_value(el, response.answers.get(&el.id))
            }))
            .collect()
    }

    /// Number of columns a full-width empty-state row spans: one per
    /// displayable element plus the timestamp column.
    pub fn column_count(&self) -> usize {
        self.displayable_elements().len() + 1
    }

    pub fn navigate_up(&mut self) {
        if self.responses.is_empty() {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.responses.len() - 1
        } else {
            selected - 1
        };
        self.state.select(Some(new_selected));
    }

    pub fn navigate_down(&mut self) {
        if self.responses.is_empty() {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        self.state.select(Some((selected + 1) % self.responses.len()));
    }

    /// Render the table. The relative timestamps are recomputed on every
    /// draw so they stay current as the terminal sits open.
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let now = Utc::now();
        let selected = self.state.selected();

        let header = Line::from(
            self.header_cells()
                .iter()
                .enumerate()
                .flat_map(|(i, cell)| {
                    let width = if i == 0 { SUBMITTED_WIDTH } else { QUESTION_WIDTH };
                    let mut spans = Vec::new();
                    if i > 0 {
                        spans.push(Span::styled(" │ ", Styles::title()));
                    }
                    spans.push(Span::styled(truncate_pad(cell, width), Styles::title()));
                    spans
                })
                .collect::<Vec<_>>(),
        );

        let mut items = vec![ListItem::new(header)];

        if self.responses.is_empty() {
            // One full-width row spanning every column.
            items.push(ListItem::new(Line::from(Span::styled(
                EMPTY_MESSAGE,
                Styles::inactive(),
            ))));
        } else {
            for (i, response) in self.responses.iter().enumerate() {
                let style = if Some(i) == selected {
                    Styles::selected()
                } else {
                    Style::default()
                };

                let cells = self.row_cells(response, now);
                let content = cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        let width = if col == 0 { SUBMITTED_WIDTH } else { QUESTION_WIDTH };
                        truncate_pad(cell, width)
                    })
                    .collect::<Vec<_>>()
                    .join(" │ ");
                items.push(ListItem::new(Line::from(Span::styled(content, style))));
            }
        }

        let title = if self.responses.is_empty() {
            format!("Responses - {} (empty)", self.form.title)
        } else {
            format!("Responses - {} ({})", self.form.title, self.responses.len())
        };

        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormElementType;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn element(id: &str, element_type: FormElementType, question: &str) -> FormElement {
        FormElement {
            id: id.to_string(),
            element_type,
            question: question.to_string(),
        }
    }

    fn form(elements: Vec<FormElement>) -> Form {
        Form {
            id: "f1".to_string(),
            title: "Survey".to_string(),
            created_at: None,
            custom_slug: None,
            elements,
        }
    }

    fn response(id: &str, answers: HashMap<String, serde_json::Value>) -> FormResponse {
        FormResponse {
            id: id.to_string(),
            submitted_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            answers,
        }
    }

    #[test]
    fn test_columns_exclude_presentational_elements_in_order() {
        let table = ResponseTable::new(
            form(vec![
                element("w1", FormElementType::WelcomeScreen, "Welcome"),
                element("q1", FormElementType::ShortText, "Name?"),
                element("s1", FormElementType::Statement, "Thanks!"),
                element("q2", FormElementType::Rating, "Score?"),
                element("e1", FormElementType::EndScreen, "Bye"),
            ]),
            Vec::new(),
        );

        let ids: Vec<&str> = table
            .displayable_elements()
            .iter()
            .map(|el| el.id.as_str())
            .collect();
        assert_eq!(ids, vec!["q1", "q2"]);
        assert_eq!(table.header_cells(), vec!["Submitted", "Name?", "Score?"]);
    }

    #[test]
    fn test_single_data_column_scenario() {
        let table = ResponseTable::new(
            form(vec![
                element("q1", FormElementType::ShortText, "Name?"),
                element("s1", FormElementType::Statement, "Thanks!"),
            ]),
            vec![response("r1", HashMap::from([("q1".to_string(), json!("Ana"))]))],
        );

        assert_eq!(table.header_cells(), vec!["Submitted", "Name?"]);

        // Reference clock equals the submission instant.
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let cells = table.row_cells(&table.responses[0], now);
        assert_eq!(cells, vec!["less than a minute ago", "Ana"]);
    }

    #[test]
    fn test_missing_answer_yields_empty_cell() {
        let table = ResponseTable::new(
            form(vec![
                element("q1", FormElementType::ShortText, "Name?"),
                element("q2", FormElementType::Email, "Email?"),
            ]),
            vec![response("r1", HashMap::from([("q1".to_string(), json!("Ana"))]))],
        );

        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let cells = table.row_cells(&table.responses[0], now);
        assert_eq!(cells[1], "Ana");
        assert_eq!(cells[2], "");
    }

    #[test]
    fn test_stale_answer_ids_are_never_rendered() {
        let table = ResponseTable::new(
            form(vec![element("q1", FormElementType::ShortText, "Name?")]),
            vec![response(
                "r1",
                HashMap::from([
                    ("q1".to_string(), json!("Ana")),
                    ("deleted-q".to_string(), json!("stale")),
                ]),
            )],
        );

        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let cells = table.row_cells(&table.responses[0], now);
        assert_eq!(cells.len(), 2);
        assert!(!cells.contains(&"stale".to_string()));
    }

    #[test]
    fn test_blank_question_falls_back_to_type_label() {
        let table = ResponseTable::new(
            form(vec![element("q1", FormElementType::Rating, "")]),
            Vec::new(),
        );
        assert_eq!(table.header_cells(), vec!["Submitted", "Rating"]);
    }

    #[test]
    fn test_empty_form_keeps_timestamp_column() {
        let table = ResponseTable::new(form(Vec::new()), Vec::new());
        assert_eq!(table.header_cells(), vec!["Submitted"]);
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn test_empty_state_spans_all_columns() {
        let table = ResponseTable::new(
            form(vec![
                element("q1", FormElementType::ShortText, "Name?"),
                element("q2", FormElementType::Rating, "Score?"),
            ]),
            Vec::new(),
        );
        // Placeholder row spans the timestamp column plus both questions.
        assert_eq!(table.column_count(), 3);
        assert!(table.state.selected().is_none());
    }

    #[test]
    fn test_row_order_follows_caller() {
        let mut r1 = response("r1", HashMap::new());
        r1.submitted_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let mut r2 = response("r2", HashMap::new());
        r2.submitted_at = Utc.with_ymd_and_hms(2026, 3, 1, 11, 0, 0).unwrap();

        // Caller supplies newest-first; the table must not reorder.
        let table = ResponseTable::new(
            form(vec![element("q1", FormElementType::ShortText, "Name?")]),
            vec![r2, r1],
        );
        assert_eq!(table.responses[0].id, "r2");
        assert_eq!(table.responses[1].id, "r1");
    }

    #[test]
    fn test_navigation_wraps() {
        let mut table = ResponseTable::new(
            form(vec![element("q1", FormElementType::ShortText, "Name?")]),
            vec![response("r1", HashMap::new()), response("r2", HashMap::new())],
        );
        assert_eq!(table.state.selected(), Some(0));
        table.navigate_up();
        assert_eq!(table.state.selected(), Some(1));
        table.navigate_down();
        assert_eq!(table.state.selected(), Some(0));
    }
}
