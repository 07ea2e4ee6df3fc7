use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A form definition as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custom_slug: Option<String>,
    #[serde(default)]
    pub elements: Vec<FormElement>,
}

impl Form {
    /// The handle used in the form's public URL: the custom slug when one
    /// is set, the id otherwise.
    pub fn public_handle(&self) -> &str {
        self.custom_slug.as_deref().unwrap_or(&self.id)
    }
}

/// One question or block within a form's schema.
///
/// Element ids are unique within a form; the element order in
/// `Form::elements` is the display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: FormElementType,
    pub question: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormElementType {
    WelcomeScreen,
    EndScreen,
    Statement,
    ShortText,
    LongText,
    Email,
    PhoneNumber,
    MultipleChoice,
    Dropdown,
    YesNo,
    Rating,
    Number,
    Date,
    /// Element kinds introduced after this client was built. Treated as
    /// data-bearing and rendered through the default formatter.
    #[serde(other)]
    Unknown,
}

impl FormElementType {
    pub fn as_str(&self) -> &str {
        match self {
            FormElementType::WelcomeScreen => "Welcome Screen",
            FormElementType::EndScreen => "End Screen",
            FormElementType::Statement => "Statement",
            FormElementType::ShortText => "Short Text",
            FormElementType::LongText => "Long Text",
            FormElementType::Email => "Email",
            FormElementType::PhoneNumber => "Phone Number",
            FormElementType::MultipleChoice => "Multiple Choice",
            FormElementType::Dropdown => "Dropdown",
            FormElementType::YesNo => "Yes/No",
            FormElementType::Rating => "Rating",
            FormElementType::Number => "Number",
            FormElementType::Date => "Date",
            FormElementType::Unknown => "Unknown",
        }
    }

    /// Whether elements of this kind can hold an answer. Screens and
    /// statements are purely presentational and never appear as response
    /// table columns.
    pub fn is_data_bearing(&self) -> bool {
        !matches!(
            self,
            FormElementType::WelcomeScreen
                | FormElementType::EndScreen
                | FormElementType::Statement
        )
    }
}

/// A form together with the response total the listing endpoint attaches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormWithStats {
    #[serde(flatten)]
    pub form: Form,
    #[serde(rename = "_count", default)]
    pub count: Option<ResponseTotals>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTotals {
    pub responses: u64,
}

impl FormWithStats {
    pub fn response_count(&self) -> Option<u64> {
        self.count.as_ref().map(|c| c.responses)
    }
}

/// One respondent's full submission against a form.
///
/// `answers` maps element ids to raw answer values. A missing key means no
/// answer was given; keys for elements the form no longer contains are
/// ignored by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub answers: HashMap<String, Value>,
}

/// The authenticated user the backend resolved for our session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_form_deserializes_wire_format() {
        let json = r#"{
            "id": "f1",
            "title": "Booth Survey",
            "createdAt": "2026-03-01T12:00:00Z",
            "customSlug": "booth-2026",
            "elements": [
                {"id": "w1", "type": "WELCOME_SCREEN", "question": "Hi!"},
                {"id": "q1", "type": "SHORT_TEXT", "question": "Name?"}
            ]
        }"#;

        let form: Form = serde_json::from_str(json).unwrap();
        assert_eq!(form.id, "f1");
        assert_eq!(form.public_handle(), "booth-2026");
        assert_eq!(form.elements.len(), 2);
        assert_eq!(form.elements[0].element_type, FormElementType::WelcomeScreen);
        assert_eq!(form.elements[1].element_type, FormElementType::ShortText);
    }

    #[test]
    fn test_public_handle_falls_back_to_id() {
        let json = r#"{"id": "f2", "title": "Feedback"}"#;
        let form: Form = serde_json::from_str(json).unwrap();
        assert_eq!(form.public_handle(), "f2");
        assert!(form.created_at.is_none());
        assert!(form.elements.is_empty());
    }

    #[test]
    fn test_unrecognized_element_type_maps_to_unknown() {
        let json = r#"{"id": "x1", "type": "SIGNATURE_PAD", "question": "Sign here"}"#;
        let element: FormElement = serde_json::from_str(json).unwrap();
        assert_eq!(element.element_type, FormElementType::Unknown);
        assert!(element.element_type.is_data_bearing());
    }

    #[test]
    fn test_presentational_types_are_not_data_bearing() {
        assert!(!FormElementType::WelcomeScreen.is_data_bearing());
        assert!(!FormElementType::EndScreen.is_data_bearing());
        assert!(!FormElementType::Statement.is_data_bearing());
        assert!(FormElementType::ShortText.is_data_bearing());
        assert!(FormElementType::Rating.is_data_bearing());
    }

    #[test]
    fn test_form_with_stats_count_is_optional() {
        let with_count: FormWithStats = serde_json::from_str(
            r#"{"id": "f1", "title": "A", "_count": {"responses": 12}}"#,
        )
        .unwrap();
        assert_eq!(with_count.response_count(), Some(12));

        let without_count: FormWithStats =
            serde_json::from_str(r#"{"id": "f2", "title": "B"}"#).unwrap();
        assert_eq!(without_count.response_count(), None);
    }

    #[test]
    fn test_response_answers_default_to_empty() {
        let response: FormResponse = serde_json::from_str(
            r#"{"id": "r1", "submittedAt": "2026-03-02T09:30:00Z"}"#,
        )
        .unwrap();
        assert!(response.answers.is_empty());
        assert!(response.answers.get("q1").is_none());
    }
}
