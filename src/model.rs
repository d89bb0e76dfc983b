use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// A recipe as sent by the backend.
///
/// Nothing here is validated: every field is optional and loosely typed so
/// that whatever the server sends can still be rendered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<DisplayText>,
    #[serde(default, deserialize_with = "present")]
    pub recipe_name: Option<DisplayText>,
    #[serde(default, deserialize_with = "present")]
    pub ingredients: Option<DisplayText>,
    #[serde(default, deserialize_with = "present")]
    pub instructions: Option<DisplayText>,
    #[serde(default, deserialize_with = "present")]
    pub user_name: Option<DisplayText>,
    #[serde(default, deserialize_with = "present")]
    pub created_at: Option<DisplayText>,
}

/// `None` only when the key is absent; an explicit `null` is kept
fn present<'de, D>(deserializer: D) -> Result<Option<DisplayText>, D::Error>
where
    D: Deserializer<'de>,
{
    DisplayText::deserialize(deserializer).map(Some)
}

impl Recipe {
    /// Card title: `name`, or `recipe_name` when `name` is absent or blank
    pub fn title(&self) -> String {
        first_truthy(&self.name)
            .or(self.recipe_name.as_ref())
            .map(ToString::to_string)
            .unwrap_or_else(|| UNDEFINED.to_string())
    }

    pub fn ingredients_text(&self) -> String {
        display_or_undefined(&self.ingredients)
    }

    pub fn instructions_text(&self) -> String {
        display_or_undefined(&self.instructions)
    }

    pub fn author(&self) -> String {
        first_truthy(&self.user_name)
            .map(ToString::to_string)
            .unwrap_or_else(|| "You".to_string())
    }

    pub fn created(&self) -> String {
        first_truthy(&self.created_at)
            .map(ToString::to_string)
            .unwrap_or_else(|| "Just now".to_string())
    }
}

/// Rendered in place of a field the server left out entirely
pub const UNDEFINED: &str = "undefined";

fn first_truthy(value: &Option<DisplayText>) -> Option<&DisplayText> {
    value.as_ref().filter(|v| v.is_truthy())
}

fn display_or_undefined(value: &Option<DisplayText>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| UNDEFINED.to_string())
}

/// Free-form display value.
///
/// The recommendation endpoint passes model output through untouched, so
/// `ingredients` and `instructions` may come back as arrays instead of
/// strings. Arrays display comma-joined without spaces.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DisplayText {
    Null,
    Text(String),
    Number(Number),
    Bool(bool),
    List(Vec<DisplayText>),
    Object(Map<String, Value>),
}

impl DisplayText {
    /// Blank strings, zero and `false` count as missing
    pub fn is_truthy(&self) -> bool {
        match self {
            DisplayText::Null => false,
            DisplayText::Text(text) => !text.is_empty(),
            DisplayText::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            DisplayText::Bool(flag) => *flag,
            DisplayText::List(_) | DisplayText::Object(_) => true,
        }
    }
}

impl fmt::Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayText::Null => f.write_str("null"),
            DisplayText::Text(text) => f.write_str(text),
            // Whole floats print without a trailing ".0"
            DisplayText::Number(number) => match number.as_f64().filter(|_| number.is_f64()) {
                Some(float) => write!(f, "{}", float),
                None => write!(f, "{}", number),
            },
            DisplayText::Bool(flag) => write!(f, "{}", flag),
            DisplayText::List(items) => {
                let joined = items
                    .iter()
                    .map(|item| match item {
                        DisplayText::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
            DisplayText::Object(_) => f.write_str("[object Object]"),
        }
    }
}

impl From<&str> for DisplayText {
    fn from(text: &str) -> Self {
        DisplayText::Text(text.to_string())
    }
}

impl From<String> for DisplayText {
    fn from(text: String) -> Self {
        DisplayText::Text(text)
    }
}

/// Success body of both endpoints
#[derive(Debug, Deserialize)]
pub struct RecipesPayload {
    pub recipes: Vec<Recipe>,
}

/// Request body of the recommendation endpoint
#[derive(Debug, Serialize)]
pub struct RecommendationRequest<'a> {
    pub ingredients: &'a str,
}

/// Raw backend answer: status plus whatever JSON came back
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: Value,
}

impl BackendResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of the body, if the server sent a usable one
    pub fn error_message(&self) -> Option<String> {
        self.body
            .get("error")
            .and_then(|error| serde_json::from_value::<DisplayText>(error.clone()).ok())
            .filter(DisplayText::is_truthy)
            .map(|error| error.to_string())
    }

    /// The `error` field shown verbatim, even when blank or `null`
    pub fn error_text(&self) -> String {
        self.body
            .get("error")
            .and_then(|error| serde_json::from_value::<DisplayText>(error.clone()).ok())
            .map(|error| error.to_string())
            .unwrap_or_else(|| UNDEFINED.to_string())
    }

    pub fn recipes(&self) -> Result<Vec<Recipe>, serde_json::Error> {
        RecipesPayload::deserialize(&self.body).map(|payload| payload.recipes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    Error,
    #[default]
    Info,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Error => "error",
            MessageKind::Info => "info",
        }
    }
}

/// Transient toast message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl UiMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recipe(value: Value) -> Recipe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_title_falls_back_to_recipe_name() {
        let r = recipe(json!({"recipe_name": "Stew", "ingredients": "beef", "instructions": "simmer"}));
        assert_eq!(r.title(), "Stew");

        let r = recipe(json!({"name": "", "recipe_name": "Stew"}));
        assert_eq!(r.title(), "Stew");

        let r = recipe(json!({"name": "Soup", "recipe_name": "Stew"}));
        assert_eq!(r.title(), "Soup");
    }

    #[test]
    fn test_missing_fields_render_like_the_page() {
        let r = recipe(json!({}));
        assert_eq!(r.title(), "undefined");
        assert_eq!(r.ingredients_text(), "undefined");
        assert_eq!(r.author(), "You");
        assert_eq!(r.created(), "Just now");
    }

    #[test]
    fn test_array_fields_join_with_commas() {
        let r = recipe(json!({
            "name": "Omelette",
            "ingredients": ["eggs", "salt", "butter"],
            "instructions": ["Whisk.", "Fry."]
        }));
        assert_eq!(r.ingredients_text(), "eggs,salt,butter");
        assert_eq!(r.instructions_text(), "Whisk.,Fry.");
    }

    #[test]
    fn test_non_string_values_are_displayed() {
        let r = recipe(json!({"id": 7, "name": 42, "ingredients": [1, null, {"a": 1}], "user_name": 0}));
        assert_eq!(r.title(), "42");
        assert_eq!(r.ingredients_text(), "1,,[object Object]");
        assert_eq!(r.author(), "You");
    }

    #[test]
    fn test_explicit_null_is_not_missing() {
        let r = recipe(json!({"name": null, "recipe_name": "Stew", "ingredients": null, "instructions": null}));
        assert_eq!(r.title(), "Stew");
        assert_eq!(r.ingredients_text(), "null");
        assert_eq!(r.instructions_text(), "null");

        let r = recipe(json!({"name": null, "recipe_name": null, "user_name": null}));
        assert_eq!(r.title(), "null");
        assert_eq!(r.author(), "You");
    }

    #[test]
    fn test_numbers_display_like_the_page() {
        let r = recipe(json!({"name": 1.0, "ingredients": [2.5, 3], "instructions": 1.0}));
        assert_eq!(r.title(), "1");
        assert_eq!(r.ingredients_text(), "2.5,3");
        assert_eq!(r.instructions_text(), "1");
    }

    #[test]
    fn test_error_message_extraction() {
        let response = BackendResponse::new(500, json!({"error": "Boom"}));
        assert_eq!(response.error_message().as_deref(), Some("Boom"));

        let response = BackendResponse::new(500, json!({"error": ""}));
        assert_eq!(response.error_message(), None);

        let response = BackendResponse::new(500, json!({}));
        assert_eq!(response.error_message(), None);

        let response = BackendResponse::new(500, json!([1, 2]));
        assert_eq!(response.error_message(), None);
    }

    #[test]
    fn test_error_text_is_verbatim() {
        assert_eq!(BackendResponse::new(402, json!({"error": "Quota"})).error_text(), "Quota");
        assert_eq!(BackendResponse::new(402, json!({"error": null})).error_text(), "null");
        assert_eq!(BackendResponse::new(402, json!({"error": ""})).error_text(), "");
        assert_eq!(BackendResponse::new(402, json!({})).error_text(), "undefined");
    }

    #[test]
    fn test_recipes_require_array() {
        let response = BackendResponse::new(200, json!({"recipes": []}));
        assert!(response.recipes().unwrap().is_empty());

        let response = BackendResponse::new(200, json!({"message": "ok"}));
        assert!(response.recipes().is_err());
    }

    #[test]
    fn test_success_range() {
        assert!(BackendResponse::new(200, Value::Null).is_success());
        assert!(BackendResponse::new(204, Value::Null).is_success());
        assert!(!BackendResponse::new(302, Value::Null).is_success());
        assert!(!BackendResponse::new(402, Value::Null).is_success());
    }
}
