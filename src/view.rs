use crate::model::UiMessage;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Elements the controller needs on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    IngredientInput,
    GetRecipesButton,
    ShowMyRecipesButton,
    RecipesContainer,
    LoadingSpinner,
}

impl ElementId {
    pub const REQUIRED: [ElementId; 5] = [
        ElementId::IngredientInput,
        ElementId::GetRecipesButton,
        ElementId::ShowMyRecipesButton,
        ElementId::RecipesContainer,
        ElementId::LoadingSpinner,
    ];

    /// Identifier of the element in the page markup
    pub fn dom_id(&self) -> &'static str {
        match self {
            ElementId::IngredientInput => "ingredientInput",
            ElementId::GetRecipesButton => "getRecipesBtn",
            ElementId::ShowMyRecipesButton => "showMyRecipesBtn",
            ElementId::RecipesContainer => "recipesContainer",
            ElementId::LoadingSpinner => "loadingSpinner",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

/// Data attribute carried by ingredient tags
pub const TAG_ATTRIBUTE: &str = "data-ingredient";

/// The page surface the controller drives.
///
/// Methods take `&self` because delayed callbacks share the view with the
/// controller; implementations hold their state behind interior mutability.
pub trait View: Send + Sync {
    fn has_element(&self, id: ElementId) -> bool;

    fn input_value(&self) -> String;

    fn set_input_value(&self, value: &str);

    /// Whether a tag element carries `ingredient` in its data attribute
    fn has_tag(&self, ingredient: &str) -> bool;

    fn set_tag_transform(&self, ingredient: &str, transform: &str);

    fn set_loading_visible(&self, visible: bool);

    /// Replace the results container. `card_count` cards start hidden.
    fn set_results(&self, html: &str, card_count: usize);

    /// Fade and slide card `index` into place
    fn reveal_card(&self, index: usize, transition: Duration);

    fn toggle_card_expanded(&self, index: usize);

    fn push_toast(&self, id: u64, message: &UiMessage, html: &str);

    /// Start the slide-out of a toast
    fn begin_toast_exit(&self, id: u64);

    fn remove_toast(&self, id: u64);

    fn navigate(&self, path: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardState {
    pub visible: bool,
    pub expanded: bool,
    pub transition: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: UiMessage,
    pub html: String,
    pub leaving: bool,
}

#[derive(Debug, Default)]
struct PageState {
    elements: HashSet<ElementId>,
    input: String,
    tags: BTreeMap<String, String>,
    loading_visible: bool,
    loading_shown: usize,
    loading_hidden: usize,
    results: String,
    cards: Vec<CardState>,
    toasts: Vec<Toast>,
    message_log: Vec<UiMessage>,
    location: Option<String>,
}

/// In-memory page used by the CLI and by tests
#[derive(Debug)]
pub struct HeadlessPage {
    state: Mutex<PageState>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPage {
    /// A page with every required element present and no tags
    pub fn new() -> Self {
        let state = PageState {
            elements: ElementId::REQUIRED.into_iter().collect(),
            ..PageState::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn without_element(self, id: ElementId) -> Self {
        self.state().elements.remove(&id);
        self
    }

    pub fn with_tags<I, S>(self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut state = self.state();
            for ingredient in ingredients {
                state.tags.insert(ingredient.into(), String::new());
            }
        }
        self
    }

    pub fn with_input(self, value: &str) -> Self {
        self.state().input = value.to_string();
        self
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn tag_transform(&self, ingredient: &str) -> Option<String> {
        self.state().tags.get(ingredient).cloned()
    }

    pub fn loading_visible(&self) -> bool {
        self.state().loading_visible
    }

    pub fn loading_shown_count(&self) -> usize {
        self.state().loading_shown
    }

    pub fn loading_hidden_count(&self) -> usize {
        self.state().loading_hidden
    }

    pub fn results_html(&self) -> String {
        self.state().results.clone()
    }

    pub fn cards(&self) -> Vec<CardState> {
        self.state().cards.clone()
    }

    /// Toasts currently on the page
    pub fn toasts(&self) -> Vec<Toast> {
        self.state().toasts.clone()
    }

    /// Every message ever shown, in order
    pub fn message_log(&self) -> Vec<UiMessage> {
        self.state().message_log.clone()
    }

    pub fn location(&self) -> Option<String> {
        self.state().location.clone()
    }
}

impl View for HeadlessPage {
    fn has_element(&self, id: ElementId) -> bool {
        self.state().elements.contains(&id)
    }

    fn input_value(&self) -> String {
        self.state().input.clone()
    }

    fn set_input_value(&self, value: &str) {
        self.state().input = value.to_string();
    }

    fn has_tag(&self, ingredient: &str) -> bool {
        self.state().tags.contains_key(ingredient)
    }

    fn set_tag_transform(&self, ingredient: &str, transform: &str) {
        if let Some(current) = self.state().tags.get_mut(ingredient) {
            *current = transform.to_string();
        }
    }

    fn set_loading_visible(&self, visible: bool) {
        let mut state = self.state();
        state.loading_visible = visible;
        if visible {
            state.loading_shown += 1;
        } else {
            state.loading_hidden += 1;
        }
    }

    fn set_results(&self, html: &str, card_count: usize) {
        let mut state = self.state();
        state.results = html.to_string();
        state.cards = vec![CardState::default(); card_count];
    }

    fn reveal_card(&self, index: usize, transition: Duration) {
        if let Some(card) = self.state().cards.get_mut(index) {
            card.visible = true;
            card.transition = Some(transition);
        }
    }

    fn toggle_card_expanded(&self, index: usize) {
        if let Some(card) = self.state().cards.get_mut(index) {
            card.expanded = !card.expanded;
        }
    }

    fn push_toast(&self, id: u64, message: &UiMessage, html: &str) {
        let mut state = self.state();
        state.message_log.push(message.clone());
        state.toasts.push(Toast {
            id,
            message: message.clone(),
            html: html.to_string(),
            leaving: false,
        });
    }

    fn begin_toast_exit(&self, id: u64) {
        if let Some(toast) = self.state().toasts.iter_mut().find(|t| t.id == id) {
            toast.leaving = true;
        }
    }

    fn remove_toast(&self, id: u64) {
        self.state().toasts.retain(|t| t.id != id);
    }

    fn navigate(&self, path: &str) {
        self.state().location = Some(path.to_string());
    }
}
