use crate::view::{ElementId, TAG_ATTRIBUTE};

/// Something the user did on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    GetRecipesClicked,
    /// A key pressed while the ingredient input has focus
    InputKeyPress(String),
    /// An ingredient tag was clicked; carries its data attribute value
    TagClicked(String),
    ShowMyRecipesClicked,
    /// Click on the recipe card at this position
    CardClicked(usize),
}

/// What the controller does in response to an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GetRecipes,
    AddIngredient(String),
    ShowMyRecipes,
    ToggleCard(usize),
}

/// Handler a binding runs, before the event payload is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    GetRecipes,
    AddIngredient,
    ShowMyRecipes,
    ToggleCard,
}

impl ActionKind {
    /// Build the action, taking its argument from `event`
    fn with_payload(self, event: &UiEvent) -> Option<Action> {
        match (self, event) {
            (ActionKind::GetRecipes, _) => Some(Action::GetRecipes),
            (ActionKind::ShowMyRecipes, _) => Some(Action::ShowMyRecipes),
            (ActionKind::AddIngredient, UiEvent::TagClicked(ingredient)) => {
                Some(Action::AddIngredient(ingredient.clone()))
            }
            (ActionKind::ToggleCard, UiEvent::CardClicked(index)) => {
                Some(Action::ToggleCard(*index))
            }
            _ => None,
        }
    }
}

/// Where a binding listens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    Element(ElementId),
    /// Every element carrying this data attribute
    Attribute(&'static str),
    /// Every rendered recipe card
    RecipeCard,
}

/// One row of the page's listener table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub source: EventSource,
    pub event: &'static str,
    /// For key events, the only key that fires the handler
    pub key: Option<&'static str>,
    pub action: ActionKind,
}

pub const ENTER_KEY: &str = "Enter";

/// Every listener the page installs. `dispatch` resolves events through it.
pub static BINDINGS: [Binding; 5] = [
    Binding {
        source: EventSource::Element(ElementId::GetRecipesButton),
        event: "click",
        key: None,
        action: ActionKind::GetRecipes,
    },
    Binding {
        source: EventSource::Element(ElementId::IngredientInput),
        event: "keypress",
        key: Some(ENTER_KEY),
        action: ActionKind::GetRecipes,
    },
    Binding {
        source: EventSource::Attribute(TAG_ATTRIBUTE),
        event: "click",
        key: None,
        action: ActionKind::AddIngredient,
    },
    Binding {
        source: EventSource::Element(ElementId::ShowMyRecipesButton),
        event: "click",
        key: None,
        action: ActionKind::ShowMyRecipes,
    },
    Binding {
        source: EventSource::RecipeCard,
        event: "click",
        key: None,
        action: ActionKind::ToggleCard,
    },
];

impl Binding {
    /// Run this binding's filter and build the action for `event`
    pub fn resolve(&self, event: &UiEvent) -> Option<Action> {
        if let (Some(required), UiEvent::InputKeyPress(key)) = (self.key, event) {
            if key != required {
                return None;
            }
        }
        self.action.with_payload(event)
    }
}

impl UiEvent {
    /// The listener that delivers this event
    pub fn binding(&self) -> &'static Binding {
        match self {
            UiEvent::GetRecipesClicked => &BINDINGS[0],
            UiEvent::InputKeyPress(_) => &BINDINGS[1],
            UiEvent::TagClicked(_) => &BINDINGS[2],
            UiEvent::ShowMyRecipesClicked => &BINDINGS[3],
            UiEvent::CardClicked(_) => &BINDINGS[4],
        }
    }

    /// Map the event to its action. Keys other than Enter do nothing.
    pub fn action(&self) -> Option<Action> {
        self.binding().resolve(self)
    }
}
