pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod ingredients;
pub mod model;
pub mod render;
pub mod timers;
pub mod view;

// Re-export main types for convenience
pub use backend::{HttpBackend, RecipeBackend};
pub use config::ClientConfig;
pub use controller::PageController;
pub use error::PageError;
pub use events::{Action, UiEvent};
pub use ingredients::IngredientList;
pub use model::{BackendResponse, MessageKind, Recipe, UiMessage};
pub use view::{ElementId, HeadlessPage, View};
