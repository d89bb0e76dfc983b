use crate::backend::{RecipeBackend, SUBSCRIPTION_PATH};
use crate::config::{ClientConfig, TimingConfig};
use crate::error::PageError;
use crate::events::{Action, UiEvent};
use crate::ingredients::IngredientList;
use crate::model::{BackendResponse, MessageKind, Recipe, UiMessage};
use crate::render;
use crate::timers;
use crate::view::{ElementId, View};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some ingredients!";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const RECOMMEND_FAILED_MESSAGE: &str = "Failed to get recipes";
pub const USER_RECIPES_FAILED_MESSAGE: &str = "Failed to load your recipes";
pub const UPGRADE_SUFFIX: &str = " Please upgrade your subscription.";

pub const RECOMMENDED_TITLE: &str = "AI Recommended Recipes";
pub const SAVED_TITLE: &str = "My Saved Recipes";

pub const PAYMENT_REQUIRED: u16 = 402;

const TAG_PRESSED: &str = "scale(0.95)";
const TAG_RESTING: &str = "translateY(-2px)";

/// Drives the recipe page: ingredient input, the two backend calls and
/// everything rendered from their answers.
pub struct PageController<B, V> {
    backend: B,
    view: Arc<V>,
    runtime: Handle,
    timings: TimingConfig,
    discard_stale: bool,
    generation: AtomicU64,
    next_toast: AtomicU64,
}

impl<B, V> PageController<B, V>
where
    B: RecipeBackend,
    V: View + 'static,
{
    /// Bind the controller to a page.
    ///
    /// Fails if any of the required elements is missing, or when called
    /// outside a tokio runtime (delayed page updates run on it).
    pub fn new(backend: B, view: Arc<V>, config: &ClientConfig) -> Result<Self, PageError> {
        if let Some(missing) = ElementId::REQUIRED
            .into_iter()
            .find(|id| !view.has_element(*id))
        {
            error!("Cannot start page controller: '{}' is missing", missing);
            return Err(PageError::MissingElement(missing));
        }

        let runtime = Handle::try_current().map_err(|e| {
            error!("Cannot start page controller without a runtime: {}", e);
            PageError::NoRuntime
        })?;

        Ok(Self {
            backend,
            view,
            runtime,
            timings: config.timings.clone(),
            discard_stale: config.discard_stale_responses,
            generation: AtomicU64::new(0),
            next_toast: AtomicU64::new(1),
        })
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Run the handler bound to `event`
    pub async fn dispatch(&self, event: UiEvent) {
        let Some(action) = event.action() else {
            return;
        };
        debug!("Dispatching {:?}", action);

        match action {
            Action::GetRecipes => self.get_recipes().await,
            Action::AddIngredient(ingredient) => self.add_ingredient(&ingredient),
            Action::ShowMyRecipes => self.show_my_recipes().await,
            Action::ToggleCard(index) => self.view.toggle_card_expanded(index),
        }
    }

    /// Append `ingredient` to the input field unless it is already listed
    pub fn add_ingredient(&self, ingredient: &str) {
        let mut ingredients = IngredientList::parse(&self.view.input_value());
        if ingredients.insert(ingredient) {
            self.view.set_input_value(&ingredients.serialize());
        }

        self.press_tag(ingredient);
    }

    fn press_tag(&self, ingredient: &str) {
        if !self.view.has_tag(ingredient) {
            debug!("No tag for '{}', skipping press animation", ingredient);
            return;
        }

        self.view.set_tag_transform(ingredient, TAG_PRESSED);
        let view = Arc::clone(&self.view);
        let ingredient = ingredient.to_string();
        timers::schedule(&self.runtime, self.timings.tag_press(), move || {
            view.set_tag_transform(&ingredient, TAG_RESTING);
        });
    }

    /// Ask the backend for recipes using the current input
    pub async fn get_recipes(&self) {
        let ingredients = self.view.input_value().trim().to_string();
        if ingredients.is_empty() {
            self.show_message(EMPTY_INPUT_MESSAGE, MessageKind::Error);
            return;
        }

        self.show_loading(true);
        self.view.set_results("", 0);

        let generation = self.begin_request();
        info!("Requesting recommendations for: {}", ingredients);
        let outcome = self.backend.recommend(&ingredients).await;

        if self.is_current(generation) {
            self.handle_recommendations(outcome);
        } else {
            debug!("Discarding stale recommendation response #{}", generation);
        }

        self.show_loading(false);
    }

    fn handle_recommendations(&self, outcome: Result<BackendResponse, PageError>) {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => return self.network_error(&e),
        };

        if response.is_success() {
            match response.recipes() {
                Ok(recipes) => self.display_recipes(&recipes, RECOMMENDED_TITLE, false),
                Err(e) => self.network_error(&PageError::from(e)),
            }
        } else if response.status == PAYMENT_REQUIRED {
            let reason = response.error_text();
            warn!("Subscription required: {}", reason);
            self.show_message(&format!("{}{}", reason, UPGRADE_SUFFIX), MessageKind::Error);

            let view = Arc::clone(&self.view);
            timers::schedule(&self.runtime, self.timings.redirect_delay(), move || {
                view.navigate(SUBSCRIPTION_PATH);
            });
        } else {
            let message = response
                .error_message()
                .unwrap_or_else(|| RECOMMEND_FAILED_MESSAGE.to_string());
            warn!("Recommendation failed with status {}: {}", response.status, message);
            self.show_message(&message, MessageKind::Error);
        }
    }

    /// Load the recipes the current user saved
    pub async fn show_my_recipes(&self) {
        self.show_loading(true);
        self.view.set_results("", 0);

        let generation = self.begin_request();
        info!("Requesting saved recipes");
        let outcome = self.backend.user_recipes().await;

        if self.is_current(generation) {
            self.handle_user_recipes(outcome);
        } else {
            debug!("Discarding stale saved-recipes response #{}", generation);
        }

        self.show_loading(false);
    }

    fn handle_user_recipes(&self, outcome: Result<BackendResponse, PageError>) {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => return self.network_error(&e),
        };

        if response.is_success() {
            match response.recipes() {
                Ok(recipes) => self.display_recipes(&recipes, SAVED_TITLE, true),
                Err(e) => self.network_error(&PageError::from(e)),
            }
        } else {
            let message = response
                .error_message()
                .unwrap_or_else(|| USER_RECIPES_FAILED_MESSAGE.to_string());
            warn!("Loading saved recipes failed with status {}: {}", response.status, message);
            self.show_message(&message, MessageKind::Error);
        }
    }

    fn network_error(&self, e: &PageError) {
        error!("Error: {}", e);
        self.show_message(NETWORK_ERROR_MESSAGE, MessageKind::Error);
    }

    /// Render `recipes` as cards and schedule their staggered entrance.
    ///
    /// `title` is not rendered.
    pub fn display_recipes(&self, recipes: &[Recipe], title: &str, show_meta: bool) {
        debug!("Displaying {} recipe(s) for '{}'", recipes.len(), title);

        if recipes.is_empty() {
            self.view.set_results(render::NO_RECIPES_NOTICE, 0);
            return;
        }

        let html = render::recipe_cards(recipes, show_meta);
        self.view.set_results(&html, recipes.len());

        let transition = self.timings.card_transition();
        for index in 0..recipes.len() {
            let view = Arc::clone(&self.view);
            timers::schedule(&self.runtime, self.timings.card_delay(index), move || {
                view.reveal_card(index, transition);
            });
        }
    }

    pub fn show_loading(&self, show: bool) {
        self.view.set_loading_visible(show);
    }

    /// Show a toast that slides out after the dwell time and is then removed
    pub fn show_message(&self, text: &str, kind: MessageKind) {
        let message = UiMessage {
            text: text.to_string(),
            kind,
        };
        let id = self.next_toast.fetch_add(1, Ordering::Relaxed);
        self.view.push_toast(id, &message, &render::toast(&message));

        let view = Arc::clone(&self.view);
        let exit = self.timings.message_exit();
        let runtime = self.runtime.clone();
        timers::schedule(&self.runtime, self.timings.message_dwell(), move || {
            view.begin_toast_exit(id);
            timers::schedule(&runtime, exit, move || view.remove_toast(id));
        });
    }

    fn begin_request(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.discard_stale || self.generation.load(Ordering::SeqCst) == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HeadlessPage;
    use async_trait::async_trait;
    use serde_json::json;

    struct NoBackend;

    #[async_trait]
    impl RecipeBackend for NoBackend {
        async fn recommend(&self, _ingredients: &str) -> Result<BackendResponse, PageError> {
            panic!("recommend should not be called");
        }

        async fn user_recipes(&self) -> Result<BackendResponse, PageError> {
            panic!("user_recipes should not be called");
        }
    }

    fn controller(page: HeadlessPage) -> PageController<NoBackend, HeadlessPage> {
        PageController::new(NoBackend, Arc::new(page), &ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_element_fails_fast() {
        let page = HeadlessPage::new().without_element(ElementId::RecipesContainer);
        let result = PageController::new(NoBackend, Arc::new(page), &ClientConfig::default());
        assert!(matches!(
            result,
            Err(PageError::MissingElement(ElementId::RecipesContainer))
        ));
    }

    #[tokio::test]
    async fn test_empty_input_never_calls_backend() {
        let page = controller(HeadlessPage::new().with_input("   "));
        page.get_recipes().await;

        let view = page.view();
        assert_eq!(view.message_log(), vec![UiMessage::error(EMPTY_INPUT_MESSAGE)]);
        assert_eq!(view.loading_shown_count(), 0);
    }

    #[test]
    fn test_outside_runtime_is_rejected() {
        let result = PageController::new(
            NoBackend,
            Arc::new(HeadlessPage::new()),
            &ClientConfig::default(),
        );
        assert!(matches!(result, Err(PageError::NoRuntime)));
    }

    #[test]
    fn test_message_dwell_holds_on_a_runtime_built_by_the_caller() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let page = runtime.block_on(async { controller(HeadlessPage::new()) });

        page.show_message("Saved", MessageKind::Info);
        assert_eq!(page.view().toasts().len(), 1);

        runtime.block_on(async { tokio::time::sleep(std::time::Duration::from_millis(2999)).await });
        assert_eq!(page.view().toasts().len(), 1);
        assert!(!page.view().toasts()[0].leaving);

        runtime.block_on(async { tokio::time::sleep(std::time::Duration::from_millis(302)).await });
        assert!(page.view().toasts().is_empty());
    }

    #[tokio::test]
    async fn test_display_empty_list_shows_notice() {
        let page = controller(HeadlessPage::new());
        page.display_recipes(&[], SAVED_TITLE, true);

        assert_eq!(page.view().results_html(), render::NO_RECIPES_NOTICE);
        assert!(page.view().cards().is_empty());
    }

    #[tokio::test]
    async fn test_title_is_not_rendered() {
        let page = controller(HeadlessPage::new());
        let recipe: Recipe = serde_json::from_value(json!({"name": "Soup"})).unwrap();
        page.display_recipes(&[recipe], RECOMMENDED_TITLE, false);

        assert!(!page.view().results_html().contains(RECOMMENDED_TITLE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_card_toggle_via_dispatch() {
        let page = controller(HeadlessPage::new());
        let recipe: Recipe = serde_json::from_value(json!({"name": "Soup"})).unwrap();
        page.display_recipes(&[recipe], RECOMMENDED_TITLE, false);

        page.dispatch(UiEvent::CardClicked(0)).await;
        assert!(page.view().cards()[0].expanded);
        page.dispatch(UiEvent::CardClicked(0)).await;
        assert!(!page.view().cards()[0].expanded);
    }
}
