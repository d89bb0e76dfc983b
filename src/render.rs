use crate::model::{MessageKind, Recipe, UiMessage};
use html_escape::{encode_double_quoted_attribute, encode_text};

pub const CARD_CLASS: &str = "recipe-card";

/// Shown instead of cards when the backend returned an empty list
pub const NO_RECIPES_NOTICE: &str =
    r#"<p style="text-align: center; color: #666; padding: 2rem;">No recipes found.</p>"#;

/// Keyframes and the expanded card rule injected once at page load
pub const PAGE_STYLES: &str = r#"
    @keyframes slideIn {
        from { transform: translateX(100%); opacity: 0; }
        to { transform: translateX(0); opacity: 1; }
    }

    @keyframes slideOut {
        from { transform: translateX(0); opacity: 1; }
        to { transform: translateX(100%); opacity: 0; }
    }

    .recipe-card.expanded {
        transform: scale(1.02) !important;
        box-shadow: 0 12px 35px rgba(0, 0, 0, 0.2) !important;
        z-index: 10;
    }
"#;

/// Render the metadata block shown on saved recipes
fn recipe_meta(recipe: &Recipe) -> String {
    format!(
        r#"
            <div class="recipe-meta">
                <div>👤 Created by: {}</div>
                <div>📅 {}</div>
            </div>
        "#,
        encode_text(&recipe.author()),
        encode_text(&recipe.created()),
    )
}

/// Render one recipe card.
///
/// Server text is escaped; labels and layout are fixed.
pub fn recipe_card(recipe: &Recipe, index: usize, show_meta: bool) -> String {
    let meta = if show_meta {
        recipe_meta(recipe)
    } else {
        String::new()
    };

    format!(
        r#"
            <div class="{card}" data-card-index="{index}">
                <h3>{title}</h3>
                <div class="recipe-ingredients">
                    <strong>🥘 Ingredients:</strong> {ingredients}
                </div>
                <div class="recipe-instructions">
                    <strong>👨‍🍳 Instructions:</strong><br>
                    {instructions}
                </div>
                {meta}
            </div>
        "#,
        card = CARD_CLASS,
        index = index,
        title = encode_text(&recipe.title()),
        ingredients = encode_text(&recipe.ingredients_text()),
        instructions = encode_text(&recipe.instructions_text()),
        meta = meta,
    )
}

/// Render every card in input order
pub fn recipe_cards(recipes: &[Recipe], show_meta: bool) -> String {
    recipes
        .iter()
        .enumerate()
        .map(|(index, recipe)| recipe_card(recipe, index, show_meta))
        .collect()
}

/// Inline style of a toast, colored by kind
pub fn toast_style(kind: MessageKind) -> String {
    let (background, color) = match kind {
        MessageKind::Error => ("#f8d7da", "#721c24"),
        MessageKind::Info => ("#d4edda", "#155724"),
    };

    format!(
        "position: fixed; top: 20px; right: 20px; padding: 15px 20px; \
         background: {}; color: {}; border-radius: 8px; \
         box-shadow: 0 4px 15px rgba(0, 0, 0, 0.1); z-index: 1000; \
         animation: slideIn 0.3s ease;",
        background, color
    )
}

/// Full toast element
pub fn toast(message: &UiMessage) -> String {
    format!(
        r#"<div class="message {}" style="{}">{}</div>"#,
        message.kind.as_str(),
        encode_double_quoted_attribute(&toast_style(message.kind)),
        encode_text(&message.text),
    )
}
