//! Keyboards and reply texts.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};
use teloxide::utils::html;

use crate::db::models::FavoriteMeal;
use crate::meals::Meal;

pub const RANDOM_MEAL_BUTTON: &str = "🎲 Random meal";
pub const RANDOM_FAVORITE_BUTTON: &str = "⭐ Random favorite";
pub const ADD_FAVORITE_BUTTON: &str = "Add to favorites ⭐";

pub const GREETING: &str = "👋 Hi! I'm a bot that helps you find recipes!\nPick one of the options:";
pub const LOADING: &str = "🔄 Looking for a random meal...";
pub const FETCH_FAILED: &str = "Sorry, I couldn't get a random meal. Please try again!";
pub const NO_FAVORITES: &str = "You have no favorite meals yet!";
pub const FAVORITE_ADDED: &str = "Meal added to favorites! ⭐";
pub const FAVORITE_UNAVAILABLE: &str = "Sorry, that meal can't be saved anymore.";

/// Telegram's limit for photo captions.
pub const MAX_CAPTION_CHARS: usize = 1024;

/// The two menu choices reachable from the reply keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RandomMeal,
    RandomFavorite,
}

impl MenuChoice {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            RANDOM_MEAL_BUTTON => Some(Self::RandomMeal),
            RANDOM_FAVORITE_BUTTON => Some(Self::RandomFavorite),
            _ => None,
        }
    }
}

pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(RANDOM_MEAL_BUTTON),
        KeyboardButton::new(RANDOM_FAVORITE_BUTTON),
    ]])
    .resize_keyboard()
}

pub fn add_favorite_keyboard(callback_data: String) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        ADD_FAVORITE_BUTTON,
        callback_data,
    )]])
}

/// Plain-text reply: name and video link.
pub fn meal_text(name: &str, youtube: &str) -> String {
    format!("🍳 Meal: {name}\n📺 Video recipe: {youtube}")
}

pub fn favorite_text(favorite: &FavoriteMeal) -> String {
    meal_text(&favorite.meal_name, &favorite.youtube_link)
}

/// HTML reply with each ingredient as its own copyable code span.
pub fn meal_html(meal: &Meal) -> String {
    let mut text = format!(
        "🍳 Meal: {}\n📺 Video recipe: {}",
        html::escape(&meal.name),
        html::escape(&meal.youtube)
    );
    if !meal.ingredients.is_empty() {
        text.push_str("\n\nIngredients:");
        for ingredient in &meal.ingredients {
            text.push('\n');
            text.push_str(&html::code_inline(&format!("• {ingredient}")));
        }
    }
    text
}
