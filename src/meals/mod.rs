pub mod mealdb;

use async_trait::async_trait;

/// Shown instead of a video link when the recipe has none.
pub const NO_VIDEO_PLACEHOLDER: &str = "No video link available";

/// A recipe fetched for a single reply. Only `name` and `youtube` outlive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    pub name: String,
    pub youtube: String,
    pub thumbnail: Option<String>,
    /// "measure ingredient" lines in index order
    pub ingredients: Vec<String>,
}

/// Anything that can hand out a random meal.
///
/// Implementations swallow their own failures: `None` covers both
/// "nothing came back" and "the call went wrong".
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn fetch_random_meal(&self) -> Option<Meal>;
}

/// Formats one ingredient line, or `None` when the ingredient is blank.
pub fn ingredient_line(ingredient: Option<&str>, measure: Option<&str>) -> Option<String> {
    let ingredient = ingredient.map(str::trim).filter(|s| !s.is_empty())?;
    match measure.map(str::trim).filter(|s| !s.is_empty()) {
        Some(measure) => Some(format!("{measure} {ingredient}")),
        None => Some(ingredient.to_string()),
    }
}
