use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FavoriteMeal {
    pub user_id: i64,
    pub meal_name: String,
    pub youtube_link: String,
}

/// A meal waiting behind a short callback token until the user taps the button.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PendingMeal {
    pub token: String,
    pub meal_name: String,
    pub youtube_link: String,
}
