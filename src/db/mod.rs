pub mod models;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Idempotent; runs on every start.
    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS favorite_meals (
                user_id INTEGER,
                meal_name TEXT,
                youtube_link TEXT
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS pending_meals (
                token TEXT PRIMARY KEY,
                meal_name TEXT NOT NULL,
                youtube_link TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;

        // One token per distinct meal.
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_pending_meals_meal ON pending_meals(meal_name, youtube_link)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ── Favorite Operations ────────────────────────────────────────

    pub async fn add_favorite(
        &self,
        user_id: i64,
        meal_name: &str,
        youtube_link: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO favorite_meals (user_id, meal_name, youtube_link) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(meal_name)
        .bind(youtube_link)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_random_favorite(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Option<models::FavoriteMeal>> {
        let favorite = sqlx::query_as::<_, models::FavoriteMeal>(
            r#"
            SELECT user_id, meal_name, youtube_link
            FROM favorite_meals
            WHERE user_id = ?
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(favorite)
    }

    // ── Pending Meal Operations ────────────────────────────────────

    /// Parks a meal and returns its token. A meal that is already parked
    /// keeps the token it got the first time.
    pub async fn park_meal(&self, meal_name: &str, youtube_link: &str) -> anyhow::Result<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO pending_meals (token, meal_name, youtube_link)
            VALUES (?, ?, ?)
            ON CONFLICT(meal_name, youtube_link) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4().simple().to_string())
        .bind(meal_name)
        .bind(youtube_link)
        .execute(&self.pool)
        .await?;

        let row: (String,) = sqlx::query_as(
            "SELECT token FROM pending_meals WHERE meal_name = ? AND youtube_link = ?",
        )
        .bind(meal_name)
        .bind(youtube_link)
        .fetch_one(&self.pool)
        .await?;
        Ok(Uuid::parse_str(&row.0)?)
    }

    pub async fn get_parked_meal(
        &self,
        token: Uuid,
    ) -> anyhow::Result<Option<models::PendingMeal>> {
        let meal = sqlx::query_as::<_, models::PendingMeal>(
            "SELECT token, meal_name, youtube_link FROM pending_meals WHERE token = ?",
        )
        .bind(token.simple().to_string())
        .fetch_optional(&self.pool)
        .await?;
        Ok(meal)
    }
}
