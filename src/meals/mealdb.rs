use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ingredient_line, Meal, RecipeSource, NO_VIDEO_PLACEHOLDER};
use crate::config::AppConfig;

/// TheMealDB numbers ingredient slots 1 through 20.
const INGREDIENT_SLOTS: usize = 20;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("meal record has no {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Deserialize)]
struct RandomMealResponse {
    meals: Option<Vec<Option<MealRecord>>>,
}

#[derive(Debug, Deserialize)]
struct MealRecord {
    #[serde(rename = "strMeal")]
    name: Option<String>,
    #[serde(rename = "strYoutube")]
    youtube: Option<String>,
    #[serde(rename = "strMealThumb")]
    thumbnail: Option<String>,
    /// strIngredientN / strMeasureN and everything else we don't name
    #[serde(flatten)]
    fields: HashMap<String, serde_json::Value>,
}

impl MealRecord {
    fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }

    fn into_meal(self) -> Result<Meal, FetchError> {
        let ingredients = (1..=INGREDIENT_SLOTS)
            .filter_map(|i| {
                ingredient_line(
                    self.field(&format!("strIngredient{i}")),
                    self.field(&format!("strMeasure{i}")),
                )
            })
            .collect();

        let name = self.name.ok_or(FetchError::MissingField("strMeal"))?;
        let youtube = self
            .youtube
            .filter(|link| !link.trim().is_empty())
            .unwrap_or_else(|| NO_VIDEO_PLACEHOLDER.to_string());
        let thumbnail = self.thumbnail.filter(|url| !url.trim().is_empty());

        Ok(Meal {
            name,
            youtube,
            thumbnail,
            ingredients,
        })
    }
}

/// Decodes a `random.php` body. `Ok(None)` when the API had no meal for us.
fn parse_random_meal(body: &str) -> Result<Option<Meal>, FetchError> {
    let response: RandomMealResponse = serde_json::from_str(body)?;
    match response.meals.and_then(|meals| meals.into_iter().next().flatten()) {
        Some(record) => record.into_meal().map(Some),
        None => Ok(None),
    }
}

pub struct MealDbClient {
    client: Client,
    url: String,
}

impl MealDbClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Self::with_endpoint(
            &config.mealdb_url,
            Duration::from_secs(config.fetch_timeout_secs),
        )
    }

    pub fn with_endpoint(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// One attempt, no retries.
    async fn try_fetch(&self) -> Result<Option<Meal>, FetchError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_random_meal(&body)
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn fetch_random_meal(&self) -> Option<Meal> {
        match self.try_fetch().await {
            Ok(Some(meal)) => {
                tracing::debug!("Fetched meal {:?}", meal.name);
                Some(meal)
            }
            Ok(None) => {
                tracing::warn!("MealDB returned no meal");
                None
            }
            Err(e) => {
                tracing::warn!("Failed to fetch random meal: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const PASTA: &str = r#"{"meals":[{
        "idMeal":"1",
        "strMeal":"Pasta",
        "strYoutube":"http://v",
        "strMealThumb":"http://img/pasta.jpg",
        "strIngredient1":"Spaghetti",
        "strMeasure1":"200g",
        "strIngredient2":"",
        "strMeasure2":"1 tbsp",
        "strIngredient3":"  ",
        "strMeasure3":"",
        "strIngredient4":null,
        "strMeasure4":null,
        "strIngredient5":"Basil",
        "strMeasure5":" ",
        "strIngredient20":"Parmesan",
        "strMeasure20":"To taste"
    }]}"#;

    #[test]
    fn ingredients_skip_blanks_and_keep_order() {
        let meal = parse_random_meal(PASTA).unwrap().unwrap();
        assert_eq!(meal.name, "Pasta");
        assert_eq!(meal.youtube, "http://v");
        assert_eq!(meal.thumbnail.as_deref(), Some("http://img/pasta.jpg"));
        assert_eq!(
            meal.ingredients,
            vec!["200g Spaghetti", "Basil", "To taste Parmesan"]
        );
    }

    #[test]
    fn slots_past_twenty_are_ignored() {
        let body = r#"{"meals":[{"strMeal":"X","strIngredient21":"Ghost"}]}"#;
        let meal = parse_random_meal(body).unwrap().unwrap();
        assert!(meal.ingredients.is_empty());
    }

    #[test]
    fn blank_or_missing_video_uses_placeholder() {
        for body in [
            r#"{"meals":[{"strMeal":"Soup","strYoutube":""}]}"#,
            r#"{"meals":[{"strMeal":"Soup","strYoutube":"   "}]}"#,
            r#"{"meals":[{"strMeal":"Soup","strYoutube":null}]}"#,
            r#"{"meals":[{"strMeal":"Soup"}]}"#,
        ] {
            let meal = parse_random_meal(body).unwrap().unwrap();
            assert_eq!(meal.youtube, NO_VIDEO_PLACEHOLDER, "body: {body}");
            assert!(meal.thumbnail.is_none());
        }
    }

    #[test]
    fn empty_collections_mean_no_meal() {
        assert!(parse_random_meal(r#"{"meals":null}"#).unwrap().is_none());
        assert!(parse_random_meal(r#"{"meals":[]}"#).unwrap().is_none());
        assert!(parse_random_meal(r#"{"meals":[null]}"#).unwrap().is_none());
        assert!(parse_random_meal(r#"{}"#).unwrap().is_none());
    }

    #[test]
    fn malformed_bodies_are_errors() {
        assert!(matches!(
            parse_random_meal("<html>"),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            parse_random_meal(r#"{"meals":[{"strYoutube":"http://v"}]}"#),
            Err(FetchError::MissingField("strMeal"))
        ));
    }

    /// Serves exactly one canned HTTP response on a local port.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/api/json/v1/1/random.php")
    }

    fn client(url: &str) -> MealDbClient {
        MealDbClient::with_endpoint(url, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn fetches_a_meal_over_http() {
        let url = serve_once("200 OK", PASTA).await;
        let meal = client(&url).fetch_random_meal().await.expect("meal");
        assert_eq!(meal.name, "Pasta");
        assert_eq!(meal.ingredients.len(), 3);
    }

    #[tokio::test]
    async fn server_errors_yield_none() {
        let url = serve_once("500 Internal Server Error", "{}").await;
        assert!(client(&url).fetch_random_meal().await.is_none());
    }

    #[tokio::test]
    async fn garbage_body_yields_none() {
        let url = serve_once("200 OK", "not json at all").await;
        assert!(client(&url).fetch_random_meal().await.is_none());
    }

    #[tokio::test]
    async fn refused_connection_yields_none() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/random.php");
        assert!(client(&url).fetch_random_meal().await.is_none());
    }

    #[tokio::test]
    async fn slow_server_hits_the_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let url = format!("http://{addr}/random.php");
        let client = MealDbClient::with_endpoint(&url, Duration::from_millis(200)).unwrap();
        assert!(client.fetch_random_meal().await.is_none());
    }
}
