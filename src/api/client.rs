//! Recipe Client
//!
//! Caller-facing operations layered on the cache store and the request
//! dispatcher: ingredient search and recipe details, both cache-first, plus
//! cache maintenance passthroughs.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::api::dispatcher::Dispatcher;
use crate::api::transport::{HttpTransport, ProviderResponse, RequestTarget, Transport};
use crate::cache::{keys, CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{RecipeError, Result};
use crate::models::provider::{ProviderRecipe, ProviderRecipeInformation};
use crate::models::{Recipe, RecipeDetails, SearchFilters};

// == Recipe Client ==
/// Client for ingredient-based recipe search against the provider API.
///
/// Every network call funnels through the single-flight dispatcher; every
/// successful result lands in the shared cache before being returned.
pub struct RecipeClient {
    /// Provider API key, if configured
    api_key: Option<String>,
    /// Provider API base URL
    base_url: String,
    /// Recipes requested per search
    max_results: u32,
    /// Shared two-tier response cache
    cache: Arc<RwLock<CacheStore>>,
    /// Serialized request queue
    dispatcher: Dispatcher,
}

impl RecipeClient {
    // == Constructors ==
    /// Creates a client using the real HTTP transport.
    pub fn new(config: &Config, cache: Arc<RwLock<CacheStore>>) -> Self {
        Self::with_transport(config, cache, HttpTransport::new())
    }

    /// Creates a client over a custom transport. Useful for testing.
    pub fn with_transport<T: Transport>(
        config: &Config,
        cache: Arc<RwLock<CacheStore>>,
        transport: T,
    ) -> Self {
        let dispatcher = Dispatcher::new(
            transport,
            Duration::from_millis(config.rate_limit_delay_ms),
            config.max_retries,
        );

        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            max_results: config.max_results,
            cache,
            dispatcher,
        }
    }

    // == Search ==
    /// Searches recipes by ingredient list with optional filters.
    ///
    /// Cache-first: a valid cached result returns without any network
    /// activity. On a miss, exactly one request is dispatched, the payload
    /// is normalized into canonical records and cached under the derived
    /// key with the default TTL.
    pub async fn search_recipes(
        &self,
        ingredients: &[String],
        filters: &SearchFilters,
    ) -> Result<Vec<Recipe>> {
        if ingredients.is_empty() {
            return Err(RecipeError::NoIngredients);
        }

        let cache_key = keys::search_key(ingredients, filters);
        if let Some(cached) = self.cache.write().await.get(&cache_key) {
            debug!("Returning cached search results");
            return Ok(serde_json::from_value(cached)?);
        }

        let api_key = self.api_key.clone().ok_or(RecipeError::MissingApiKey)?;
        let url = self.search_url(&api_key, ingredients, filters)?;

        let response = self.dispatcher.dispatch(RequestTarget::get(url)).await?;
        let response = check_status(response)?;

        let raw: Vec<ProviderRecipe> = serde_json::from_str(&response.body)?;
        let recipes: Vec<Recipe> = raw.into_iter().map(Recipe::from_provider).collect();
        info!("Search returned {} recipes", recipes.len());

        self.cache
            .write()
            .await
            .set(&cache_key, serde_json::to_value(&recipes)?, None);

        Ok(recipes)
    }

    // == Details ==
    /// Fetches full recipe information by id, cache-first.
    pub async fn get_recipe_details(&self, recipe_id: u64) -> Result<RecipeDetails> {
        let cache_key = keys::recipe_key(recipe_id);
        if let Some(cached) = self.cache.write().await.get(&cache_key) {
            debug!("Returning cached recipe details");
            return Ok(serde_json::from_value(cached)?);
        }

        let api_key = self.api_key.clone().ok_or(RecipeError::MissingApiKey)?;
        let url = self.details_url(&api_key, recipe_id)?;

        let response = self.dispatcher.dispatch(RequestTarget::get(url)).await?;
        let response = check_status(response)?;

        let raw: ProviderRecipeInformation = serde_json::from_str(&response.body)?;
        let details = RecipeDetails::from_provider(raw);

        self.cache
            .write()
            .await
            .set(&cache_key, serde_json::to_value(&details)?, None);

        Ok(details)
    }

    // == Cache Passthroughs ==
    /// Empties both cache tiers.
    pub async fn clear_cache(&self) {
        info!("Clearing all cached responses");
        self.cache.write().await.clear();
    }

    /// Returns current cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == URL Builders ==
    /// Builds the find-by-ingredients URL with filter translation.
    fn search_url(
        &self,
        api_key: &str,
        ingredients: &[String],
        filters: &SearchFilters,
    ) -> Result<Url> {
        let mut url = parse_url(&format!("{}/findByIngredients", self.base_url))?;
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("apiKey", api_key);
            params.append_pair("ingredients", &ingredients.join(","));
            params.append_pair("number", &self.max_results.to_string());
            // Rank by maximizing used ingredients
            params.append_pair("ranking", "2");
            params.append_pair("ignorePantry", "true");
            params.append_pair("addRecipeInformation", "true");
            params.append_pair("fillIngredients", "true");

            if let Some(cooking_time) = filters.cooking_time {
                if cooking_time <= 60 {
                    params.append_pair("maxReadyTime", &cooking_time.to_string());
                } else {
                    params.append_pair("minReadyTime", "61");
                }
            }

            if let Some(diet) = filters.diet {
                if diet.is_intolerance() {
                    params.append_pair("intolerances", diet.api_value());
                } else {
                    params.append_pair("diet", diet.api_value());
                }
            }
        }
        Ok(url)
    }

    /// Builds the recipe information URL.
    fn details_url(&self, api_key: &str, recipe_id: u64) -> Result<Url> {
        let mut url = parse_url(&format!("{}/{}/information", self.base_url, recipe_id))?;
        url.query_pairs_mut()
            .append_pair("apiKey", api_key)
            .append_pair("includeNutrition", "true");
        Ok(url)
    }
}

/// Parses a URL, folding malformed base URLs into the transport error.
fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| RecipeError::Transport(format!("invalid request URL: {}", e)))
}

// == Status Mapping ==
/// Maps provider HTTP statuses onto the error taxonomy.
///
/// 402 is the provider's daily-quota signal, folded together with 429 into
/// the rate-limit error. These are HTTP-level outcomes, so the dispatcher
/// never retried them.
fn check_status(response: ProviderResponse) -> Result<ProviderResponse> {
    if response.is_success() {
        return Ok(response);
    }
    match response.status {
        402 | 429 => Err(RecipeError::RateLimited),
        401 => Err(RecipeError::InvalidApiKey),
        status => Err(RecipeError::Api(status)),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PersistentStore;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Transport double serving a fixed status/body and counting calls.
    #[derive(Default)]
    struct ScriptedTransport {
        status: u16,
        body: String,
        calls: Arc<AtomicUsize>,
        last_url: Arc<Mutex<Option<Url>>>,
    }

    impl ScriptedTransport {
        fn ok(body: &str) -> Self {
            Self {
                status: 200,
                body: body.to_string(),
                ..Self::default()
            }
        }

        fn status(status: u16) -> Self {
            Self {
                status,
                body: "{}".to_string(),
                ..Self::default()
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn fetch(
            &self,
            target: RequestTarget,
        ) -> impl Future<Output = Result<ProviderResponse>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_url.lock().unwrap() = Some(target.url);
            let response = ProviderResponse {
                status: self.status,
                body: self.body.clone(),
            };
            async move { Ok(response) }
        }
    }

    fn test_config() -> Config {
        Config {
            api_key: Some("test-key".to_string()),
            rate_limit_delay_ms: 10,
            ..Config::default()
        }
    }

    fn test_cache() -> (Arc<RwLock<CacheStore>>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let persistent = PersistentStore::with_dir(temp_dir.path().to_path_buf(), 1024 * 1024);
        (
            Arc::new(RwLock::new(CacheStore::new(persistent, 50, 300_000))),
            temp_dir,
        )
    }

    fn ingredients(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_ingredients_rejected_without_dispatch() {
        let (cache, _dir) = test_cache();
        let transport = ScriptedTransport::ok("[]");
        let calls = transport.calls.clone();
        let client = RecipeClient::with_transport(&test_config(), cache, transport);

        let result = client.search_recipes(&[], &SearchFilters::default()).await;

        assert!(matches!(result, Err(RecipeError::NoIngredients)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_api_key_rejected_without_dispatch() {
        let (cache, _dir) = test_cache();
        let transport = ScriptedTransport::ok("[]");
        let calls = transport.calls.clone();
        let config = Config {
            api_key: None,
            ..test_config()
        };
        let client = RecipeClient::with_transport(&config, cache, transport);

        let result = client
            .search_recipes(&ingredients(&["chicken"]), &SearchFilters::default())
            .await;

        assert!(matches!(result, Err(RecipeError::MissingApiKey)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_status_402_maps_to_rate_limited() {
        let (cache, _dir) = test_cache();
        let client =
            RecipeClient::with_transport(&test_config(), cache, ScriptedTransport::status(402));

        let result = client
            .search_recipes(&ingredients(&["chicken"]), &SearchFilters::default())
            .await;

        assert!(matches!(result, Err(RecipeError::RateLimited)));
    }

    #[tokio::test]
    async fn test_status_401_maps_to_invalid_key() {
        let (cache, _dir) = test_cache();
        let client =
            RecipeClient::with_transport(&test_config(), cache, ScriptedTransport::status(401));

        let result = client
            .search_recipes(&ingredients(&["chicken"]), &SearchFilters::default())
            .await;

        assert!(matches!(result, Err(RecipeError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_other_statuses_map_to_generic_api_error() {
        let (cache, _dir) = test_cache();
        let client =
            RecipeClient::with_transport(&test_config(), cache, ScriptedTransport::status(503));

        let result = client
            .search_recipes(&ingredients(&["chicken"]), &SearchFilters::default())
            .await;

        assert!(matches!(result, Err(RecipeError::Api(503))));
    }

    #[tokio::test]
    async fn test_search_url_translates_filters() {
        let (cache, _dir) = test_cache();
        let transport = ScriptedTransport::ok("[]");
        let last_url = transport.last_url.clone();
        let client = RecipeClient::with_transport(&test_config(), cache, transport);

        let filters = SearchFilters {
            cooking_time: Some(30),
            diet: Some(crate::models::Diet::GlutenFree),
            servings: None,
        };
        client
            .search_recipes(&ingredients(&["egg", "milk"]), &filters)
            .await
            .unwrap();

        let url = last_url.lock().unwrap().clone().unwrap();
        let query = url.query().unwrap().to_string();
        assert!(url.path().ends_with("/findByIngredients"));
        assert!(query.contains("ingredients=egg%2Cmilk"));
        assert!(query.contains("maxReadyTime=30"));
        assert!(query.contains("intolerances=gluten"));
        assert!(!query.contains("diet="));
    }

    #[tokio::test]
    async fn test_long_cooking_time_selects_min_ready_time() {
        let (cache, _dir) = test_cache();
        let transport = ScriptedTransport::ok("[]");
        let last_url = transport.last_url.clone();
        let client = RecipeClient::with_transport(&test_config(), cache, transport);

        let filters = SearchFilters {
            cooking_time: Some(90),
            ..SearchFilters::default()
        };
        client
            .search_recipes(&ingredients(&["beef"]), &filters)
            .await
            .unwrap();

        let url = last_url.lock().unwrap().clone().unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("minReadyTime=61"));
        assert!(!query.contains("maxReadyTime"));
    }

    #[tokio::test]
    async fn test_search_normalizes_and_caches() {
        let (cache, _dir) = test_cache();
        let body = r#"[{
            "id": 7,
            "title": "Garlic Chicken",
            "readyInMinutes": 25,
            "servings": 2,
            "spoonacularScore": 90.0,
            "summary": "<p>Simple &amp; fast.</p>",
            "usedIngredients": [{"name": "chicken"}],
            "missedIngredients": [{"name": "garlic"}]
        }]"#;
        let transport = ScriptedTransport::ok(body);
        let calls = transport.calls.clone();
        let client = RecipeClient::with_transport(&test_config(), cache, transport);

        let recipes = client
            .search_recipes(&ingredients(&["chicken"]), &SearchFilters::default())
            .await
            .unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Garlic Chicken");
        assert_eq!(recipes[0].rating, 4.5);
        assert_eq!(recipes[0].summary, "Simple & fast.");
        assert_eq!(recipes[0].used_ingredients, vec!["chicken"]);

        // Identical search again: served from cache, no second dispatch
        let again = client
            .search_recipes(&ingredients(&["chicken"]), &SearchFilters::default())
            .await
            .unwrap();
        assert_eq!(again, recipes);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_details_normalizes_and_caches() {
        let (cache, _dir) = test_cache();
        let body = r#"{
            "id": 7,
            "title": "Garlic Chicken",
            "analyzedInstructions": [{"steps": [
                {"number": 1, "step": "Sear the chicken."},
                {"number": 2, "step": "Add the garlic."}
            ]}],
            "extendedIngredients": [
                {"name": "chicken", "amount": 500.0, "unit": "g", "original": "500g chicken"}
            ],
            "nutrition": {"nutrients": [{"name": "Calories", "amount": 512.4}]}
        }"#;
        let transport = ScriptedTransport::ok(body);
        let calls = transport.calls.clone();
        let client = RecipeClient::with_transport(&test_config(), cache, transport);

        let details = client.get_recipe_details(7).await.unwrap();

        assert_eq!(details.instructions.len(), 2);
        assert_eq!(details.instructions[0].step, "Sear the chicken.");
        assert_eq!(details.ingredients[0].unit, "g");
        assert_eq!(details.nutrition.as_ref().unwrap().calories, 512);

        let again = client.get_recipe_details(7).await.unwrap();
        assert_eq!(again, details);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_search_is_not_cached() {
        let (cache, _dir) = test_cache();
        let client = RecipeClient::with_transport(
            &test_config(),
            cache.clone(),
            ScriptedTransport::status(500),
        );

        let result = client
            .search_recipes(&ingredients(&["chicken"]), &SearchFilters::default())
            .await;
        assert!(result.is_err());

        let stats = client.cache_stats().await;
        assert_eq!(stats.memory_items, 0);
        assert_eq!(stats.persistent_items, 0);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let (cache, _dir) = test_cache();
        let client =
            RecipeClient::with_transport(&test_config(), cache, ScriptedTransport::ok("[]"));

        client
            .search_recipes(&ingredients(&["rice"]), &SearchFilters::default())
            .await
            .unwrap();
        assert_eq!(client.cache_stats().await.memory_items, 1);

        client.clear_cache().await;

        let stats = client.cache_stats().await;
        assert_eq!(stats.memory_items, 0);
        assert_eq!(stats.persistent_items, 0);
    }
}
