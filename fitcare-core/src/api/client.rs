//! HTTP client for the Fitness2Care REST service.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::error::ApiError;
use super::GoalApi;
use crate::models::{Goal, GoalId, MemberId, ProductPage, Workout, WorkoutId};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct KcalUpdate {
    kcal: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkoutLink {
    workout_id: WorkoutId,
}

/// `GoalApi` over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpGoalApi {
    server_url: String,
    client: reqwest::Client,
}

impl HttpGoalApi {
    /// Creates a client with the default timeout.
    pub fn new(server_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(server_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(server_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            server_url: server_url.into(),
            client,
        })
    }

    /// Returns the server URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Builds an HTTP URL for a given path.
    fn build_url(&self, path: &str) -> String {
        let base_url = if !self.server_url.starts_with("http://")
            && !self.server_url.starts_with("https://")
        {
            format!("http://{}", self.server_url)
        } else {
            self.server_url.clone()
        };

        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    /// Sends a request and decodes the JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: String,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Http {
            url: url.clone(),
            source: e,
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url));
        }
        if !status.is_success() {
            tracing::warn!("{} returned {}", url, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Decode { url, source: e })
    }
}

#[async_trait]
impl GoalApi for HttpGoalApi {
    async fn current_goal(&self, member_id: MemberId, date: NaiveDate) -> Result<Goal, ApiError> {
        let url = self.build_url(&format!(
            "/goal/currentGoal/{}/{}",
            member_id,
            date.format("%Y-%m-%d")
        ));
        tracing::debug!("GET {}", url);
        self.send(self.client.get(&url), url).await
    }

    async fn update_goal_kcal(&self, goal_id: GoalId, kcal: i64) -> Result<Goal, ApiError> {
        let url = self.build_url(&format!("/goal/{}", goal_id));
        tracing::debug!("PUT {} kcal={}", url, kcal);
        self.send(self.client.put(&url).json(&KcalUpdate { kcal }), url)
            .await
    }

    async fn search_products(&self, name: &str, page: u32) -> Result<ProductPage, ApiError> {
        let url = self.build_url(&format!(
            "/product/filterByName/{}?page={}",
            urlencoding::encode(name),
            page
        ));
        tracing::debug!("GET {}", url);
        self.send(self.client.get(&url), url).await
    }

    async fn add_workout_to_goal(
        &self,
        goal_id: GoalId,
        workout_id: WorkoutId,
    ) -> Result<Goal, ApiError> {
        let url = self.build_url(&format!("/goal/{}/add-workout", goal_id));
        tracing::debug!("PUT {} workout={}", url, workout_id);
        self.send(self.client.put(&url).json(&WorkoutLink { workout_id }), url)
            .await
    }

    async fn remove_workout_from_goal(
        &self,
        goal_id: GoalId,
        workout_id: WorkoutId,
    ) -> Result<Goal, ApiError> {
        let url = self.build_url(&format!(
            "/goal/{}/remove-workout/{}",
            goal_id, workout_id
        ));
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(&url), url).await
    }

    async fn list_workouts(&self) -> Result<Vec<Workout>, ApiError> {
        let url = self.build_url("/workout/workouts");
        tracing::debug!("GET {}", url);
        self.send(self.client.get(&url), url).await
    }
}
