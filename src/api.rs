use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::WatchError;
use crate::watcher::StatusSource;

const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

pub struct ApiClient {
    http: reqwest::Client,
    token: String,
}

impl ApiClient {
    pub fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }

    /// One GET per poll cycle. Retrying is the caller's business, not ours.
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, WatchError> {
        let response = self
            .http
            .get(ENDPOINT)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WatchError::EndpointUnavailable {
                url: ENDPOINT.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope = response.json::<Value>().await?;
        Ok(envelope)
    }
}

impl StatusSource for ApiClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, WatchError> {
        self.homework_statuses(from_date).await
    }
}
