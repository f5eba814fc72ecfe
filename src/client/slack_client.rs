use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::constants::{DEFAULT_SLACK_API_URL, USER_AGENT};
use crate::error::{NotifyError, NotifyResult};
use crate::models::slack::{LookupUserResponse, PostMessageRequest, PostMessageResponse};
use crate::models::{Message, SlackUser};

/// Minimal Slack Web API client: user lookup and message posting.
pub struct SlackClient {
    client: reqwest::Client,
    api_url: String,
}

impl SlackClient {
    pub fn new(api_token: &str, timeout: Duration) -> NotifyResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_token))
            .map_err(|_| NotifyError::Config("Slack API token contains invalid header characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Config(format!("create Slack HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: DEFAULT_SLACK_API_URL.to_string(),
        })
    }

    /// Point the client at another Web API root, e.g. a proxy or a test server
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), method)
    }

    pub async fn lookup_user_by_email(&self, email: &str) -> NotifyResult<SlackUser> {
        let url = self.method_url("users.lookupByEmail");
        let response = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|source| NotifyError::Connection {
                endpoint: url.clone(),
                source,
            })?;

        let body: LookupUserResponse = Self::decode(response, &url).await?;
        if !body.ok {
            return Err(NotifyError::Slack(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        body.user
            .ok_or_else(|| NotifyError::Decode("users.lookupByEmail returned no user".to_string()))
    }

    /// Posts `message` to a channel ID, or to a user ID for a direct message.
    pub async fn post_message(&self, channel: &str, message: &Message) -> NotifyResult<()> {
        let url = self.method_url("chat.postMessage");
        let request = PostMessageRequest {
            channel,
            text: &message.text,
            blocks: &message.blocks,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|source| NotifyError::Connection {
                endpoint: url.clone(),
                source,
            })?;

        let body: PostMessageResponse = Self::decode(response, &url).await?;
        if !body.ok {
            return Err(NotifyError::Slack(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> NotifyResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: url.to_string(),
            });
        }

        let text = response.text().await.map_err(|source| NotifyError::Connection {
            endpoint: url.to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| NotifyError::Decode(e.to_string()))
    }
}
