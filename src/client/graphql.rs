use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::USER_AGENT;
use crate::error::{NotifyError, NotifyResult};
use crate::graphql_fields::{join_args, FieldSelection};
use crate::models::GraphQLResponse;

/// GraphQL client authenticating with a bearer token
pub struct GraphQLClient {
    client: Client,
    api_url: String,
}

impl GraphQLClient {
    pub fn new(api_url: &str, api_token: &str, timeout: Duration) -> NotifyResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_token))
            .map_err(|_| NotifyError::Config("API token contains invalid header characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Config(format!("create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
        })
    }

    /// Execute a GraphQL query and decode its `data` member
    pub async fn query<T>(&self, query: &str, variables: Map<String, Value>) -> NotifyResult<T>
    where
        T: DeserializeOwned,
    {
        let request_body = GraphQLRequest {
            query,
            variables: Value::Object(variables),
        };
        let body = self.execute(&request_body).await?;
        Self::extract_data(&body)
    }

    /// Execute a raw GraphQL request, returning the response body
    async fn execute(&self, request_body: &GraphQLRequest<'_>) -> NotifyResult<String> {
        let response = self
            .client
            .post(&self.api_url)
            .json(request_body)
            .send()
            .await
            .map_err(|source| NotifyError::Connection {
                endpoint: self.api_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: self.api_url.clone(),
            });
        }

        response.text().await.map_err(|source| NotifyError::Connection {
            endpoint: self.api_url.clone(),
            source,
        })
    }

    /// Extract data from GraphQL response, handling errors
    fn extract_data<T>(body: &str) -> NotifyResult<T>
    where
        T: DeserializeOwned,
    {
        let response: GraphQLResponse<T> =
            serde_json::from_str(body).map_err(|e| NotifyError::Decode(e.to_string()))?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let error_messages = errors
                .iter()
                .map(|e| e.message.clone())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(NotifyError::GraphQL(error_messages));
        }

        response
            .data
            .ok_or_else(|| NotifyError::Decode(format!("no data in response: {}", body)))
    }
}

#[derive(Debug, Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// Builder for named GraphQL queries with variables
pub struct QueryBuilder {
    name: String,
    variables: Vec<(String, String)>,
    operation: String,
    args: Vec<(String, String)>,
    selection: FieldSelection,
}

impl QueryBuilder {
    pub fn new(name: &str, operation: &str) -> Self {
        Self {
            name: name.to_string(),
            variables: Vec::new(),
            operation: operation.to_string(),
            args: Vec::new(),
            selection: FieldSelection::new(),
        }
    }

    /// Declare a variable, e.g. `("$slug", "String!")`
    pub fn variable(mut self, name: &str, type_name: &str) -> Self {
        self.variables.push((name.to_string(), type_name.to_string()));
        self
    }

    pub fn variables(mut self, declarations: Vec<(String, String)>) -> Self {
        self.variables.extend(declarations);
        self
    }

    pub fn arg(mut self, name: &str, value: &str) -> Self {
        self.args.push((name.to_string(), value.to_string()));
        self
    }

    pub fn args(mut self, args: Vec<(String, String)>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn selection(mut self, selection: FieldSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn build(self) -> String {
        let header = if self.variables.is_empty() {
            format!("query {}", self.name)
        } else {
            format!("query {}({})", self.name, join_args(&self.variables))
        };

        if self.args.is_empty() {
            format!("{} {{ {} {{ {} }} }}", header, self.operation, self.selection)
        } else {
            format!(
                "{} {{ {}({}) {{ {} }} }}",
                header,
                self.operation,
                join_args(&self.args),
                self.selection
            )
        }
    }
}
