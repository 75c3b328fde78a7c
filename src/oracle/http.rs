use crate::config::OracleParams;
use crate::oracle::{Oracle, OracleError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-style chat-completions client. The bearer token is read from the
/// environment on every call.
pub struct HttpOracle {
    client: Client,
    params: OracleParams,
}

impl HttpOracle {
    pub fn new(params: OracleParams) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(params.oracle_timeout_secs))
            .build()?;
        Ok(Self { client, params })
    }

    fn credential(&self) -> Result<String, OracleError> {
        let var = &self.params.oracle_api_key_env;
        match std::env::var(var) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(OracleError::MissingCredential(var.clone())),
        }
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    async fn consult(&self, prompt: &str) -> Result<String, OracleError> {
        let token = self.credential()?;
        let body = ChatRequest {
            model: &self.params.oracle_model,
            messages: vec![ChatMessage {
                role: "system",
                content: prompt,
            }],
            temperature: self.params.oracle_temperature,
        };

        debug!(
            "POST {} (model {})",
            self.params.oracle_endpoint, self.params.oracle_model
        );
        let res = self
            .client
            .post(&self.params.oracle_endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = res.json().await?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OracleError::Malformed("reply has no message content".into()))
    }
}
