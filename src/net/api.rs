use super::NetworkError;
use crate::config::ServerConfig;
use crate::data::action::{ActionResponse, GameAction};
use crate::data::state::{GameState, SnapshotPayload};
use reqwest::{Client, RequestBuilder};
use serde_json::json;
use std::future::Future;

/// The remote game engine, as seen by the client.
pub trait GameApi: Send + Sync + 'static {
    fn fetch_state(&self) -> impl Future<Output = Result<GameState, NetworkError>> + Send;
    fn send_action(&self, action: GameAction) -> impl Future<Output = Result<ActionResponse, NetworkError>> + Send;
    fn end_game(&self) -> impl Future<Output = Result<(), NetworkError>> + Send;
    fn start_game(&self) -> impl Future<Output = Result<(), NetworkError>> + Send;
}

/// Anything that can hand back the raw bytes of a static asset path such as `/static/images/ui/base.png`.
pub trait AssetSource: Send + Sync + 'static {
    fn fetch_asset(&self, path: String) -> impl Future<Output = Result<Vec<u8>, NetworkError>> + Send;
}

#[derive(Clone)]
pub struct HttpApi {
    http: Client,
    api_url: String,
    static_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(server: &ServerConfig) -> Result<Self, NetworkError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_url: server.api_url.trim_end_matches('/').to_string(),
            static_url: server.static_url.trim_end_matches('/').to_string(),
            token: server.token.clone(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn post_empty(&self, path: &str) -> Result<(), NetworkError> {
        self.authorize(self.http.post(self.endpoint(path)))
            .json(&json!({}))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl GameApi for HttpApi {
    async fn fetch_state(&self) -> Result<GameState, NetworkError> {
        let payload: SnapshotPayload = self
            .authorize(self.http.get(self.endpoint("/game/state")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(GameState::from(payload))
    }

    async fn send_action(&self, action: GameAction) -> Result<ActionResponse, NetworkError> {
        let response = self
            .authorize(self.http.post(self.endpoint("/game/action")))
            .json(&action)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response)
    }

    async fn end_game(&self) -> Result<(), NetworkError> {
        self.post_empty("/game/end").await
    }

    async fn start_game(&self) -> Result<(), NetworkError> {
        self.post_empty("/game/start").await
    }
}

impl AssetSource for HttpApi {
    async fn fetch_asset(&self, path: String) -> Result<Vec<u8>, NetworkError> {
        let url = format!("{}{}", self.static_url, path);
        let bytes = self.http.get(url).send().await?.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
