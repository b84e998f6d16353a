use std::sync::Arc;

use tokio::sync::Mutex;

use crate::analysis::{self, Analyzer};
use crate::api::{ApiClient, ApiResult};
use crate::config::Config;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    pub analyzer: Arc<dyn Analyzer>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(config: Config) -> ApiResult<Self> {
        let api = ApiClient::new(&config.backend.base_url, config.backend_timeout())?;
        let analyzer = analysis::from_config(&config, &api);
        let sessions = SessionStore::new(config.session_idle(), config.upload.max_bytes);
        Ok(Self {
            config,
            api,
            analyzer,
            sessions: Arc::new(Mutex::new(sessions)),
        })
    }

    /// Replaces the analyzer picked from config.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }
}
