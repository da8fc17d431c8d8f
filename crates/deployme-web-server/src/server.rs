//! Development server implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    handler::Handler,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use deployme_web_static::{AssetPipeline, SiteConfig};
use deployme_web_ui::{NavBar, PageProps, PageShell, RenderError, Site, SiteMeta, Theme};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{HmrHub, HmrMessage, HMR_CLIENT_SCRIPT, HMR_SCRIPT_PATH, HMR_SOCKET_PATH};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Site configuration file, reloaded on change
    pub config_path: PathBuf,

    /// Directory containing static files
    pub public_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Document metadata
    pub meta: SiteMeta,

    /// Color tokens for the stylesheet
    pub theme: Theme,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("site.toml"),
            public_dir: PathBuf::from("public"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            meta: SiteMeta::default(),
            theme: Theme::default(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind to {0}: {1}")]
    BindError(String, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Shared server state.
struct ServerState {
    config: DevServerConfig,
    site: Site,
    hmr: HmrHub,
}

type SharedState = Arc<RwLock<ServerState>>;

impl ServerState {
    fn new(config: DevServerConfig) -> Self {
        let site = dev_site(&config.meta);
        Self {
            config,
            site,
            hmr: HmrHub::new(),
        }
    }

    /// Home page, with the menu state taken from the `menu` query value.
    fn index_page(&self, menu: Option<&str>) -> Result<String, RenderError> {
        match self.site.page("/") {
            Some(home) => self
                .site
                .render(home, &NavBar::from_query(menu), &PageProps::new()),
            None => self.not_found_page("/"),
        }
    }

    fn not_found_page(&self, path: &str) -> Result<String, RenderError> {
        self.site.render_not_found(path)
    }

    /// Full utility stylesheet, unpurged so edits show up without a rebuild.
    fn stylesheet(&self) -> String {
        AssetPipeline::generate_css(&self.config.theme, None)
    }

    fn script(&self) -> Result<String, RenderError> {
        Ok(AssetPipeline::generate_js(&self.site.menu_panel()?))
    }

    /// Re-read the site configuration and rebuild the site from it.
    ///
    /// Returns the message open pages need: a stylesheet swap when only the colors changed.
    fn reload_config(&mut self) -> Result<HmrMessage, ServerError> {
        let config = SiteConfig::load(&self.config.config_path)
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;
        let theme = config
            .theme()
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;

        let meta = config.meta();
        let update = if meta == self.config.meta {
            HmrMessage::Stylesheet
        } else {
            HmrMessage::Reload
        };

        self.config.meta = meta;
        self.config.theme = theme;
        self.site = dev_site(&self.config.meta);
        Ok(update)
    }
}

/// Pages are served from the server root regardless of the deployment base URL.
fn dev_site(meta: &SiteMeta) -> Site {
    let meta = SiteMeta {
        base_url: "/".to_string(),
        ..meta.clone()
    };
    Site::new(PageShell::new(meta).with_script(HMR_SCRIPT_PATH))
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let state = Arc::new(RwLock::new(ServerState::new(self.config.clone())));

        // Set up file watcher
        let watch_paths = vec![
            self.config.config_path.clone(),
            self.config.public_dir.clone(),
        ];

        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

        // Spawn file watch handler
        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config.public_dir);

        tracing::info!("Starting dev server at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::BindError(addr.clone(), e.to_string()))?;

        // Open browser if configured
        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Could not open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Rendered routes first, then anything in the public directory, then the not-found page.
fn router(state: SharedState, public_dir: &Path) -> Router {
    let not_found = not_found_handler.with_state(Arc::clone(&state));

    Router::new()
        .route("/", get(index_handler))
        .route("/assets/main.css", get(stylesheet_handler))
        .route("/assets/main.js", get(script_handler))
        .route(HMR_SOCKET_PATH, get(ws_handler))
        .route(HMR_SCRIPT_PATH, get(hmr_script_handler))
        .fallback_service(ServeDir::new(public_dir).fallback(not_found))
        .with_state(state)
}

/// Handle file watch events.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    match event {
        WatchEvent::ConfigModified(path) => {
            tracing::info!("Config modified: {}", path.display());

            let mut state = state.write().await;
            match state.reload_config() {
                Ok(update) => state.hmr.send(update),
                // Keep serving the last good configuration
                Err(e) => tracing::warn!("{}", e),
            }
        }

        WatchEvent::Created(path) | WatchEvent::Deleted(path) | WatchEvent::Modified(path) => {
            tracing::debug!("Changed: {}", path.display());
            state.read().await.hmr.send(HmrMessage::Reload);
        }
    }
}

#[derive(Debug, Deserialize)]
struct IndexQuery {
    menu: Option<String>,
}

/// Handler for the home page.
async fn index_handler(
    State(state): State<SharedState>,
    Query(query): Query<IndexQuery>,
) -> Response {
    let state = state.read().await;
    html_response(StatusCode::OK, state.index_page(query.menu.as_deref()))
}

/// Handler for every path without a route.
async fn not_found_handler(State(state): State<SharedState>, uri: Uri) -> Response {
    let state = state.read().await;
    html_response(StatusCode::NOT_FOUND, state.not_found_page(uri.path()))
}

async fn stylesheet_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    ([(header::CONTENT_TYPE, "text/css")], state.stylesheet())
}

async fn script_handler(State(state): State<SharedState>) -> Response {
    let state = state.read().await;
    match state.script() {
        Ok(script) => ([(header::CONTENT_TYPE, "application/javascript")], script).into_response(),
        Err(e) => render_failure(e),
    }
}

fn html_response(status: StatusCode, page: Result<String, RenderError>) -> Response {
    match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => render_failure(e),
    }
}

fn render_failure(error: RenderError) -> Response {
    tracing::error!("{}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!("<pre>{}</pre>", deployme_web_ui::html::escape(&error.to_string()))),
    )
        .into_response()
}

/// Handler for the live reload WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = {
        let state = state.read().await;
        state.hmr.subscribe()
    };

    if send_message(&mut socket, &HmrMessage::Connected).await.is_err() {
        return;
    }

    // Forward reload messages to the client
    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &HmrMessage) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    socket.send(Message::Text(json.into())).await
}

/// Handler for the live reload client script.
async fn hmr_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        HMR_CLIENT_SCRIPT,
    )
}
