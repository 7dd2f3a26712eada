use crate::config::{CONFIG_SECTION, LinksConfig, settings_unset};
use crate::document::{DocumentStore, is_package_json};
use crate::handlers::document_links;
use pkglink_core::{FileSystem, LocalFileSystem};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tower_lsp_server::ls_types::{
    ConfigurationItem, DidChangeConfigurationParams, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, DocumentLink, DocumentLinkOptions,
    DocumentLinkParams, InitializeParams, InitializeResult, InitializedParams, MessageType,
    ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind, Uri,
};
use tower_lsp_server::{Client, LanguageServer, jsonrpc::Result};

pub struct Backend {
    client: Client,
    documents: Arc<DocumentStore>,
    config: Arc<RwLock<LinksConfig>>,
    fs: Arc<dyn FileSystem>,
    /// Client answers `workspace/configuration` requests
    pull_config: AtomicBool,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self::with_file_system(client, Arc::new(LocalFileSystem))
    }

    /// Creates a backend that resolves homepages through `fs`.
    pub fn with_file_system(client: Client, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            client,
            documents: Arc::new(DocumentStore::new()),
            config: Arc::new(RwLock::new(LinksConfig::default())),
            fs,
            pull_config: AtomicBool::new(false),
        }
    }

    /// Returns the configuration to use for a request on `uri`.
    ///
    /// Pulls the section from the client when supported so every request
    /// sees the current settings. Falls back to the last pushed settings when
    /// pulling is unsupported, fails, or the client has nothing set.
    async fn current_config(&self, uri: &Uri) -> LinksConfig {
        if self.pull_config.load(Ordering::Relaxed) {
            let items = vec![ConfigurationItem {
                scope_uri: Some(uri.clone()),
                section: Some(CONFIG_SECTION.into()),
            }];

            match self.client.configuration(items).await {
                Ok(values) => {
                    let settings = values.into_iter().next().unwrap_or_default();
                    if settings_unset(&settings) {
                        tracing::debug!("client has no {} settings", CONFIG_SECTION);
                    } else {
                        match LinksConfig::from_settings(settings) {
                            Ok(config) => return config,
                            Err(e) => tracing::warn!("invalid {} settings: {}", CONFIG_SECTION, e),
                        }
                    }
                }
                Err(e) => tracing::debug!("workspace/configuration failed: {:?}", e),
            }
        }

        self.config.read().await.clone()
    }

    fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            document_link_provider: Some(DocumentLinkOptions {
                resolve_provider: Some(false),
                work_done_progress_options: Default::default(),
            }),
            ..Default::default()
        }
    }
}

impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("initializing pkglink-lsp server");

        let pull_config = params
            .capabilities
            .workspace
            .as_ref()
            .and_then(|workspace| workspace.configuration)
            .unwrap_or(false);
        self.pull_config.store(pull_config, Ordering::Relaxed);

        if let Some(init_options) = params.initialization_options {
            match LinksConfig::from_settings(init_options) {
                Ok(config) => {
                    tracing::debug!("loaded configuration: {:?}", config);
                    *self.config.write().await = config;
                }
                Err(e) => tracing::warn!("ignoring invalid initialization options: {}", e),
            }
        }

        Ok(InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: "pkglink-lsp".into(),
                version: Some(env!("CARGO_PKG_VERSION").into()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("pkglink-lsp server initialized");
        self.client
            .log_message(MessageType::INFO, "pkglink-lsp ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("shutting down pkglink-lsp server");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;

        if !is_package_json(&uri) {
            tracing::debug!("unsupported file type: {:?}", uri);
            return;
        }

        tracing::info!("document opened: {:?}", uri);
        self.documents.update(uri, params.text_document.text);
    }

    async fn did_change(&self, mut params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        if !is_package_json(&uri) {
            return;
        }

        // Full sync: the last change holds the whole document
        if let Some(change) = params.content_changes.pop() {
            self.documents.update(uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::info!("document closed: {:?}", uri);
        self.documents.remove(&uri);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        match LinksConfig::from_settings(params.settings) {
            Ok(config) => {
                tracing::info!(
                    "configuration updated: {} scope link(s)",
                    config.scope_link_map.len()
                );
                *self.config.write().await = config;
            }
            Err(e) => {
                tracing::warn!("ignoring invalid {} settings: {}", CONFIG_SECTION, e);
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Invalid {} settings: {}", CONFIG_SECTION, e),
                    )
                    .await;
            }
        }
    }

    async fn document_link(&self, params: DocumentLinkParams) -> Result<Option<Vec<DocumentLink>>> {
        let uri = params.text_document.uri;
        let config = self.current_config(&uri).await;

        match document_links::handle_document_links(
            self.fs.as_ref(),
            &self.documents,
            &config.scope_link_map,
            &uri,
        )
        .await
        {
            Ok(links) => Ok(links),
            Err(e) => {
                tracing::warn!("failed to resolve links for {:?}: {}", uri, e);
                self.client
                    .log_message(
                        MessageType::ERROR,
                        format!("Cannot link dependencies: {}", e),
                    )
                    .await;
                Ok(Some(Vec::new()))
            }
        }
    }
}
