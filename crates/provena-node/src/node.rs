//! The Provena node orchestrator.
//!
//! Opens storage, rebuilds the in-memory registry from it, serves the HTTP
//! API, and runs the event loop that applies every mutation one at a time —
//! the single global sequence of state transitions the registry assumes.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

use provena_core::Address;
use provena_registry::{Registry, RegistryEvent};

use crate::commands::NodeCommand;
use crate::config::ProvenaConfig;
use crate::state::NodeState;
use crate::storage::Storage;

/// Capacity of the API → event loop command channel.
const COMMAND_CHANNEL_CAPACITY: usize = 256;

/// The full Provena node.
pub struct ProvenaNode {
    /// Node configuration.
    config: ProvenaConfig,
    /// The authoritative in-memory registry.
    registry: Arc<Registry>,
    /// Persistent storage (None until start).
    storage: Option<Arc<Storage>>,
    /// Shared state accessible from HTTP handlers.
    node_state: Option<Arc<NodeState>>,
    /// Receives mutations from the HTTP API.
    command_rx: Option<mpsc::Receiver<NodeCommand>>,
}

impl ProvenaNode {
    /// Create a new node with the given config.
    pub fn new(config: ProvenaConfig) -> Result<Self> {
        let admin = match &config.registry.admin_address {
            Some(addr) => Some(
                Address::new(addr.clone())
                    .map_err(|e| anyhow::anyhow!("invalid admin_address in config: {}", e))?,
            ),
            None => None,
        };
        let registry = Arc::new(Registry::with_admin(admin));

        Ok(Self {
            config,
            registry,
            storage: None,
            node_state: None,
            command_rx: None,
        })
    }

    /// Initialize and start the node: storage, reload, HTTP API.
    pub async fn start(&mut self) -> Result<()> {
        tracing::info!("starting Provena node");

        let storage = Arc::new(Storage::open(&self.config.storage.data_dir)?);
        load_registry(&storage, &self.registry)?;
        tracing::info!(
            path = %self.config.storage.data_dir.display(),
            sources = self.registry.source_count(),
            content = self.registry.content_count(),
            "storage initialized"
        );
        self.storage = Some(storage);

        let (command_tx, command_rx) = mpsc::channel::<NodeCommand>(COMMAND_CHANNEL_CAPACITY);
        let node_state = Arc::new(NodeState::new(self.registry.clone(), command_tx));

        let api_addr: SocketAddr =
            format!("{}:{}", self.config.api.listen_addr, self.config.api.port).parse()?;
        let api_state = node_state.clone();
        tokio::spawn(async move {
            if let Err(e) = crate::api::start_api_server(api_addr, api_state).await {
                tracing::error!(error = %e, "HTTP API server error");
            }
        });

        self.node_state = Some(node_state);
        self.command_rx = Some(command_rx);

        Ok(())
    }

    /// Run the node's event loop: applies mutations and logs registry events.
    pub async fn run(&mut self) -> Result<()> {
        let mut command_rx = self
            .command_rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("node not started"))?;
        let node_state = self
            .node_state
            .clone()
            .ok_or_else(|| anyhow::anyhow!("node not started"))?;
        let storage = self
            .storage
            .clone()
            .ok_or_else(|| anyhow::anyhow!("node not started"))?;
        let registry = self.registry.clone();
        let mut events = registry.subscribe();

        tracing::info!("entering mutation loop");

        loop {
            tokio::select! {
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(cmd) => {
                            if let Err(e) = apply_command(&registry, &storage, cmd) {
                                node_state.record_storage_error();
                                tracing::error!(error = %e, "write-through persistence failed");
                            }
                        }
                        None => {
                            tracing::info!("command channel closed");
                            break;
                        }
                    }
                }
                event = events.recv() => {
                    if let Ok(RegistryEvent::ContentPublished(published)) = event {
                        tracing::debug!(
                            content_id = %published.content_id,
                            publisher = %published.publisher,
                            "publication event"
                        );
                    }
                }
            }
        }

        Ok(())
    }

    /// Gracefully shut down the node.
    pub async fn shutdown(&mut self) -> Result<()> {
        tracing::info!("shutting down Provena node");

        self.node_state = None;
        if let Some(storage) = self.storage.take() {
            drop(storage);
            tracing::info!("storage closed");
        }

        tracing::info!("Provena node shut down");
        Ok(())
    }
}

/// Rebuild the in-memory registry from persistent storage.
pub fn load_registry(storage: &Storage, registry: &Registry) -> Result<()> {
    for source in storage.load_sources()? {
        registry.load_source(source);
    }
    for record in storage.load_content()? {
        registry.load_content(record);
    }
    // Overwrite the reload-order index with the persisted publication order.
    for (publisher, ids) in storage.load_publisher_index()? {
        registry.load_publisher_index(publisher, ids);
    }
    for (content_id, records) in storage.load_modifications()? {
        registry.load_history(content_id, records);
    }
    if let Some(sequence) = storage.load_sequence()? {
        registry.restore_sequence(sequence);
    }
    Ok(())
}

/// Apply one mutation: registry first, then write-through persistence.
///
/// The reply is sent as soon as the registry commits; a persistence failure
/// is returned to the loop for accounting rather than failing the already
/// finalized operation.
fn apply_command(registry: &Arc<Registry>, storage: &Arc<Storage>, cmd: NodeCommand) -> Result<()> {
    match cmd {
        NodeCommand::RegisterSource {
            address,
            public_key,
            name,
            reply,
        } => {
            let result = registry.register_source(address, public_key, name);
            let persist = match &result {
                Ok(source) => storage.put_source(source),
                Err(_) => Ok(()),
            };
            let _ = reply.send(result);
            persist
        }
        NodeCommand::PublishContent {
            publisher,
            fingerprint,
            content_type,
            reply,
        } => {
            let result = registry
                .publish_content(&publisher, fingerprint, content_type)
                .and_then(|content_id| registry.get_content(&content_id));
            let persist = match &result {
                Ok(record) => storage
                    .put_content(record)
                    .and_then(|_| {
                        let source = registry.get_source(&publisher)?;
                        storage.put_source(&source)?;
                        Ok(())
                    })
                    .and_then(|_| {
                        let ids = registry.list_content_by_publisher(&publisher);
                        storage.put_publisher_index(&publisher, &ids)
                    })
                    .and_then(|_| storage.put_sequence(registry.current_sequence())),
                Err(_) => Ok(()),
            };
            let _ = reply.send(result);
            persist
        }
        NodeCommand::RecordModification {
            content_id,
            fingerprint,
            description,
            modifier,
            reply,
        } => {
            let result =
                registry.record_modification(&content_id, fingerprint, description, &modifier);
            let persist = match &result {
                Ok(index) => registry
                    .get_modification(&content_id, *index)
                    .map_err(anyhow::Error::from)
                    .and_then(|record| storage.put_modification(&content_id, *index, &record))
                    .and_then(|_| {
                        let record = registry.get_content(&content_id)?;
                        storage.put_content(&record)
                    }),
                Err(_) => Ok(()),
            };
            let _ = reply.send(result);
            persist
        }
        NodeCommand::AdjustCredibility {
            caller,
            target,
            delta,
            reply,
        } => {
            let result = registry.adjust_credibility(&caller, &target, delta);
            let persist = match &result {
                Ok(source) => storage.put_source(source),
                Err(_) => Ok(()),
            };
            let _ = reply.send(result);
            persist
        }
        NodeCommand::SetSourceVerified {
            caller,
            target,
            verified,
            reply,
        } => {
            let result = registry.set_source_verified(&caller, &target, verified);
            let persist = match &result {
                Ok(source) => storage.put_source(source),
                Err(_) => Ok(()),
            };
            let _ = reply.send(result);
            persist
        }
        NodeCommand::SetContentVerified {
            caller,
            content_id,
            verified,
            reply,
        } => {
            let result = registry.set_content_verified(&caller, &content_id, verified);
            let persist = match &result {
                Ok(record) => storage.put_content(record),
                Err(_) => Ok(()),
            };
            let _ = reply.send(result);
            persist
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("provena-node-test-{}", rand::random::<u64>()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn addr(s: &str) -> Address {
        Address::new(s).unwrap()
    }

    #[test]
    fn test_node_creation() {
        let config = ProvenaConfig::default();
        assert!(ProvenaNode::new(config).is_ok());
    }

    #[test]
    fn test_node_creation_invalid_admin() {
        let mut config = ProvenaConfig::default();
        config.registry.admin_address = Some("has whitespace".into());
        assert!(ProvenaNode::new(config).is_err());
    }

    #[tokio::test]
    async fn test_node_start_and_shutdown() {
        let dir = temp_dir();
        let mut config = ProvenaConfig::default();
        config.storage.data_dir = dir.clone();
        config.api.port = 0; // let the OS pick a free port
        let mut node = ProvenaNode::new(config).unwrap();
        node.start().await.expect("start failed");
        node.shutdown().await.expect("shutdown failed");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_apply_commands_persist_and_reload() {
        let dir = temp_dir();
        let registry = Arc::new(Registry::new());
        let storage = Arc::new(Storage::open(&dir).unwrap());

        // Register.
        let (tx, rx) = tokio::sync::oneshot::channel();
        apply_command(
            &registry,
            &storage,
            NodeCommand::RegisterSource {
                address: addr("srcA"),
                public_key: "aa".repeat(32),
                name: "Reuters".into(),
                reply: tx,
            },
        )
        .unwrap();
        rx.await.unwrap().unwrap();

        // Publish.
        let (tx, rx) = tokio::sync::oneshot::channel();
        apply_command(
            &registry,
            &storage,
            NodeCommand::PublishContent {
                publisher: addr("srcA"),
                fingerprint: "abc123".into(),
                content_type: "image/jpeg".into(),
                reply: tx,
            },
        )
        .unwrap();
        let record = rx.await.unwrap().unwrap();

        // Modify.
        let (tx, rx) = tokio::sync::oneshot::channel();
        apply_command(
            &registry,
            &storage,
            NodeCommand::RecordModification {
                content_id: record.content_id.clone(),
                fingerprint: "def456".into(),
                description: "cropped image".into(),
                modifier: addr("srcA"),
                reply: tx,
            },
        )
        .unwrap();
        assert_eq!(rx.await.unwrap().unwrap(), 0);

        // Reload into a fresh registry and compare.
        let restored = Registry::new();
        load_registry(&storage, &restored).unwrap();
        assert_eq!(restored.source_count(), 1);
        assert_eq!(restored.get_source(&addr("srcA")).unwrap().total_publications, 1);
        let reloaded = restored.get_content(&record.content_id).unwrap();
        assert_eq!(reloaded.fingerprint, "abc123");
        assert_eq!(reloaded.modifications_count, 1);
        assert_eq!(
            restored
                .get_modification(&record.content_id, 0)
                .unwrap()
                .description,
            "cropped image"
        );
        assert_eq!(
            restored.list_content_by_publisher(&addr("srcA")),
            vec![record.content_id.clone()]
        );
        assert_eq!(restored.current_sequence(), registry.current_sequence());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_apply_command_rejection_persists_nothing() {
        let dir = temp_dir();
        let registry = Arc::new(Registry::new());
        let storage = Arc::new(Storage::open(&dir).unwrap());

        let (tx, rx) = tokio::sync::oneshot::channel();
        apply_command(
            &registry,
            &storage,
            NodeCommand::PublishContent {
                publisher: addr("anon"),
                fingerprint: "abc".into(),
                content_type: "text/plain".into(),
                reply: tx,
            },
        )
        .unwrap();
        assert!(rx.await.unwrap().is_err());
        assert!(storage.load_content().unwrap().is_empty());
        assert!(storage.load_sources().unwrap().is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }
}
