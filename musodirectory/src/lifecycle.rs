//! Lifecycle of the ContentDirectory service.
//!
//! The browse adapter itself needs no lifecycle; what starts and stops is
//! the external UPnP transport carrying it. [`DirectoryRuntime`] owns that
//! transition: explicit `start()` / `stop()`, plus a shutdown hook injected
//! by the host process instead of a self-registered global one.

use crate::directory::ContentDirectory;
use crate::error::{DirectoryError, Result};
use musoconfig::Config;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

/// The single seam to the external UPnP stack
///
/// Implementations own device advertisement, SOAP dispatch and DIDL
/// serialization; they call back into the [`ContentDirectory`] they are
/// handed for every Browse/Search action.
#[async_trait::async_trait]
pub trait DirectoryTransport: Send + Sync {
    /// Brings the transport up and publishes the directory.
    async fn start(&self, identity: &ServerIdentity, directory: Arc<ContentDirectory>)
    -> Result<()>;

    /// Withdraws advertisements and releases transport resources.
    async fn shutdown(&self) -> Result<()>;
}

/// Identity advertised by the transport for this server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub friendly_name: String,
    /// Persisted device UDN, stable across restarts
    pub udn: String,
    /// License line shown in device details
    pub license: String,
}

impl ServerIdentity {
    /// Builds the identity from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let udn = config
            .get_udn()
            .map_err(|e| DirectoryError::Config(e.to_string()))?;
        let license = match config.get_license_email() {
            Some(email) => format!("Licensed to {email}"),
            None => "Unlicensed".to_string(),
        };
        Ok(Self {
            friendly_name: config.get_server_name(),
            udn,
            license,
        })
    }
}

/// Start/stop coordinator for the directory service
pub struct DirectoryRuntime {
    transport: Arc<dyn DirectoryTransport>,
    directory: Arc<ContentDirectory>,
    identity: ServerIdentity,
    running: AtomicBool,
}

impl DirectoryRuntime {
    pub fn new(
        transport: Arc<dyn DirectoryTransport>,
        directory: Arc<ContentDirectory>,
        identity: ServerIdentity,
    ) -> Self {
        Self {
            transport,
            directory,
            identity,
            running: AtomicBool::new(false),
        }
    }

    pub fn directory(&self) -> Arc<ContentDirectory> {
        self.directory.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Starts the transport and publishes the directory.
    ///
    /// Starting twice is an error; the first `stop()` must complete before
    /// the service can be started again.
    pub async fn start(&self) -> Result<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(DirectoryError::AlreadyRunning);
        }

        info!(name = %self.identity.friendly_name, udn = %self.identity.udn, "Starting ContentDirectory service");
        if let Err(e) = self
            .transport
            .start(&self.identity, self.directory.clone())
            .await
        {
            self.running.store(false, Ordering::SeqCst);
            error!(error = %e, "Failed to start ContentDirectory service");
            return Err(e);
        }
        info!("ContentDirectory service started");
        Ok(())
    }

    /// Stops the transport. A no-op when the service is not running.
    pub async fn stop(&self) -> Result<()> {
        if !self.running.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        info!("Stopping ContentDirectory service");
        self.transport.shutdown().await?;
        info!("ContentDirectory service stopped");
        Ok(())
    }

    /// Ties shutdown to a host-provided signal.
    ///
    /// Spawns a task that waits for `signal` (Ctrl+C, a supervisor channel,
    /// a test oneshot) and then stops the service. Errors during that stop
    /// are logged, not propagated.
    pub fn bind_shutdown<F>(self: &Arc<Self>, signal: F) -> tokio::task::JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = Arc::clone(self);
        tokio::spawn(async move {
            signal.await;
            if let Err(e) = runtime.stop().await {
                error!(error = %e, "Failed to shut down ContentDirectory service");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::{BrowseMode, BrowseWindow};
    use crate::mime::StaticMimeTypes;
    use crate::resource::{PassthroughTranscoding, StreamUrlBuilder};
    use musocatalog::memory::MemoryCatalog;

    #[derive(Default)]
    struct RecordingTransport {
        started: AtomicBool,
        stopped: AtomicBool,
    }

    #[async_trait::async_trait]
    impl DirectoryTransport for RecordingTransport {
        async fn start(
            &self,
            _identity: &ServerIdentity,
            directory: Arc<ContentDirectory>,
        ) -> Result<()> {
            // The handed directory must be usable from the transport
            directory
                .browse("0", BrowseMode::Metadata, BrowseWindow::everything())
                .await?;
            self.started.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn shutdown(&self) -> Result<()> {
            self.stopped.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn runtime(transport: Arc<RecordingTransport>) -> Arc<DirectoryRuntime> {
        let catalog = Arc::new(MemoryCatalog::new());
        let urls = StreamUrlBuilder::new(
            "127.0.0.1",
            4040,
            "",
            500,
            Arc::new(PassthroughTranscoding),
            Arc::new(StaticMimeTypes),
        );
        let directory = Arc::new(ContentDirectory::new(
            catalog.clone(),
            catalog.clone(),
            catalog,
            urls,
            "Test Media",
        ));
        let identity = ServerIdentity {
            friendly_name: "Test".to_string(),
            udn: "test-udn".to_string(),
            license: "Unlicensed".to_string(),
        };
        Arc::new(DirectoryRuntime::new(transport, directory, identity))
    }

    #[tokio::test]
    async fn start_then_stop() {
        let transport = Arc::new(RecordingTransport::default());
        let runtime = runtime(transport.clone());

        runtime.start().await.unwrap();
        assert!(runtime.is_running());
        assert!(transport.started.load(Ordering::SeqCst));

        runtime.stop().await.unwrap();
        assert!(!runtime.is_running());
        assert!(transport.stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn double_start_is_an_error() {
        let runtime = runtime(Arc::new(RecordingTransport::default()));
        runtime.start().await.unwrap();
        assert!(matches!(
            runtime.start().await,
            Err(DirectoryError::AlreadyRunning)
        ));
    }

    #[tokio::test]
    async fn stop_without_start_is_a_noop() {
        let transport = Arc::new(RecordingTransport::default());
        let runtime = runtime(transport.clone());
        runtime.stop().await.unwrap();
        assert!(!transport.stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn failed_start_clears_running() {
        struct FailingTransport;

        #[async_trait::async_trait]
        impl DirectoryTransport for FailingTransport {
            async fn start(
                &self,
                _identity: &ServerIdentity,
                _directory: Arc<ContentDirectory>,
            ) -> Result<()> {
                Err(DirectoryError::Transport("ssdp bind failed".to_string()))
            }
            async fn shutdown(&self) -> Result<()> {
                Ok(())
            }
        }

        let catalog = Arc::new(MemoryCatalog::new());
        let urls = StreamUrlBuilder::new(
            "127.0.0.1",
            4040,
            "",
            500,
            Arc::new(PassthroughTranscoding),
            Arc::new(StaticMimeTypes),
        );
        let directory = Arc::new(ContentDirectory::new(
            catalog.clone(),
            catalog.clone(),
            catalog,
            urls,
            "Test Media",
        ));
        let identity = ServerIdentity {
            friendly_name: "Test".to_string(),
            udn: "test-udn".to_string(),
            license: "Unlicensed".to_string(),
        };
        let runtime = DirectoryRuntime::new(Arc::new(FailingTransport), directory, identity);

        assert!(runtime.start().await.is_err());
        assert!(!runtime.is_running());
    }

    #[tokio::test]
    async fn bound_shutdown_signal_stops_the_service() {
        let transport = Arc::new(RecordingTransport::default());
        let runtime = runtime(transport.clone());
        runtime.start().await.unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = runtime.bind_shutdown(async move {
            let _ = rx.await;
        });

        tx.send(()).unwrap();
        handle.await.unwrap();

        assert!(!runtime.is_running());
        assert!(transport.stopped.load(Ordering::SeqCst));
    }

    #[test]
    fn identity_from_config() {
        let config = Config::from_yaml_str(
            "server:\n  name: Bridge\nlicense:\n  email: muso@example.com\n",
        )
        .unwrap();
        let identity = ServerIdentity::from_config(&config).unwrap();
        assert_eq!(identity.friendly_name, "Bridge");
        assert_eq!(identity.license, "Licensed to muso@example.com");
        assert!(!identity.udn.is_empty());
    }

    #[test]
    fn identity_unlicensed_by_default() {
        let config = Config::from_yaml_str("").unwrap();
        let identity = ServerIdentity::from_config(&config).unwrap();
        assert_eq!(identity.license, "Unlicensed");
    }
}
