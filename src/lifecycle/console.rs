use crate::config::Config;
use crate::framework::{SharedStore, StoreActor};
use crate::shell::Shell;
use std::sync::Arc;
use tracing::{error, info};

/// The running admin console: the document store plus the navigation shell over it.
///
/// `AdminConsole` is responsible for:
/// - **Lifecycle Management**: starting the in-process store actor and stopping it again
/// - **Wiring**: handing the same store to every screen through the [`Shell`]
///
/// # Example
///
/// ```ignore
/// let mut console = AdminConsole::start(&Config::default());
/// console.shell.open(Section::Category).await?;
///
/// console.shutdown().await?;
/// ```
pub struct AdminConsole {
    /// Direct handle to the store, for seeding and maintenance
    pub store: SharedStore,

    /// Navigation shell with one screen per section
    pub shell: Shell,

    /// Store actor task (absent when running over an external store)
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl AdminConsole {
    /// Spawns the store actor and builds the shell on top of it.
    pub fn start(config: &Config) -> Self {
        let (actor, store) = StoreActor::new(config.channel_capacity);
        let handle = tokio::spawn(actor.run());
        info!(capacity = config.channel_capacity, section = %config.initial_section, "Console started");

        let store: SharedStore = Arc::new(store);
        Self {
            shell: Shell::new(store.clone(), config.initial_section),
            store,
            handle: Some(handle),
        }
    }

    /// Builds the shell over a store somebody else owns. Shutdown then only drops handles.
    pub fn with_store(store: SharedStore, config: &Config) -> Self {
        Self {
            shell: Shell::new(store.clone(), config.initial_section),
            store,
            handle: None,
        }
    }

    /// Drops every store handle, then waits for the actor to drain.
    ///
    /// Screen clones taken out of the shell keep the store alive; drop them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor stopped cleanly
    /// - `Err(String)` if its task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down console...");

        // The shell's screens hold clones of the store; all of them must go.
        drop(self.shell);
        drop(self.store);

        if let Some(handle) = self.handle {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
