//! Signal handling: SIGINT and SIGTERM cancel the running pick

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Sets a cancel flag when the process is asked to stop
pub struct ShutdownSignal {
    shutdown: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Create a handler that sets an existing flag
    pub fn with_flag(flag: Arc<AtomicBool>) -> Self {
        Self { shutdown: flag }
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Install the handlers. Must be called from within a tokio runtime.
    #[cfg(unix)]
    pub fn setup(&self) -> Result<(), std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        // Registered here rather than in the task so no signal is missed
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let shutdown = Arc::clone(&self.shutdown);

        tokio::spawn(async move {
            tokio::select! {
                _ = sigint.recv() => {}
                _ = sigterm.recv() => {}
            }
            shutdown.store(true, Ordering::SeqCst);
        });

        Ok(())
    }

    /// Install the handlers. Must be called from within a tokio runtime.
    #[cfg(not(unix))]
    pub fn setup(&self) -> Result<(), std::io::Error> {
        let shutdown = Arc::clone(&self.shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.store(true, Ordering::SeqCst);
            }
        });
        Ok(())
    }
}
