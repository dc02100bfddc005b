// Wipe Orchestrator - composes resolution, the overwrite engine and the optional
// post-completion shutdown into one run driven by a WipeConfiguration.

use crate::drives::{BlockDeviceResolver, DeviceResolver};
use crate::wipe_engine::WipeEngine;
use crate::{WipeConfiguration, WipeResult};
use anyhow::{Context, Result};
use std::process::Command;

/// Action performed after a successful wipe when `shutdown_after` is set.
///
/// Fire-and-forget: a failure is logged but never changes the wipe outcome.
pub trait ShutdownAction {
    fn shutdown(&self) -> Result<()>;
}

/// Powers the machine off through the system `shutdown` command
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShutdown;

impl ShutdownAction for SystemShutdown {
    fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down the machine");
        let status = Command::new("shutdown")
            .args(["-h", "now"])
            .status()
            .context("Failed to execute shutdown")?;

        if !status.success() {
            return Err(anyhow::anyhow!("shutdown exited with {}", status));
        }
        Ok(())
    }
}

/// Does nothing; used where powering off is never wanted
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShutdown;

impl ShutdownAction for NoShutdown {
    fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// Main wipe orchestrator
pub struct WipeOrchestrator<'a> {
    config: &'a WipeConfiguration,
    resolver: Box<dyn DeviceResolver>,
    engine: WipeEngine,
    shutdown: Box<dyn ShutdownAction>,
}

impl<'a> WipeOrchestrator<'a> {
    /// Orchestrator wired to real devices and the system shutdown command
    pub fn new(config: &'a WipeConfiguration) -> Self {
        Self {
            config,
            resolver: Box::new(BlockDeviceResolver::new()),
            engine: WipeEngine::new(),
            shutdown: Box::new(SystemShutdown),
        }
    }

    pub fn with_resolver(mut self, resolver: impl DeviceResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_engine(mut self, engine: WipeEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_shutdown(mut self, shutdown: impl ShutdownAction + 'static) -> Self {
        self.shutdown = Box::new(shutdown);
        self
    }

    /// Resolve the target, run every pass and, on success, trigger the shutdown
    /// action if configured. Returns the total bytes written.
    ///
    /// Errors are returned exactly as produced; nothing is retried here.
    pub fn execute(mut self) -> WipeResult<u64> {
        let config = self.config;
        let target = config.target_path();
        let descriptor = self.resolver.resolve(target)?;

        tracing::info!(
            device = %target.display(),
            size_bytes = descriptor.size_bytes(),
            cycles = config.cycles(),
            randomize = config.randomize(),
            "Target size: {} bytes",
            descriptor.size_bytes()
        );

        let total = self
            .engine
            .run(descriptor, config.cycles(), config.randomize())?;

        if config.shutdown_after() {
            if let Err(e) = self.shutdown.shutdown() {
                tracing::warn!(error = %e, "Shutdown after wipe failed");
            }
        }

        Ok(total)
    }
}

/// Wipe the configured device with the default collaborators
pub fn wipe_device(config: &WipeConfiguration) -> WipeResult<u64> {
    WipeOrchestrator::new(config).execute()
}
