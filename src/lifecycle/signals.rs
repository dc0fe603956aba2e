//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT (Ctrl+C) or an in-process shutdown trigger
//! - Resolve once, so it can drive axum's graceful shutdown
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A dropped `Shutdown` coordinator also counts as a trigger

use tokio::sync::broadcast;

/// Resolve on Ctrl+C or when `trigger` fires (or its sender is dropped).
pub async fn wait_for_shutdown(mut trigger: broadcast::Receiver<()>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                    let _ = trigger.recv().await;
                    tracing::info!("Shutdown triggered");
                }
            }
        }
        _ = trigger.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}
