use std::time::Duration;

/// Uniform lifecycle contract for long-running components, so the process
/// supervisor can manage all of them identically.
#[async_trait::async_trait]
pub trait StartStop: Send {
    /// Bring the component up. Must not block indefinitely and is
    /// idempotent once it has succeeded.
    async fn start(&mut self) -> anyhow::Result<()>;

    /// Best-effort graceful shutdown bounded by `deadline`.
    async fn stop(&mut self, deadline: Duration) -> anyhow::Result<()>;
}
