/*
 * Responsibility
 * - tokio runtime
 * - hand off to app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    fx_gate::app::run().await
}
