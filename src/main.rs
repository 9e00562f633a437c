/*
 * Responsibility
 * - tokio runtime bootstrap
 * - delegate to app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    hr_payroll::app::run().await?;
    Ok(())
}
