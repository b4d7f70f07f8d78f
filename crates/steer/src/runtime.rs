use tokio::runtime::Builder;

/// Runs a future on a fresh current-thread runtime.
///
/// Hooks are one-shot processes, so there is no runtime to share.
pub fn block_on<F: std::future::Future>(f: F) -> anyhow::Result<F::Output> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(f))
}
