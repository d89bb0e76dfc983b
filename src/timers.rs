use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::sleep;

/// Run `task` once after `delay` on the given runtime.
///
/// Fire-and-forget: there is no handle and no way to cancel.
pub fn schedule<F>(runtime: &Handle, delay: Duration, task: F)
where
    F: FnOnce() + Send + 'static,
{
    runtime.spawn(async move {
        sleep(delay).await;
        task();
    });
}
