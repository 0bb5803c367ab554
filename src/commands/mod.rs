pub mod avatar;
pub mod init;
pub mod users;

use tokio::sync::oneshot;

use crate::error::{ReqresError, Result};
use crate::queue::ResponseLoop;

/// Drive the response loop until a completion reports back through `done`.
///
/// A completion that drops its sender without reporting means the service
/// went away before the follow-up request could be issued.
pub async fn wait_for<T>(
    response_loop: &mut ResponseLoop,
    done: oneshot::Receiver<Result<T>>,
) -> Result<T> {
    response_loop
        .run_until(done)
        .await
        .map_err(|_| ReqresError::ServiceGone)?
}
