use futures::future::BoxFuture;
use std::{
    mem,
    sync::{Arc, Mutex},
};
use tokio::task::JoinSet;
use tracing::error;

use crate::{error::Error, provider::Lifetime};

/// [`Lifetime`] backed by a tokio [`JoinSet`]. The host awaits
/// [`KeepAlive::settled`] before letting the worker context go.
#[derive(Debug, Clone, Default)]
pub struct KeepAlive {
    tasks: Arc<Mutex<JoinSet<Result<(), Error>>>>,
}

impl KeepAlive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        match self.tasks.lock() {
            Ok(tasks) => tasks.len(),
            Err(_) => 0,
        }
    }

    /// Waits for every registered task, including ones registered while
    /// waiting. Failures are logged; the first one is returned.
    pub async fn settled(&self) -> Result<(), Error> {
        let mut first_error = None;

        loop {
            let mut set = match self.tasks.lock() {
                Ok(mut tasks) => mem::take(&mut *tasks),
                Err(_) => {
                    return Err(Error::TaskError(String::from(
                        "keep-alive task set poisoned",
                    )))
                },
            };

            if set.is_empty() {
                break;
            }

            while let Some(result) = set.join_next().await {
                let result = match result {
                    Ok(result) => result,
                    Err(e) => Err(Error::TokioJoinError(e)),
                };

                if let Err(e) = result {
                    error!("Keep-alive task failed: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Lifetime for KeepAlive {
    fn wait_until(&self, task: BoxFuture<'static, Result<(), Error>>) {
        match self.tasks.lock() {
            Ok(mut tasks) => {
                tasks.spawn(task);
            },
            Err(_) => {
                error!("Keep-alive task set poisoned, running task detached");
                tokio::spawn(task);
            },
        }
    }
}
