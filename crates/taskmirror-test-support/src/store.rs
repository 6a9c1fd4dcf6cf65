//! Test stores — mock `TaskStateStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use taskmirror_core::error::StoreError;
use taskmirror_core::event::TaskState;
use taskmirror_core::store::TaskStateStore;

/// An in-memory store implementing the same replace-if-newer gate as the
/// production store: one row per `task_arn`, replaced only by a strictly
/// newer version.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: Mutex<HashMap<String, TaskState>>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored snapshot for `task_arn`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn task(&self, task_arn: &str) -> Option<TaskState> {
        self.tasks.lock().unwrap().get(task_arn).cloned()
    }

    /// Returns the number of stored tasks.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    /// Returns true if no task has been stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl TaskStateStore for InMemoryTaskStore {
    async fn apply(&self, state: &TaskState) -> Result<(), StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.get(&state.task_arn) {
            Some(stored) if stored.version >= state.version => Ok(()),
            _ => {
                tasks.insert(state.task_arn.clone(), state.clone());
                Ok(())
            }
        }
    }
}

/// A store whose every `apply` fails. Useful for testing the loop's
/// withhold-acknowledgement path.
#[derive(Debug, Default)]
pub struct FailingTaskStore;

#[async_trait]
impl TaskStateStore for FailingTaskStore {
    async fn apply(&self, state: &TaskState) -> Result<(), StoreError> {
        Err(StoreError::Persistence {
            task_arn: state.task_arn.clone(),
            message: "connection refused".to_owned(),
        })
    }
}

/// A store that fails its first `n` applies and then behaves like an
/// [`InMemoryTaskStore`]. Models a store outage followed by recovery.
#[derive(Debug)]
pub struct OutageTaskStore {
    failures_remaining: Mutex<u32>,
    inner: InMemoryTaskStore,
}

impl OutageTaskStore {
    /// Creates a store that fails the first `failures` applies.
    #[must_use]
    pub fn new(failures: u32) -> Self {
        Self {
            failures_remaining: Mutex::new(failures),
            inner: InMemoryTaskStore::new(),
        }
    }

    /// The recovered in-memory store, for asserting on persisted state.
    #[must_use]
    pub fn inner(&self) -> &InMemoryTaskStore {
        &self.inner
    }
}

#[async_trait]
impl TaskStateStore for OutageTaskStore {
    async fn apply(&self, state: &TaskState) -> Result<(), StoreError> {
        {
            let mut remaining = self.failures_remaining.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(StoreError::Persistence {
                    task_arn: state.task_arn.clone(),
                    message: "store unreachable".to_owned(),
                });
            }
        }
        self.inner.apply(state).await
    }
}
