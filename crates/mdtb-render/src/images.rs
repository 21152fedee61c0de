//! Deferred image work queued during a render pass.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::BoxFuture;

/// How a queued image task finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageOutcome {
    /// The placeholder was replaced by the image presentation.
    Replaced,
    /// The resolver had no data; the placeholder stays.
    Unresolved,
    /// The image resolved but could not be spliced in.
    Rejected,
}

type ImageTask = BoxFuture<'static, ImageOutcome>;

/// Shared queue of pending image tasks.
///
/// Every context of a render pass holds a handle to the same queue.
#[derive(Clone, Default)]
pub struct ImageTasks {
    tasks: Arc<Mutex<Vec<ImageTask>>>,
}

impl ImageTasks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, task: ImageTask) {
        self.lock().push(task);
    }

    /// Number of tasks not yet taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub(crate) fn take(&self) -> Vec<ImageTask> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ImageTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ImageTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageTasks")
            .field("pending", &self.len())
            .finish()
    }
}
