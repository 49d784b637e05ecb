use crossbeam_queue::ArrayQueue;

use super::ResolverTask;

/// Idle resolver tasks shared by every request of an engine. Lock-free, a task is handed to
/// exactly one renter.
pub(crate) struct TaskPool {
    idle: ArrayQueue<Box<ResolverTask>>,
}

impl TaskPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            idle: ArrayQueue::new(capacity.max(1)),
        }
    }

    /// Reuses an idle task if there is one. The task must be initialized before use.
    pub fn rent(&self) -> Box<ResolverTask> {
        self.idle.pop().unwrap_or_default()
    }

    /// Resets the task and keeps it for reuse, dropping it if the pool is full.
    pub fn give_back(&self, mut task: Box<ResolverTask>) {
        task.reset();
        let _ = self.idle.push(task);
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }
}
