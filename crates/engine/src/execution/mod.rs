mod completion;
mod context;
mod dispatcher;
mod error;
mod hooks;
mod pool;
mod scheduler;
mod task;

pub use error::{ExecutionError, ExecutionResult};
pub use hooks::{ExecutionHooks, NoopHooks, ResolverInfo, ResolverOutcome};

pub(crate) use context::OperationContext;
pub(crate) use dispatcher::{expand_object, ObjectTarget};
pub(crate) use pool::TaskPool;
pub(crate) use scheduler::Scheduler;
pub(crate) use task::ResolverTask;

/// Child tasks produced while completing a value, registered with the scheduler in one call.
pub(crate) type TaskBatch = Vec<Box<ResolverTask>>;

/// Counters collected during one execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Resolver tasks that ran their resolver.
    pub tasks_executed: usize,
    /// Pure fields resolved inline, without a task.
    pub inline_resolutions: usize,
    /// Tasks dropped because their subtree was nulled before they started or completed.
    pub tasks_discarded: usize,
    /// Placeholder tasks registered for selection sets without any applicable field.
    pub noop_tasks: usize,
    /// Highest number of resolver tasks in flight at the same time.
    pub peak_concurrency: usize,
}
