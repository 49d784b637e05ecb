use std::collections::VecDeque;

use futures::{future::BoxFuture, stream::FuturesUnordered, StreamExt};

use super::{
    completion::CompletionStatus,
    hooks::ResolverOutcome,
    task::{TaskOutcome, TaskRun},
    ExecutionError, ExecutionResult, OperationContext, ResolverTask, TaskBatch,
};

/// Drives the resolver tasks of one operation.
///
/// Serial tasks start one at a time, each only once the subtree of the previous one is complete.
/// Parallel tasks run concurrently, up to `max_concurrency`. All response writes happen in this
/// loop as tasks complete, never inside the resolver futures.
pub(crate) struct Scheduler {
    serial: VecDeque<Box<ResolverTask>>,
    parallel: VecDeque<Box<ResolverTask>>,
    running: FuturesUnordered<BoxFuture<'static, TaskRun>>,
    // Tasks of the current serial task's subtree, itself included, that are queued or running.
    serial_outstanding: usize,
    max_concurrency: usize,
    batch: TaskBatch,
}

impl Scheduler {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            serial: VecDeque::new(),
            parallel: VecDeque::new(),
            running: FuturesUnordered::new(),
            serial_outstanding: 0,
            max_concurrency: max_concurrency.max(1),
            batch: Vec::new(),
        }
    }

    /// Queues a batch of tasks, serial ones in their batch order.
    pub fn register(&mut self, batch: &mut TaskBatch) {
        let mut nested_serial = VecDeque::new();
        for task in batch.drain(..) {
            match (task.is_serial(), task.in_serial_scope()) {
                // Serial fields within a serial subtree run before the next serial sibling of
                // that subtree's root.
                (true, true) => nested_serial.push_back(task),
                (true, false) => self.serial.push_back(task),
                (false, in_scope) => {
                    if in_scope {
                        self.serial_outstanding += 1;
                    }
                    self.parallel.push_back(task);
                }
            }
        }
        if !nested_serial.is_empty() {
            nested_serial.append(&mut self.serial);
            self.serial = nested_serial;
        }
    }

    pub fn is_idle(&self) -> bool {
        self.serial.is_empty() && self.parallel.is_empty() && self.running.is_empty()
    }

    /// Runs until both queues are empty and nothing is in flight, or until cancellation.
    pub async fn run(&mut self, ctx: &mut OperationContext) -> ExecutionResult<()> {
        loop {
            if ctx.cancellation_token.is_cancelled() {
                self.abort(ctx).await;
                return Err(ExecutionError::Cancelled);
            }

            self.start_ready_tasks(ctx);

            if self.running.is_empty() {
                if self.serial.is_empty() && self.parallel.is_empty() {
                    return Ok(());
                }
                if self.parallel.is_empty() && self.serial_outstanding > 0 {
                    tracing::error!(outstanding = self.serial_outstanding, "Serial scope accounting is off");
                    self.serial_outstanding = 0;
                }
                continue;
            }

            if let Some(run) = self.running.next().await {
                self.complete(ctx, run);
            }
        }
    }

    fn start_ready_tasks(&mut self, ctx: &mut OperationContext) {
        while self.serial_outstanding == 0 {
            let Some(task) = self.serial.pop_front() else {
                break;
            };
            self.serial_outstanding += 1;
            self.start(ctx, task);
        }

        while self.running.len() < self.max_concurrency {
            let Some(task) = self.parallel.pop_front() else {
                break;
            };
            self.start(ctx, task);
        }
    }

    fn start(&mut self, ctx: &mut OperationContext, task: Box<ResolverTask>) {
        // The slot or one of its ancestors was nulled while the task was queued.
        if !ctx.response.is_alive(task.path()) {
            tracing::trace!("Discarding task of a nulled subtree");
            ctx.stats.tasks_discarded += 1;
            self.finish(ctx, task);
            return;
        }

        self.running.push(task.begin_execute(ctx));
        ctx.stats.peak_concurrency = ctx.stats.peak_concurrency.max(self.running.len());
    }

    fn complete(&mut self, ctx: &mut OperationContext, run: TaskRun) {
        let TaskRun { mut task, outcome } = run;
        match outcome {
            TaskOutcome::Noop => {
                ctx.stats.noop_tasks += 1;
                task.mark_completed();
            }
            TaskOutcome::Cancelled => {
                tracing::trace!("Task cancelled");
                task.mark_faulted();
            }
            TaskOutcome::Resolved(result) => {
                ctx.stats.tasks_executed += 1;
                if let Some(field_id) = task.field_id() {
                    let outcome = match &result {
                        Ok(_) => ResolverOutcome::Success,
                        Err(err) if err.is_cancellation() => ResolverOutcome::Cancelled,
                        Err(_) => ResolverOutcome::Error,
                    };
                    ctx.hooks
                        .on_resolver_end(ctx.resolver_info(field_id, task.path(), false), outcome);
                }
                let status = task.complete_value(ctx, &mut self.batch, result);
                tracing::trace!(?status, "Task completed");
                if status == CompletionStatus::Discarded {
                    ctx.stats.tasks_discarded += 1;
                }
            }
        }

        // Children first, so that the serial scope never drops to zero before they are queued.
        let mut batch = std::mem::take(&mut self.batch);
        self.register(&mut batch);
        self.batch = batch;
        self.finish(ctx, task);
    }

    fn finish(&mut self, ctx: &mut OperationContext, task: Box<ResolverTask>) {
        if task.holds_serial_scope() {
            self.serial_outstanding = self.serial_outstanding.saturating_sub(1);
        }
        ctx.task_pool.give_back(task);
    }

    /// Waits for in-flight tasks to observe the cancellation and recycles everything.
    async fn abort(&mut self, ctx: &mut OperationContext) {
        tracing::debug!(
            running = self.running.len(),
            queued = self.serial.len() + self.parallel.len(),
            "Execution cancelled"
        );
        while let Some(TaskRun { task, .. }) = self.running.next().await {
            ctx.task_pool.give_back(task);
        }
        for task in self.serial.drain(..).chain(self.parallel.drain(..)) {
            ctx.task_pool.give_back(task);
        }
        self.serial_outstanding = 0;
    }
}
