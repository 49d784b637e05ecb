use std::sync::Arc;

use futures::{
    stream::{self, BoxStream},
    Stream, StreamExt,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::{
    config::EngineConfig,
    execution::{
        expand_object, ExecutionError, ExecutionHooks, ExecutionResult, ExecutionStats, NoopHooks, ObjectTarget,
        OperationContext, Scheduler, TaskPool,
    },
    operation::{OperationType, PreparedOperation, Variables},
    response::{Response, ResponseBuilder, ResponsePath},
    schema::Schema,
};

/// Executes prepared operations against a schema. Shared by all requests, the resolver task
/// pool included.
pub struct Engine {
    schema: Arc<Schema>,
    config: EngineConfig,
    task_pool: Arc<TaskPool>,
    hooks: Arc<dyn ExecutionHooks>,
}

/// One execution of a prepared operation.
pub struct Request {
    operation: Arc<PreparedOperation>,
    variables: Variables,
    root_value: Value,
    cancellation_token: CancellationToken,
}

impl Request {
    pub fn new(operation: impl Into<Arc<PreparedOperation>>) -> Self {
        Self {
            operation: operation.into(),
            variables: Variables::default(),
            root_value: Value::Object(Default::default()),
            cancellation_token: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Parent value of the root fields.
    #[must_use]
    pub fn with_root_value(mut self, root_value: Value) -> Self {
        self.root_value = root_value;
        self
    }

    #[must_use]
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }
}

impl Engine {
    pub fn new(schema: impl Into<Arc<Schema>>, config: EngineConfig) -> Self {
        Self {
            schema: schema.into(),
            task_pool: Arc::new(TaskPool::new(config.task_pool_capacity)),
            config,
            hooks: Arc::new(NoopHooks),
        }
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: impl ExecutionHooks + 'static) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolver tasks currently idle in the pool.
    pub fn idle_tasks(&self) -> usize {
        self.task_pool.idle_count()
    }

    /// Executes a query or a mutation. Field errors are part of the response, only a cancelled
    /// or unusable request fails as a whole.
    pub async fn execute(&self, request: Request) -> ExecutionResult<Response> {
        let Request {
            operation,
            variables,
            root_value,
            cancellation_token,
        } = request;

        if operation.ty == OperationType::Subscription {
            return Err(ExecutionError::InvalidOperation(
                "subscriptions must be executed with execute_subscription".into(),
            ));
        }

        self.run(operation, Arc::new(variables), Arc::new(root_value), cancellation_token)
            .await
    }

    /// Executes the root selection set of a subscription once per source event, the event being
    /// the root value. Responses are produced in event order until the source ends or the
    /// request is cancelled.
    pub fn execute_subscription<'a, S>(
        &'a self,
        request: Request,
        events: S,
    ) -> BoxStream<'a, ExecutionResult<Response>>
    where
        S: Stream<Item = Value> + Send + 'a,
    {
        let Request {
            operation,
            variables,
            cancellation_token,
            ..
        } = request;

        if operation.ty != OperationType::Subscription {
            return stream::once(async {
                Err(ExecutionError::InvalidOperation(
                    "only subscriptions can be executed with execute_subscription".into(),
                ))
            })
            .boxed();
        }

        let variables = Arc::new(variables);
        events
            .take_until(cancellation_token.clone().cancelled_owned())
            .then(move |event| {
                self.run(
                    operation.clone(),
                    variables.clone(),
                    Arc::new(event),
                    cancellation_token.clone(),
                )
            })
            .boxed()
    }

    async fn run(
        &self,
        operation: Arc<PreparedOperation>,
        variables: Arc<Variables>,
        root_value: Arc<Value>,
        cancellation_token: CancellationToken,
    ) -> ExecutionResult<Response> {
        let span = tracing::info_span!(
            "execute",
            operation.id = %operation.id,
            operation.ty = %operation.ty,
            operation.name = operation.name.as_deref().unwrap_or_default(),
        );

        self.run_operation(operation, variables, root_value, cancellation_token)
            .instrument(span)
            .await
    }

    async fn run_operation(
        &self,
        operation: Arc<PreparedOperation>,
        variables: Arc<Variables>,
        root_value: Arc<Value>,
        cancellation_token: CancellationToken,
    ) -> ExecutionResult<Response> {
        validate_variables(&operation, &variables)?;

        let mut ctx = OperationContext {
            schema: self.schema.clone(),
            operation: operation.clone(),
            variables,
            cancellation_token,
            response: ResponseBuilder::new(),
            stats: ExecutionStats::default(),
            hooks: self.hooks.clone(),
            task_pool: self.task_pool.clone(),
            include_error_details: self.config.include_error_details,
        };
        ctx.hooks.on_execution_start(&operation);

        let mut scheduler = Scheduler::new(self.config.effective_max_concurrency());
        let mut batch = Vec::new();
        expand_object(
            &mut ctx,
            &mut batch,
            ObjectTarget {
                selection_set_id: operation.root_selection_set_id,
                definition_id: operation.root_object_id,
                parent: root_value,
                path: ResponsePath::default(),
                scoped_data: Default::default(),
                in_serial_scope: false,
            },
        );
        scheduler.register(&mut batch);
        scheduler.run(&mut ctx).await?;
        debug_assert!(scheduler.is_idle());

        tracing::debug!(
            errors = ctx.response.errors().len(),
            data_is_null = ctx.response.is_data_null(),
            "Execution completed"
        );
        ctx.hooks.on_execution_end(&ctx.stats);
        Ok(Response::new(operation, ctx.response, ctx.stats))
    }
}

// @skip/@include conditions must be decidable before anything runs.
fn validate_variables(operation: &PreparedOperation, variables: &Variables) -> ExecutionResult<()> {
    for (_, field) in operation.fields() {
        for condition in &field.include_conditions {
            let name = condition.variable();
            if !matches!(variables.get(name), Some(Value::Bool(_))) {
                return Err(ExecutionError::InvalidVariable { name: name.to_string() });
            }
        }
    }
    Ok(())
}
