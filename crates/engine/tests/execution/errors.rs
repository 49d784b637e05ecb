use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use execution_engine::{
    Engine, EngineConfig, ErrorCode, ExecutionHooks, ExecutionStats, ExecutionStrategy, FieldError, FieldResolver,
    FieldType, GraphqlError, OperationBuilder, Request, ResolverInfo, ResolverOutcome, ScalarType, Schema,
};
use serde_json::json;

use crate::runtime;

fn failing(error: fn() -> FieldError) -> FieldResolver {
    FieldResolver::from_fn(move |_| Err(error()))
}

#[test]
fn internal_errors_are_hidden_unless_configured() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let schema = Arc::new(builder.build());

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field(
                "db",
                FieldType::nullable(ScalarType::Int),
                failing(|| anyhow::anyhow!("connection refused").into()),
            );
            s.field(
                "quota",
                FieldType::nullable(ScalarType::Int),
                failing(|| FieldError::new("Quota exceeded").with_extension("limit", 10)),
            );
        });
        let operation = Arc::new(operation.build(&schema).unwrap());

        let engine = Engine::new(schema.clone(), EngineConfig::default());
        let response = engine.execute(Request::new(operation.clone())).await.unwrap();
        insta::assert_json_snapshot!(response, @r#"
        {
          "data": {
            "db": null,
            "quota": null
          },
          "errors": [
            {
              "message": "Unexpected execution error",
              "path": [
                "db"
              ],
              "extensions": {
                "code": "INTERNAL_SERVER_ERROR"
              }
            },
            {
              "message": "Quota exceeded",
              "path": [
                "quota"
              ],
              "extensions": {
                "code": "RESOLVER_ERROR",
                "limit": 10
              }
            }
          ]
        }
        "#);

        let config = EngineConfig::from_toml_str("include_error_details = true").unwrap();
        let engine = Engine::new(schema, config);
        let response = engine.execute(Request::new(operation)).await.unwrap();
        assert_eq!(response.errors()[0].message, "connection refused");
    })
}

#[test]
fn error_handlers_convert_resolver_errors() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        builder.error_handler(|error| match error {
            FieldError::Message { message, .. } if message.starts_with("forbidden") => {
                Some(GraphqlError::new("Not allowed", ErrorCode::BadRequest).with_extension("code", "FORBIDDEN"))
            }
            _ => None,
        });
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field(
                "secret",
                FieldType::nullable(ScalarType::String),
                failing(|| FieldError::new("forbidden: missing scope")),
            );
            s.field(
                "other",
                FieldType::nullable(ScalarType::String),
                failing(|| FieldError::new("other")),
            );
        });
        let operation = operation.build(&schema).unwrap();

        let engine = Engine::new(schema, EngineConfig::default());
        let response = engine.execute(Request::new(operation)).await.unwrap();

        let errors = serde_json::to_value(response.errors()).unwrap();
        assert_eq!(
            errors,
            json!([
                { "message": "Not allowed", "path": ["secret"], "extensions": { "code": "FORBIDDEN" } },
                { "message": "other", "path": ["other"], "extensions": { "code": "RESOLVER_ERROR" } }
            ])
        );
    })
}

#[derive(Clone, Default)]
struct RecordingHooks(Arc<Recorded>);

#[derive(Default)]
struct Recorded {
    executions: AtomicUsize,
    resolvers: Mutex<Vec<(String, bool, ResolverOutcome)>>,
    errors: Mutex<Vec<String>>,
    stats: Mutex<Option<ExecutionStats>>,
}

impl ExecutionHooks for RecordingHooks {
    fn on_execution_start(&self, _operation: &execution_engine::PreparedOperation) {
        self.0.executions.fetch_add(1, Ordering::SeqCst);
    }

    fn on_resolver_end(&self, info: ResolverInfo<'_>, outcome: ResolverOutcome) {
        self.0.resolvers
            .lock()
            .unwrap()
            .push((info.path().to_string(), info.is_inline(), outcome));
    }

    fn on_field_error(&self, error: &GraphqlError) {
        self.0.errors.lock().unwrap().push(error.message.to_string());
    }

    fn on_execution_end(&self, stats: &ExecutionStats) {
        *self.0.stats.lock().unwrap() = Some(stats.clone());
    }
}

#[test]
fn hooks_observe_execution() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.typename();
            s.field("a", FieldType::nullable(ScalarType::Int), FieldResolver::value(1));
            s.field("b", FieldType::nullable(ScalarType::Int), failing(|| FieldError::new("nope")));
        });
        let operation = operation.build(&schema).unwrap();

        let hooks = RecordingHooks::default();
        let engine = Engine::new(schema, EngineConfig::default()).with_hooks(hooks.clone());
        let response = engine.execute(Request::new(operation)).await.unwrap();

        assert_eq!(response.data(), json!({ "__typename": "Query", "a": 1, "b": null }));
        assert_eq!(hooks.0.executions.load(Ordering::SeqCst), 1);
        assert_eq!(
            *hooks.0.resolvers.lock().unwrap(),
            [
                ("__typename".to_string(), true, ResolverOutcome::Success),
                ("a".to_string(), false, ResolverOutcome::Success),
                ("b".to_string(), false, ResolverOutcome::Error),
            ]
        );
        assert_eq!(*hooks.0.errors.lock().unwrap(), ["nope"]);
        assert_eq!(hooks.0.stats.lock().unwrap().as_ref(), Some(response.stats()));
    })
}

#[test]
fn fields_after_an_inline_null_of_their_object_never_run() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field("a", FieldType::required(ScalarType::String), FieldResolver::value(json!(null)))
                .strategy(ExecutionStrategy::Pure);
            s.field("b", FieldType::nullable(ScalarType::Int), FieldResolver::value(1));
            s.field("c", FieldType::nullable(ScalarType::Int), FieldResolver::value(2))
                .strategy(ExecutionStrategy::Pure);
        });
        let operation = operation.build(&schema).unwrap();

        let hooks = RecordingHooks::default();
        let engine = Engine::new(schema, EngineConfig::default()).with_hooks(hooks.clone());
        let response = engine.execute(Request::new(operation)).await.unwrap();

        assert!(!response.has_data());
        assert_eq!(
            *hooks.0.resolvers.lock().unwrap(),
            [("a".to_string(), true, ResolverOutcome::Success)]
        );
        assert_eq!(
            *hooks.0.errors.lock().unwrap(),
            ["Cannot return null for non-nullable field Query.a."]
        );
        assert_eq!(
            *response.stats(),
            ExecutionStats {
                inline_resolutions: 1,
                ..Default::default()
            }
        );
    })
}
