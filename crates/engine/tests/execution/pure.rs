use execution_engine::{
    Engine, EngineConfig, ExecutionStrategy, FieldResolver, FieldType, OperationBuilder, PreparedOperation, Request,
    ScalarType, Schema, Wrapping,
};
use serde_json::{json, Value};

use crate::runtime;

fn schema() -> Schema {
    let mut builder = Schema::builder();
    builder.object("Query");
    builder.object("User");
    builder.build()
}

fn operation(schema: &Schema, strategy: ExecutionStrategy) -> PreparedOperation {
    let query = schema.object_by_name("Query").unwrap();
    let user = schema.object_by_name("User").unwrap();

    let mut operation = OperationBuilder::query(query);
    operation.root_selection_set(|s| {
        s.field("greeting", FieldType::nullable(ScalarType::String), FieldResolver::value("hi"))
            .strategy(strategy);
        s.field(
            "numbers",
            FieldType::new(ScalarType::Int, Wrapping::required().list_non_null()),
            FieldResolver::value(json!([1, 2, 3])),
        )
        .strategy(strategy);
        s.field(
            "broken",
            FieldType::nullable(ScalarType::String),
            FieldResolver::from_fn(|_| Err("broken".into())),
        )
        .strategy(strategy);
        s.field("me", FieldType::nullable(user), FieldResolver::value(json!({ "id": "1" })))
            .strategy(strategy)
            .selection_set(|s| {
                s.field("id", FieldType::required(ScalarType::Id), FieldResolver::parent_field("id"))
                    .strategy(strategy);
                s.typename();
            });
        s.field("ghost", FieldType::nullable(user), FieldResolver::value(json!({})))
            .strategy(strategy)
            .selection_set(|s| {
                s.field("id", FieldType::required(ScalarType::Id), FieldResolver::parent_field("id"))
                    .strategy(strategy);
            });
    });
    operation.build(schema).unwrap()
}

async fn run(strategy: ExecutionStrategy) -> (Value, execution_engine::ExecutionStats) {
    let schema = schema();
    let operation = operation(&schema, strategy);
    let engine = Engine::new(schema, EngineConfig::default());
    let response = engine.execute(Request::new(operation)).await.unwrap();
    (serde_json::to_value(&response).unwrap(), response.stats().clone())
}

#[test]
fn pure_fields_complete_like_parallel_ones() {
    runtime().block_on(async {
        let (pure, pure_stats) = run(ExecutionStrategy::Pure).await;
        let (parallel, parallel_stats) = run(ExecutionStrategy::Parallel).await;

        pretty_assertions::assert_eq!(pure, parallel);
        insta::assert_json_snapshot!(pure, @r#"
        {
          "data": {
            "greeting": "hi",
            "numbers": [
              1,
              2,
              3
            ],
            "broken": null,
            "me": {
              "id": "1",
              "__typename": "User"
            },
            "ghost": null
          },
          "errors": [
            {
              "message": "broken",
              "path": [
                "broken"
              ],
              "extensions": {
                "code": "RESOLVER_ERROR"
              }
            },
            {
              "message": "Cannot return null for non-nullable field User.id.",
              "path": [
                "ghost",
                "id"
              ],
              "extensions": {
                "code": "NON_NULL_VIOLATION"
              }
            }
          ]
        }
        "#);

        // Every field but `__typename`, which is always pure.
        assert_eq!(pure_stats.tasks_executed, 0);
        assert_eq!(pure_stats.inline_resolutions, 8);
        assert_eq!(parallel_stats.tasks_executed, 7);
        assert_eq!(parallel_stats.inline_resolutions, 1);
    })
}

#[test]
fn pure_strategy_on_async_resolver_falls_back_to_a_task() {
    runtime().block_on(async {
        let schema = schema();
        let query = schema.object_by_name("Query").unwrap();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field(
                "slow",
                FieldType::nullable(ScalarType::Int),
                FieldResolver::from_async_fn(|_| async { execution_engine::ResolverResult::Ok(json!(1).into()) }),
            )
            .strategy(ExecutionStrategy::Pure);
        });
        let operation = operation.build(&schema).unwrap();
        let field = operation.fields().next().map(|(_, field)| field.strategy());
        assert_eq!(field, Some(ExecutionStrategy::Parallel));

        let engine = Engine::new(schema, EngineConfig::default());
        let response = engine.execute(Request::new(operation)).await.unwrap();
        assert_eq!(response.data(), json!({ "slow": 1 }));
        assert_eq!(response.stats().tasks_executed, 1);
        assert_eq!(response.stats().inline_resolutions, 0);
    })
}
