use execution_engine::{
    Engine, EngineConfig, FieldOutput, FieldResolver, FieldType, OperationBuilder, Request, ResolverResult,
    ScalarType, Schema,
};
use serde_json::{json, Value};

use crate::runtime;

fn echo_parent_and_scope() -> FieldResolver {
    FieldResolver::from_fn(|ctx| {
        ResolverResult::Ok(FieldOutput::new(json!({
            "parent": ctx.parent().clone(),
            "scope": ctx.scoped_data("tenant").cloned(),
        })))
    })
}

#[test]
fn tasks_are_reused_across_requests_without_leftovers() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let scalar = builder.scalar("JSON", Ok);
        let schema = builder.build();

        let mut first = OperationBuilder::query(query);
        first.root_selection_set(|s| {
            s.field(
                "session",
                FieldType::nullable(ScalarType::Custom(scalar)),
                FieldResolver::from_fn(|_| {
                    ResolverResult::Ok(FieldOutput::new(json!("secret")).with_scoped_data("tenant", "acme"))
                }),
            );
            s.field("a", FieldType::nullable(ScalarType::Int), FieldResolver::value(1));
            s.field("b", FieldType::nullable(ScalarType::Int), FieldResolver::value(2));
        });
        let first = first.build(&schema).unwrap();

        let mut second = OperationBuilder::query(query);
        second.root_selection_set(|s| {
            s.field("echo", FieldType::nullable(ScalarType::Custom(scalar)), echo_parent_and_scope());
        });
        let second = second.build(&schema).unwrap();

        let engine = Engine::new(schema, EngineConfig::default());
        assert_eq!(engine.idle_tasks(), 0);

        let response = engine
            .execute(Request::new(first).with_root_value(json!({ "token": "r1" })))
            .await
            .unwrap();
        assert_eq!(response.data(), json!({ "session": "secret", "a": 1, "b": 2 }));
        assert_eq!(engine.idle_tasks(), 3);

        let response = engine.execute(Request::new(second)).await.unwrap();
        assert_eq!(response.data(), json!({ "echo": { "parent": {}, "scope": Value::Null } }));
        assert_eq!(engine.idle_tasks(), 3);
    })
}

#[test]
fn pool_capacity_bounds_idle_tasks() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            for name in ["a", "b", "c", "d"] {
                s.field(name, FieldType::nullable(ScalarType::Int), FieldResolver::value(1));
            }
        });
        let operation = operation.build(&schema).unwrap();

        let config = EngineConfig::from_toml_str("task_pool_capacity = 2").unwrap();
        let engine = Engine::new(schema, config);
        let response = engine.execute(Request::new(operation)).await.unwrap();

        assert_eq!(response.data(), json!({ "a": 1, "b": 1, "c": 1, "d": 1 }));
        assert_eq!(engine.idle_tasks(), 2);
    })
}
