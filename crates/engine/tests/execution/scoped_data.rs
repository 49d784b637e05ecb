use execution_engine::{
    Engine, EngineConfig, FieldOutput, FieldResolver, FieldType, OperationBuilder, Request, ResolverResult, ScalarType,
    Schema,
};
use serde_json::{json, Value};

use crate::runtime;

fn read_scope(key: &'static str) -> FieldResolver {
    FieldResolver::from_fn(move |ctx| {
        ResolverResult::Ok(FieldOutput::new(ctx.scoped_data(key).cloned().unwrap_or(Value::Null)))
    })
}

#[test]
fn scoped_data_is_visible_to_descendants_only() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let user = builder.object("User");
        let address = builder.object("Address");
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field(
                "me",
                FieldType::nullable(user),
                FieldResolver::from_fn(|_| {
                    ResolverResult::Ok(FieldOutput::new(json!({})).with_scoped_data("userId", "u1"))
                }),
            )
            .selection_set(|s| {
                s.field("userId", FieldType::nullable(ScalarType::Id), read_scope("userId"));
                s.field(
                    "address",
                    FieldType::nullable(address),
                    FieldResolver::from_async_fn(|_| async {
                        ResolverResult::Ok(FieldOutput::new(json!({})).with_scoped_data("city", "Paris"))
                    }),
                )
                .selection_set(|s| {
                    s.field("userId", FieldType::nullable(ScalarType::Id), read_scope("userId"));
                    s.field("city", FieldType::nullable(ScalarType::String), read_scope("city"));
                });
                s.field("city", FieldType::nullable(ScalarType::String), read_scope("city"));
            });
            s.field("userId", FieldType::nullable(ScalarType::Id), read_scope("userId"));
        });
        let operation = operation.build(&schema).unwrap();

        let engine = Engine::new(schema, EngineConfig::default());
        let response = engine.execute(Request::new(operation)).await.unwrap();

        assert_eq!(
            response.data(),
            json!({
                "me": {
                    "userId": "u1",
                    "address": { "userId": "u1", "city": "Paris" },
                    "city": null
                },
                "userId": null
            })
        );
    })
}

#[test]
fn root_value_is_the_parent_of_root_fields() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field("version", FieldType::required(ScalarType::String), FieldResolver::parent_field("version"));
            s.field(
                "path",
                FieldType::nullable(ScalarType::String),
                FieldResolver::from_fn(|ctx| ResolverResult::Ok(FieldOutput::new(ctx.path().to_string()))),
            )
            .alias("where");
        });
        let operation = operation.build(&schema).unwrap();

        let engine = Engine::new(schema, EngineConfig::default());
        let response = engine
            .execute(Request::new(operation).with_root_value(json!({ "version": "1.2" })))
            .await
            .unwrap();

        assert_eq!(response.data(), json!({ "version": "1.2", "where": "where" }));
    })
}
