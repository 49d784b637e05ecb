use execution_engine::{
    Engine, EngineConfig, FieldOutput, FieldResolver, FieldType, InputValue, OperationBuilder, Request, ResolverResult,
    ScalarType, Schema, Variables, Wrapping,
};
use serde_json::json;

use crate::runtime;

#[derive(serde::Deserialize)]
struct Page {
    first: usize,
    #[serde(default)]
    after: Option<usize>,
}

#[test]
fn arguments_are_coerced_with_variables() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field(
                "numbers",
                FieldType::new(ScalarType::Int, Wrapping::required().list_non_null()),
                FieldResolver::from_fn(|ctx| {
                    let page: Page = ctx.argument("page")?;
                    let start = page.after.map_or(0, |after| after + 1);
                    ResolverResult::Ok(FieldOutput::new((start..start + page.first).collect::<Vec<_>>()))
                }),
            )
            .argument(
                "page",
                InputValue::Object(vec![
                    ("first".into(), InputValue::variable("first")),
                    ("after".into(), json!(4).into()),
                ]),
            );
            s.field(
                "greeting",
                FieldType::nullable(ScalarType::String),
                FieldResolver::from_fn(|ctx| {
                    let name: String = ctx.argument("name")?;
                    ResolverResult::Ok(FieldOutput::new(format!("Hello {name}")))
                }),
            )
            .argument("name", json!("Ada"));
        });
        let operation = operation.build(&schema).unwrap();

        let engine = Engine::new(schema, EngineConfig::default());
        let variables: Variables = [("first", 3)].into_iter().collect();
        let response = engine
            .execute(Request::new(operation).with_variables(variables))
            .await
            .unwrap();

        assert_eq!(response.data(), json!({ "numbers": [5, 6, 7], "greeting": "Hello Ada" }));
    })
}

#[test]
fn undeserializable_argument_is_a_field_error() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field(
                "count",
                FieldType::nullable(ScalarType::Int),
                FieldResolver::from_fn(|ctx| {
                    let limit: u32 = ctx.argument("limit")?;
                    ResolverResult::Ok(FieldOutput::new(limit))
                }),
            )
            .argument("limit", InputValue::variable("limit"));
        });
        let operation = operation.build(&schema).unwrap();

        let engine = Engine::new(schema, EngineConfig::default());
        let response = engine.execute(Request::new(operation)).await.unwrap();

        assert_eq!(response.data(), json!({ "count": null }));
        assert_eq!(response.errors().len(), 1);
        assert!(
            response.errors()[0].message.starts_with("Invalid argument 'limit'"),
            "{}",
            response.errors()[0].message
        );
    })
}
