use execution_engine::{
    Engine, EngineConfig, FieldResolver, FieldType, OperationBuilder, Request, ScalarType, Schema, Wrapping,
};
use serde_json::{json, Value};

use crate::runtime;

#[test]
fn fields_are_selected_by_concrete_type() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let node = builder.interface("Node");
        let user = builder.object("User");
        let post = builder.object("Post");
        builder.implements(user, node).implements(post, node);
        let search_result = builder.union("SearchResult", &[user, post]);
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field(
                "node",
                FieldType::nullable(node),
                FieldResolver::value(json!({ "__typename": "Post", "id": "p1", "title": "Hello" })),
            )
            .selection_set(|s| {
                s.typename();
                s.field("id", FieldType::required(ScalarType::Id), FieldResolver::parent_field("id"));
                s.field("title", FieldType::nullable(ScalarType::String), FieldResolver::parent_field("title"))
                    .on(post);
                s.field("name", FieldType::nullable(ScalarType::String), FieldResolver::parent_field("name"))
                    .on(user);
            });
            s.field(
                "search",
                FieldType::new(search_result, Wrapping::required().list_non_null()),
                FieldResolver::value(json!([
                    { "__typename": "User", "name": "Ada" },
                    { "__typename": "Post", "title": "Hello" }
                ])),
            )
            .selection_set(|s| {
                s.typename().alias("kind");
                s.field("name", FieldType::nullable(ScalarType::String), FieldResolver::parent_field("name"))
                    .on(user);
                s.field("id", FieldType::nullable(ScalarType::Id), FieldResolver::parent_field("id"))
                    .on(node);
            });
        });
        let operation = operation.build(&schema).unwrap();

        let engine = Engine::new(schema, EngineConfig::default());
        let response = engine.execute(Request::new(operation)).await.unwrap();

        insta::assert_json_snapshot!(response, @r#"
        {
          "data": {
            "node": {
              "__typename": "Post",
              "id": "p1",
              "title": "Hello"
            },
            "search": [
              {
                "kind": "User",
                "name": "Ada",
                "id": null
              },
              {
                "kind": "Post",
                "id": null
              }
            ]
          }
        }
        "#);
    })
}

#[test]
fn unresolvable_abstract_value_is_a_field_error() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let node = builder.interface("Node");
        let user = builder.object("User");
        builder.object("Other");
        builder.implements(user, node);
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field(
                "node",
                FieldType::nullable(node),
                FieldResolver::value(json!({ "__typename": "Other" })),
            )
            .selection_set(|s| {
                s.typename();
            });
        });
        let operation = operation.build(&schema).unwrap();

        let engine = Engine::new(schema, EngineConfig::default());
        let response = engine.execute(Request::new(operation)).await.unwrap();

        insta::assert_json_snapshot!(response, @r#"
        {
          "data": {
            "node": null
          },
          "errors": [
            {
              "message": "Abstract type Node must resolve to an object type at runtime for field Query.node",
              "path": [
                "node"
              ],
              "extensions": {
                "code": "INVALID_FIELD_VALUE"
              }
            }
          ]
        }
        "#);
    })
}

#[test]
fn custom_type_resolver() {
    runtime().block_on(async {
        let mut builder = Schema::builder();
        let query = builder.object("Query");
        let cat = builder.object("Cat");
        let dog = builder.object("Dog");
        let pet = builder.union("Pet", &[cat, dog]);
        builder.union_type_resolver(pet, move |_: &Schema, value: &Value| {
            Some(if value.get("meows").is_some() { cat } else { dog })
        });
        let schema = builder.build();

        let mut operation = OperationBuilder::query(query);
        operation.root_selection_set(|s| {
            s.field(
                "pets",
                FieldType::new(pet, Wrapping::required().list()),
                FieldResolver::value(json!([{ "meows": true }, { "barks": true }])),
            )
            .selection_set(|s| {
                s.typename();
            });
        });
        let operation = operation.build(&schema).unwrap();

        let engine = Engine::new(schema, EngineConfig::default());
        let response = engine.execute(Request::new(operation)).await.unwrap();

        assert_eq!(
            response.data(),
            json!({ "pets": [{ "__typename": "Cat" }, { "__typename": "Dog" }] })
        );
    })
}
