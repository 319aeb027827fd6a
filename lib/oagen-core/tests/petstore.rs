//! Serialization of a complete document.

use oagen_core::{HttpMethod, OpenApi, Referenceable, Unit};
use rstest::rstest;
use serde_json::json;

mod common;
pub use self::common::*;

#[rstest]
fn should_serialize_petstore(petstore: OpenApi) -> anyhow::Result<()> {
    let expected = json!({
        "openapi": "3.0.2",
        "info": {
            "title": "Swagger Petstore",
            "license": {"name": "MIT"},
            "version": "1.0.0"
        },
        "servers": [{"url": "http://petstore.swagger.io/v1"}],
        "paths": {
            "/pets": {
                "get": {
                    "tags": ["pets"],
                    "summary": "List all pets",
                    "operationId": "listPets",
                    "parameters": [{"$ref": "#/components/parameters/limit"}],
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": {"$ref": "#/components/schemas/Pet"},
                                        "maxItems": 100
                                    }
                                }
                            },
                            "description": "A paged array of pets",
                            "headers": {"x-next": {"$ref": "#/components/headers/x-next"}}
                        },
                        "default": {"$ref": "#/components/responses/UnexpectedError"}
                    }
                },
                "post": {
                    "tags": ["pets"],
                    "summary": "Create a pet",
                    "operationId": "createPets",
                    "requestBody": {
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}},
                        "required": true
                    },
                    "responses": {
                        "201": {
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}},
                            "description": "Created"
                        },
                        "default": {"$ref": "#/components/responses/UnexpectedError"}
                    },
                    "security": [{"api_key": []}]
                }
            },
            "/pets/{petId}": {
                "get": {
                    "tags": ["pets"],
                    "summary": "Info for a specific pet",
                    "operationId": "showPetById",
                    "parameters": [{
                        "in": "path",
                        "name": "petId",
                        "description": "The id of the pet to retrieve",
                        "required": true,
                        "schema": {"type": "string"}
                    }],
                    "responses": {
                        "200": {
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}},
                            "description": "Expected response"
                        },
                        "default": {"$ref": "#/components/responses/UnexpectedError"}
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "name": {"type": "string"},
                        "tag": {"type": "string"},
                        "status": {"type": "string", "enum": ["available", "pending", "sold"]}
                    },
                    "required": ["id", "name"]
                },
                "Error": {
                    "type": "object",
                    "properties": {
                        "code": {"type": "integer", "format": "int32"},
                        "message": {"type": "string"}
                    },
                    "required": ["code", "message"]
                }
            },
            "responses": {
                "UnexpectedError": {
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Error"}}},
                    "description": "unexpected error"
                }
            },
            "parameters": {
                "limit": {
                    "in": "query",
                    "name": "limit",
                    "description": "How many items to return at one time (max 100)",
                    "schema": {"type": "integer", "format": "int32", "maximum": 100}
                }
            },
            "headers": {
                "x-next": {
                    "description": "A link to the next page of responses",
                    "schema": {"type": "string"}
                }
            },
            "securitySchemes": {
                "api_key": {"type": "apiKey", "name": "X-API-Key", "in": "header"}
            }
        },
        "security": [{"api_key": []}],
        "tags": [{"name": "pets", "description": "Everything about your pets"}]
    });

    // compared as text, to check the key order too
    assert_eq!(petstore.to_json()?, expected.to_string());
    Ok(())
}

#[rstest]
fn should_render_stable_pretty_json(petstore: OpenApi) -> anyhow::Result<()> {
    let first = petstore.to_json_pretty()?;
    let second = petstore.clone().to_json_pretty()?;

    assert_eq!(first, second);
    assert!(first.starts_with("{\n  \"openapi\": \"3.0.2\",\n  \"info\": {"));
    Ok(())
}

#[rstest]
fn should_inline_a_removed_component_only_where_it_is_defined(mut petstore: OpenApi) {
    let pet = petstore.components_mut().remove_schema("Pet");

    assert_eq!(pet.as_ref().and_then(Referenceable::reference), None);
    assert!(petstore.components().schema("Pet").is_none());

    // clones embedded in operations keep their own reference
    let show = petstore
        .path("/pets/{petId}")
        .and_then(|item| item.operation(HttpMethod::Get))
        .map(Unit::to_value);
    assert_eq!(
        show.as_ref().map(|operation| &operation["responses"]["200"]["content"]["application/json"]["schema"]),
        Some(&json!({"$ref": "#/components/schemas/Pet"}))
    );
}

#[cfg(feature = "yaml")]
#[rstest]
fn should_serialize_petstore_to_yaml(petstore: OpenApi) -> anyhow::Result<()> {
    use oagen_core::ToYaml;

    let yaml = petstore.to_yaml()?;

    assert!(yaml.starts_with("openapi: 3.0.2\n"));
    assert!(yaml.contains("$ref: '#/components/schemas/Pet'") || yaml.contains("$ref: \"#/components/schemas/Pet\""));
    Ok(())
}
