//! Builds a small petstore document and prints it as YAML.
//!
//! ```sh
//! cargo run --example petstore --features yaml
//! ```

use oagen_core::{
    ArraySchema, Components, HttpMethod, Info, IntegerSchema, License, OAuthFlow, OAuthScope, ObjectSchema, OpenApi,
    Operation, Parameter, PathItem, RequestBody, Response, Responses, SecurityRequirement, SecurityScheme, Server,
    ServerVariable, SimpleSchema, StringSchema, Tag, ToYaml,
};
use tracing::info;

#[allow(clippy::print_stdout)]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut components = Components::default();
    components.set_schema(
        "Pet",
        ObjectSchema::new()
            .with_property("id", IntegerSchema::new().with_format("int64")?, None, true)
            .with_property("name", StringSchema::new().with_max_length(64)?, None, true),
    )?;
    components.set_security_scheme(
        "petstore_auth",
        SecurityScheme::oauth2(OAuthFlow::implicit(
            "https://petstore.example.com/oauth/authorize",
            "https://petstore.example.com/oauth/refresh",
            OAuthScope::new("write:pets", "modify pets in your account")?,
        )?
        .with_scope(OAuthScope::new("read:pets", "read your pets")?)),
    )?;
    let pet = components
        .schema("Pet")
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Pet schema not registered"))?;

    let error = Response::new("application/json", StringSchema::new())?.with_description("Unexpected error");
    let list = Operation::new(Responses::new(error.clone()).with_response(
        200,
        Response::new("application/json", ArraySchema::new(pet.clone()))?.with_description("All pets"),
    )?)
    .with_tag("pets")
    .with_operation_id("listPets")
    .with_parameter(Parameter::query("limit")?.with_schema(IntegerSchema::new().with_maximum(100)?));
    let create = Operation::new(Responses::new(error))
        .with_tag("pets")
        .with_operation_id("createPet")
        .with_request_body(RequestBody::new("application/json", pet)?.with_required(true))
        .with_security(SecurityRequirement::new("petstore_auth")?.with_scope("write:pets"));

    let server = Server::new("https://{environment}.example.com/v1")?.with_variable(
        "environment",
        ServerVariable::new(Some("api"))
            .with_variant("api")
            .with_variant("staging"),
    );
    let document = OpenApi::new(Info::new("Petstore", "1.0.0")?.with_license(License::new("MIT", None)?))
        .with_server(server)
        .with_path(PathItem::new("/pets", HttpMethod::Get, list)?.with_operation(HttpMethod::Post, create))
        .with_components(components)
        .with_tag(Tag::new("pets")?);
    info!(paths = document.paths().count(), "document built");

    println!("{}", document.to_yaml()?);
    Ok(())
}
