use oagen_core::{
    ApiKeyLocation, ArraySchema, Components, EnumSchema, Header, HttpMethod, Info, IntegerSchema, License,
    ObjectSchema, OpenApi, OpenApiError, Operation, Parameter, PathItem, RequestBody, Response,
    Responses, SecurityRequirement, SecurityScheme, Server, SimpleSchema, StringSchema, Tag,
};
use rstest::fixture;
use tracing::info;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

#[fixture]
pub fn petstore() -> OpenApi {
    init_tracing();
    match build_petstore() {
        Ok(document) => document,
        Err(error) => {
            panic!("fail to build the petstore document: {error}");
        }
    }
}

/// The classic petstore, with its schemas, parameters and responses
/// registered as components.
pub fn build_petstore() -> Result<OpenApi, OpenApiError> {
    let mut components = Components::default();

    components.set_schema(
        "Pet",
        ObjectSchema::new()
            .with_property("id", IntegerSchema::new().with_format("int64")?, None, true)
            .with_property("name", StringSchema::new(), None, true)
            .with_property("tag", StringSchema::new(), None, false)
            .with_property("status", EnumSchema::new(["available", "pending", "sold"]), None, false),
    )?;
    components.set_schema(
        "Error",
        ObjectSchema::new()
            .with_property("code", IntegerSchema::new().with_format("int32")?, None, true)
            .with_property("message", StringSchema::new(), None, true),
    )?;
    let pet = components.schema("Pet").cloned().ok_or(OpenApiError::InvalidValue)?;
    let error = components.schema("Error").cloned().ok_or(OpenApiError::InvalidValue)?;

    components.set_parameter(
        "limit",
        Parameter::query("limit")?
            .with_description("How many items to return at one time (max 100)")
            .with_schema(IntegerSchema::new().with_format("int32")?.with_maximum(100)?),
    )?;
    components.set_header(
        "x-next",
        Header::new()
            .with_description("A link to the next page of responses")
            .with_schema(StringSchema::new()),
    )?;
    components.set_response(
        "UnexpectedError",
        Response::new("application/json", error)?.with_description("unexpected error"),
    )?;
    components.set_security_scheme(
        "api_key",
        SecurityScheme::api_key("X-API-Key", ApiKeyLocation::Header)?,
    )?;
    let limit = components.parameter("limit").cloned().ok_or(OpenApiError::InvalidValue)?;
    let next = components.header("x-next").cloned().ok_or(OpenApiError::InvalidValue)?;
    let unexpected = components
        .response("UnexpectedError")
        .cloned()
        .ok_or(OpenApiError::InvalidValue)?;

    let list = Operation::new(
        Responses::new(unexpected.clone()).with_response(
            200,
            Response::new("application/json", ArraySchema::new(pet.clone()).with_max_items(100)?)?
                .with_description("A paged array of pets")
                .with_header("x-next", next)?,
        )?,
    )
    .with_tag("pets")
    .with_summary("List all pets")
    .with_operation_id("listPets")
    .with_parameter(limit);

    let create = Operation::new(
        Responses::new(unexpected.clone())
            .with_response(201, Response::new("application/json", pet.clone())?.with_description("Created"))?,
    )
    .with_tag("pets")
    .with_summary("Create a pet")
    .with_operation_id("createPets")
    .with_request_body(RequestBody::new("application/json", pet.clone())?.with_required(true))
    .with_security(SecurityRequirement::new("api_key")?);

    let show = Operation::new(
        Responses::new(unexpected)
            .with_response(200, Response::new("application/json", pet)?.with_description("Expected response"))?,
    )
    .with_tag("pets")
    .with_summary("Info for a specific pet")
    .with_operation_id("showPetById")
    .with_parameter(
        Parameter::path("petId")?
            .with_description("The id of the pet to retrieve")
            .with_schema(StringSchema::new()),
    );

    let info = Info::new("Swagger Petstore", "1.0.0")?.with_license(License::new("MIT", None)?);

    Ok(OpenApi::new(info)
        .with_server(Server::new("http://petstore.swagger.io/v1")?)
        .with_path(
            PathItem::new("/pets", HttpMethod::Get, list)?.with_operation(HttpMethod::Post, create),
        )
        .with_path(PathItem::new("/pets/{petId}", HttpMethod::Get, show)?)
        .with_components(components)
        .with_tag(Tag::new("pets")?.with_description("Everything about your pets"))
        .with_security(SecurityRequirement::new("api_key")?))
}

