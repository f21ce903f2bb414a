//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every handler and response schema. The document backs
//! Swagger UI in debug builds and the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::exercises::AddExerciseBody;
use crate::inbound::http::schemas::{
    ErrorBody, ExerciseLogResponse, ExerciseResponse, LogEntryResponse, UserResponse,
};
use crate::inbound::http::users::NewUserBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise tracker API",
        description = "Register users, record exercises, and query filtered exercise logs."
    ),
    servers(
        (url = "/", description = "Routes at the deployment root"),
        (url = "/api", description = "The same routes under the /api prefix")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::exercises::add_exercise,
        crate::inbound::http::exercises::get_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorBody,
        UserResponse,
        NewUserBody,
        AddExerciseBody,
        ExerciseResponse,
        LogEntryResponse,
        ExerciseLogResponse
    )),
    tags(
        (name = "users", description = "User registration and listing"),
        (name = "exercises", description = "Exercise recording and log queries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/exercise/users")]
    #[case("/exercise/new-user")]
    #[case("/exercise/add")]
    #[case("/exercise/log")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("ErrorBody", "status")]
    #[case("ErrorBody", "message")]
    #[case("ExerciseLogResponse", "count")]
    #[case("ExerciseResponse", "user")]
    #[case("AddExerciseBody", "userId")]
    fn schemas_carry_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }
}
