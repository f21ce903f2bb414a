//! User API handlers.
//!
//! ```text
//! GET /exercise/users
//! POST /exercise/new-user {"username":"ellie"}
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::CreateUserRequest;
use crate::domain::{UserValidationError, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorBody, UserResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldErrors, FieldName, required_string};

const USERNAME: FieldName = FieldName::new("username");

/// Body for `POST /exercise/new-user`.
///
/// Fields are loosely typed so every problem can be reported at once.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct NewUserBody {
    #[schema(value_type = String, example = "ellie")]
    pub username: Option<Value>,
}

fn username_message(err: &UserValidationError) -> String {
    match err {
        UserValidationError::EmptyUsername => "\"username\" is not allowed to be empty".to_owned(),
        UserValidationError::UsernameInvalidCharacters => {
            "\"username\" may only contain word characters, hyphens, or dots".to_owned()
        }
    }
}

fn parse_new_user(body: &NewUserBody) -> ApiResult<CreateUserRequest> {
    let mut errors = FieldErrors::new();
    let username = errors.check(
        required_string(body.username.as_ref(), USERNAME).and_then(|raw| {
            Username::new(raw).map_err(|err| (USERNAME, username_message(&err)))
        }),
    );
    errors.resolve(username.map(|username| CreateUserRequest { username }))
}

/// List every user, oldest first.
#[utoipa::path(
    get,
    path = "/exercise/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/exercise/new-user",
    request_body = NewUserBody,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid or duplicate username", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/new-user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<NewUserBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let request = parse_new_user(&payload)?;
    let user = state.users.create_user(request).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
