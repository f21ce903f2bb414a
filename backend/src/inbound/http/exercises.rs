//! Exercise API handlers.
//!
//! ```text
//! POST /exercise/add {"userId":"…","description":"running","duration":10,"date":"2018-08-01"}
//! GET /exercise/log?userId=…&from=2018-01-01&to=2018-12-31&limit=5&skip=0
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::domain::ports::AddExerciseRequest;
use crate::domain::{Description, DurationMinutes, ExerciseValidationError, LogQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorBody, ExerciseLogResponse, ExerciseResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldErrors, FieldName, optional_count_param, optional_date_param, optional_date_value,
    record_id, required_number, required_string,
};

const USER_ID: FieldName = FieldName::new("userId");
const DESCRIPTION: FieldName = FieldName::new("description");
const DURATION: FieldName = FieldName::new("duration");
const DATE: FieldName = FieldName::new("date");
const FROM: FieldName = FieldName::new("from");
const TO: FieldName = FieldName::new("to");
const LIMIT: FieldName = FieldName::new("limit");
const SKIP: FieldName = FieldName::new("skip");

/// Body for `POST /exercise/add`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseBody {
    #[schema(value_type = String, example = "5b6e1a2c3d4e5f6071829304")]
    pub user_id: Option<Value>,
    #[schema(value_type = String, example = "running")]
    pub description: Option<Value>,
    /// Minutes, as a number or numeric string.
    #[schema(value_type = f64, example = 10)]
    pub duration: Option<Value>,
    /// Defaults to now.
    #[schema(value_type = Option<String>, example = "2018-08-01")]
    pub date: Option<Value>,
}

/// Query string for `GET /exercise/log`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogQueryParams {
    /// Owner's 24-hex id.
    pub user_id: Option<String>,
    /// Earliest date to include; defaults to the Unix epoch.
    pub from: Option<String>,
    /// Latest date to include; defaults to now.
    pub to: Option<String>,
    /// Maximum entries to return; `0` means no limit.
    pub limit: Option<String>,
    /// Entries to skip after sorting.
    pub skip: Option<String>,
}

fn exercise_field_error(err: ExerciseValidationError) -> (FieldName, String) {
    match err {
        ExerciseValidationError::DescriptionTooShort { min } => (
            DESCRIPTION,
            format!("\"description\" length must be at least {min} characters long"),
        ),
        ExerciseValidationError::DescriptionTooLong { max } => (
            DESCRIPTION,
            format!("\"description\" length must be less than or equal to {max} characters long"),
        ),
        ExerciseValidationError::DurationNotFinite => {
            (DURATION, "\"duration\" must be a number".to_owned())
        }
        ExerciseValidationError::DurationNegative => (
            DURATION,
            "\"duration\" must be greater than or equal to 0".to_owned(),
        ),
    }
}

fn parse_add_exercise(body: &AddExerciseBody) -> ApiResult<AddExerciseRequest> {
    let mut errors = FieldErrors::new();
    let user_id = errors.check(
        required_string(body.user_id.as_ref(), USER_ID).and_then(|raw| record_id(&raw, USER_ID)),
    );
    let description = errors.check(
        required_string(body.description.as_ref(), DESCRIPTION)
            .and_then(|raw| Description::new(raw).map_err(exercise_field_error)),
    );
    let duration = errors.check(
        required_number(body.duration.as_ref(), DURATION)
            .and_then(|minutes| DurationMinutes::new(minutes).map_err(exercise_field_error)),
    );
    let date = errors.check(optional_date_value(body.date.as_ref(), DATE));

    let request = user_id
        .zip(description)
        .zip(duration)
        .zip(date)
        .map(
            |(((user_id, description), duration), date)| AddExerciseRequest {
                user_id,
                description,
                duration,
                date,
            },
        );
    errors.resolve(request)
}

fn parse_log_query(params: &LogQueryParams) -> ApiResult<LogQuery> {
    let mut errors = FieldErrors::new();
    let user_id = errors.check(
        params
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| (USER_ID, "\"userId\" is required".to_owned()))
            .and_then(|raw| record_id(raw, USER_ID)),
    );
    let from = errors.check(optional_date_param(params.from.as_deref(), FROM));
    let to = errors.check(optional_date_param(params.to.as_deref(), TO));
    let limit = errors.check(optional_count_param(params.limit.as_deref(), LIMIT));
    let skip = errors.check(optional_count_param(params.skip.as_deref(), SKIP));

    let query = user_id
        .zip(from)
        .zip(to)
        .zip(limit.zip(skip))
        .map(|(((user_id, from), to), (limit, skip))| LogQuery {
            user_id,
            from,
            to,
            limit,
            skip,
        });
    errors.resolve(query)
}

/// Record an exercise for an existing user.
#[utoipa::path(
    post,
    path = "/exercise/add",
    request_body = AddExerciseBody,
    responses(
        (status = 200, description = "Exercise recorded", body = ExerciseResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["exercises"],
    operation_id = "addExercise"
)]
#[post("/add")]
pub async fn add_exercise(
    state: web::Data<HttpState>,
    payload: web::Json<AddExerciseBody>,
) -> ApiResult<web::Json<ExerciseResponse>> {
    let request = parse_add_exercise(&payload)?;
    let exercise = state.exercises.add_exercise(request).await?;
    Ok(web::Json(ExerciseResponse::from(&exercise)))
}

/// Fetch a user's log, newest first.
#[utoipa::path(
    get,
    path = "/exercise/log",
    params(LogQueryParams),
    responses(
        (status = 200, description = "User with filtered log", body = ExerciseLogResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["exercises"],
    operation_id = "getLog"
)]
#[get("/log")]
pub async fn get_log(
    state: web::Data<HttpState>,
    params: web::Query<LogQueryParams>,
) -> ApiResult<web::Json<ExerciseLogResponse>> {
    let query = parse_log_query(&params)?;
    let log = state.exercise_log.get_log(query).await?;
    Ok(web::Json(ExerciseLogResponse::from(&log)))
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
