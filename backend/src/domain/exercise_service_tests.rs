//! Tests for the exercise service.

use super::*;
use crate::domain::ports::{MockExerciseRepository, MockUserRepository, UserPersistenceError};
use crate::domain::{Description, DurationMinutes, ErrorCode, Username};
use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::{fixture, rstest};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_now(),
    })
}

#[fixture]
fn user() -> User {
    User::new(
        RecordId::generate(),
        Username::new("ellie").expect("valid username"),
        vec![RecordId::generate(), RecordId::generate()],
    )
}

fn request_for(user: &User, date: Option<DateTime<Utc>>) -> AddExerciseRequest {
    AddExerciseRequest {
        user_id: *user.id(),
        description: Description::new("morning run").expect("valid description"),
        duration: DurationMinutes::new(30.0).expect("valid duration"),
        date,
    }
}

fn users_returning(user: Option<User>) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(user));
    users
}

#[rstest]
#[tokio::test]
async fn add_exercise_inserts_then_appends(user: User) {
    let mut users = users_returning(Some(user.clone()));
    let owner = *user.id();
    users
        .expect_append_to_log()
        .withf(move |user_id, _| *user_id == owner)
        .times(1)
        .return_once(|_, _| Ok(()));
    let mut exercises = MockExerciseRepository::new();
    let exercise_id = RecordId::generate();
    exercises
        .expect_insert()
        .withf(move |draft| draft.user == owner)
        .times(1)
        .return_once(move |draft| Ok(Exercise::from_draft(exercise_id, draft.clone())));
    let service = ExerciseService::new(Arc::new(users), Arc::new(exercises), fixture_clock());

    let exercise = service
        .add_exercise(request_for(&user, None))
        .await
        .expect("exercise recorded");

    assert_eq!(exercise.id(), &exercise_id);
    assert_eq!(exercise.user(), user.id());
    assert_eq!(exercise.date(), fixture_now());
}

#[rstest]
#[tokio::test]
async fn add_exercise_keeps_an_explicit_date(user: User) {
    let explicit = Utc
        .with_ymd_and_hms(2020, 1, 2, 0, 0, 0)
        .single()
        .expect("valid date");
    let mut users = users_returning(Some(user.clone()));
    users.expect_append_to_log().return_once(|_, _| Ok(()));
    let mut exercises = MockExerciseRepository::new();
    exercises
        .expect_insert()
        .return_once(|draft| Ok(Exercise::from_draft(RecordId::generate(), draft.clone())));
    let service = ExerciseService::new(Arc::new(users), Arc::new(exercises), fixture_clock());

    let exercise = service
        .add_exercise(request_for(&user, Some(explicit)))
        .await
        .expect("exercise recorded");

    assert_eq!(exercise.date(), explicit);
}

#[rstest]
#[tokio::test]
async fn add_exercise_for_unknown_user_writes_nothing(user: User) {
    let users = users_returning(None);
    let mut exercises = MockExerciseRepository::new();
    exercises.expect_insert().never();
    let service = ExerciseService::new(Arc::new(users), Arc::new(exercises), fixture_clock());

    let err = service
        .add_exercise(request_for(&user, None))
        .await
        .expect_err("unknown user");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");
}

#[rstest]
#[case::query_failure(UserPersistenceError::query("deadlock"))]
#[case::user_vanished(UserPersistenceError::missing_user("65f1c0de0000000000000001"))]
#[tokio::test]
async fn failed_append_surfaces_as_internal_error(
    user: User,
    #[case] failure: UserPersistenceError,
) {
    let mut users = users_returning(Some(user.clone()));
    users
        .expect_append_to_log()
        .return_once(move |_, _| Err(failure));
    let mut exercises = MockExerciseRepository::new();
    exercises
        .expect_insert()
        .return_once(|draft| Ok(Exercise::from_draft(RecordId::generate(), draft.clone())));
    let service = ExerciseService::new(Arc::new(users), Arc::new(exercises), fixture_clock());

    let err = service
        .add_exercise(request_for(&user, None))
        .await
        .expect_err("append failed");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn get_log_resolves_window_against_the_clock(user: User) {
    let expected_ids = user.log().to_vec();
    let users = users_returning(Some(user.clone()));
    let mut exercises = MockExerciseRepository::new();
    exercises
        .expect_find_in_window()
        .withf(move |ids, window| {
            ids.to_vec() == expected_ids
                && window.from == DateTime::<Utc>::UNIX_EPOCH
                && window.to == fixture_now()
                && window.limit.is_none()
                && window.skip == 0
        })
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));
    let service = ExerciseService::new(Arc::new(users), Arc::new(exercises), fixture_clock());

    let mut query = LogQuery::for_user(*user.id());
    query.limit = Some(0);
    let log = service.get_log(query).await.expect("log loaded");

    assert_eq!(log.user(), &user);
    assert_eq!(log.count(), 0);
}

#[rstest]
#[tokio::test]
async fn get_log_for_unknown_user_is_not_found(user: User) {
    let users = users_returning(None);
    let mut exercises = MockExerciseRepository::new();
    exercises.expect_find_in_window().never();
    let service = ExerciseService::new(Arc::new(users), Arc::new(exercises), fixture_clock());

    let err = service
        .get_log(LogQuery::for_user(*user.id()))
        .await
        .expect_err("unknown user");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn get_log_maps_storage_failure_to_internal(user: User) {
    let users = users_returning(Some(user.clone()));
    let mut exercises = MockExerciseRepository::new();
    exercises
        .expect_find_in_window()
        .return_once(|_, _| Err(ExercisePersistenceError::connection("pool exhausted")));
    let service = ExerciseService::new(Arc::new(users), Arc::new(exercises), fixture_clock());

    let err = service
        .get_log(LogQuery::for_user(*user.id()))
        .await
        .expect_err("storage failure");

    assert_eq!(err.code(), ErrorCode::InternalError);
}
