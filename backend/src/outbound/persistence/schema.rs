//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Keep in step with the migrations by hand or with `diesel print-schema`.

diesel::table! {
    /// Registered users. `log` holds exercise ids in append order.
    users (id) {
        id -> Varchar,
        username -> Varchar,
        log -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recorded exercises; `user_id` names the owner at creation time.
    exercises (id) {
        id -> Varchar,
        user_id -> Varchar,
        description -> Varchar,
        duration -> Float8,
        date -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(exercises, users);
