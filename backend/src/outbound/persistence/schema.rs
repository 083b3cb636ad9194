//! Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        full_name -> Text,
        /// Unique across all users.
        email_address -> Text,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    courses (id) {
        id -> Uuid,
        owner_id -> Uuid,
        title -> Text,
        description -> Text,
        estimated_time -> Nullable<Text>,
        materials_needed -> Nullable<Text>,
        /// Ordered array of `{stepNumber, title, description}` objects.
        steps -> Jsonb,
        /// Insertion sequence used for listing order.
        created_seq -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// At most one row per `(course_id, author_id)`.
    reviews (id) {
        id -> Uuid,
        course_id -> Uuid,
        author_id -> Uuid,
        posted_on -> Timestamptz,
        rating -> Int2,
        review -> Nullable<Text>,
    }
}

diesel::table! {
    /// Review references held by a course, ordered by `seq`.
    course_reviews (course_id, review_id) {
        course_id -> Uuid,
        review_id -> Uuid,
        seq -> Int8,
    }
}

diesel::joinable!(courses -> users (owner_id));
diesel::joinable!(course_reviews -> courses (course_id));
diesel::joinable!(course_reviews -> reviews (review_id));

diesel::allow_tables_to_appear_in_same_query!(course_reviews, courses, reviews, users);
