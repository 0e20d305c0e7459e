//! Diesel schema for task persistence.

diesel::table! {
    /// Tracked work intervals.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Owning user; rows are removed with the user.
        user_id -> Int8,
        /// Free-text description.
        description -> Text,
        /// Start timestamp.
        start_time -> Timestamptz,
        /// End timestamp; `NULL` while the task is open.
        end_time -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
