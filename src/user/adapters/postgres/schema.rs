//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Store-assigned user identifier.
        id -> Int8,
        /// Canonical `"SSSS NNNNNN"` passport, unique across users.
        #[max_length = 11]
        passport_number -> Varchar,
        /// Family name.
        surname -> Varchar,
        /// Given name.
        name -> Varchar,
        /// Optional patronymic.
        patronymic -> Nullable<Varchar>,
        /// Postal address.
        address -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
