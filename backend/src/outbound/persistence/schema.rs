//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation. Regenerate with `diesel print-schema` after
//! any migration change.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login name, unique across the system.
        username -> Varchar,
        /// Contact address, unique across the system.
        email -> Varchar,
        /// Argon2id PHC hash string, never a plain password.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rental listings, each owned by one user.
    listings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Short display title (max 100 characters).
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Image URL; the placeholder when none was submitted.
        image_url -> Text,
        /// Nightly price in whole currency units, never negative.
        price -> Int8,
        /// Town or area name.
        location -> Varchar,
        /// Country name.
        country -> Varchar,
        /// Owning user; set at creation and never reassigned.
        owner_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reviews attached to listings. Deleted by cascade with their listing.
    reviews (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Parent listing.
        listing_id -> Uuid,
        /// Bounded rating, 1 to 5 inclusive (checked in the database too).
        rating -> Int4,
        /// Free-form comment.
        comment -> Text,
        /// Record creation timestamp; drives review ordering.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(listings -> users (owner_id));
diesel::joinable!(reviews -> listings (listing_id));

diesel::allow_tables_to_appear_in_same_query!(users, listings, reviews);
