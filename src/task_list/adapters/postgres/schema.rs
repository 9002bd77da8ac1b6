//! Diesel schema for todo persistence.

diesel::table! {
    /// Todo records for a single list.
    todos (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Todo label.
        name -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
