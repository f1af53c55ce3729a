use uuid::Uuid;

/// Random version-4 identifier in the hyphenated 8-4-4-4-12 layout.
///
/// Not suitable as a secret; uniqueness is statistical only.
pub fn generate() -> String {
    Uuid::new_v4().hyphenated().to_string()
}
