//! Genre Domain Model

use super::ids::GenreId;
use super::rules::{check_length, GENRE_NAME_MAX_CHARS, GENRE_NAME_MIN_CHARS};
use crate::shared::errors::DomainError;

/// Genre domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    id: GenreId,
    name: String,
}

impl Genre {
    /// Create a new genre from a (possibly padded) name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is not 2 to 50 characters.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        check_length("name", name, GENRE_NAME_MIN_CHARS, GENRE_NAME_MAX_CHARS)?;
        Ok(Self {
            id: GenreId::new(),
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn restore(id: GenreId, name: String) -> Self {
        Self { id, name }
    }

    #[must_use]
    pub fn id(&self) -> &GenreId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_trim_and_bound_genre_names() {
        assert_eq!(Genre::new("  Jazz  ").unwrap().name(), "Jazz");
        assert!(Genre::new(" J ").is_err());
        assert!(Genre::new(&"x".repeat(51)).is_err());
    }
}
