//! Genre DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::Genre;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGenreDto {
    #[validate(length(min = 2, max = 50, message = "name must be between 2 and 50 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignGenreDto {
    pub genre_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreResponseDto {
    pub id: Uuid,
    pub name: String,
}

impl From<Genre> for GenreResponseDto {
    fn from(genre: Genre) -> Self {
        Self {
            id: *genre.id().as_uuid(),
            name: genre.name().to_string(),
        }
    }
}
