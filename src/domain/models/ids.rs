//! Typed identifiers
//!
//! Newtype wrappers around UUIDs so ids of different entities cannot be mixed up.

use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random id
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an id from an existing UUID
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = uuid::Error;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Ok(Self(Uuid::parse_str(value)?))
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user
    UserId
);
define_id!(
    /// Identifier of a login session
    SessionId
);
define_id!(
    /// Identifier of a catalog track
    TrackId
);
define_id!(
    /// Identifier of an album
    AlbumId
);
define_id!(
    /// Identifier of a genre
    GenreId
);
define_id!(
    /// Identifier of a user playlist
    PlaylistId
);
define_id!(
    /// Identifier of a listening history entry
    HistoryEntryId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(TrackId::new(), TrackId::new());
    }

    #[test]
    fn id_parses_from_string() {
        let raw = "550e8400-e29b-41d4-a716-446655440000";
        let id = AlbumId::try_from(raw).unwrap();
        assert_eq!(id.to_string(), raw);
        assert!(GenreId::try_from("not-a-uuid").is_err());
    }

    #[test]
    fn id_roundtrips_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(UserId::from_uuid(uuid).as_uuid(), &uuid);
    }
}
