//! The artisan row and the shapes of create/update input.

use serde::Serialize;
use serde_json::Value;

/// One persisted artisan, as returned by every read and `RETURNING` clause.
/// `nom` and `profession` are only guaranteed for rows created through the
/// gateway; rows written elsewhere may carry NULL and still list.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Artisan {
    pub id: i64,
    pub nom: Option<String>,
    pub profession: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub note: Option<f64>,
}

/// Writable columns, in the order they appear in INSERT and UPDATE statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Nom,
    Profession,
    Telephone,
    Adresse,
    Note,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Nom,
        Field::Profession,
        Field::Telephone,
        Field::Adresse,
        Field::Note,
    ];

    /// Column name, also the JSON key in request bodies.
    pub fn column(self) -> &'static str {
        match self {
            Field::Nom => "nom",
            Field::Profession => "profession",
            Field::Telephone => "telephone",
            Field::Adresse => "adresse",
            Field::Note => "note",
        }
    }

    /// SQL type the text parameter is cast to.
    pub fn pg_type(self) -> &'static str {
        match self {
            Field::Note => "double precision",
            _ => "text",
        }
    }
}

/// Create input after defaults are applied. Values stay JSON until bound.
#[derive(Clone, Debug, PartialEq)]
pub struct NewArtisan {
    pub nom: Value,
    pub profession: Value,
    pub telephone: Value,
    pub adresse: Value,
    pub note: Value,
}

impl NewArtisan {
    pub fn value(&self, field: Field) -> &Value {
        match field {
            Field::Nom => &self.nom,
            Field::Profession => &self.profession,
            Field::Telephone => &self.telephone,
            Field::Adresse => &self.adresse,
            Field::Note => &self.note,
        }
    }
}

/// Fields present in an update body, kept in [`Field::ALL`] order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtisanPatch {
    entries: Vec<(Field, Value)>,
}

impl ArtisanPatch {
    /// Pushes in caller order; use [`Field::ALL`] order to keep placeholders stable.
    pub fn set(&mut self, field: Field, value: Value) {
        self.entries.push((field, value));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &Value)> {
        self.entries.iter().map(|(f, v)| (*f, v))
    }
}
