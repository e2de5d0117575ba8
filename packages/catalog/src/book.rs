//! The book record.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Session-scoped identity of a book in the library.
///
/// Assigned by [`LibraryStore`](crate::LibraryStore) when a book enters the
/// collection and never persisted. Two books with identical fields still have
/// different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(u64);

impl BookId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "book-{}", self.0)
    }
}

/// A page count as entered.
///
/// Form input is parsed at the boundary: a plain non-negative integer becomes
/// `Count`, anything else (including an empty field) is carried as `Raw`.
/// Stored data keeps whatever shape it was written in, so a string `"442"`
/// read back from storage stays `Raw("442")` and is written back as a string,
/// and a stored `-1` or `442.5` stays a JSON number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pages {
    Count(u64),
    /// A stored JSON number that is not a non-negative integer.
    Number(serde_json::Number),
    Raw(String),
}

impl Pages {
    /// Parse a form field value.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(count) = trimmed.parse() {
                return Pages::Count(count);
            }
        }
        Pages::Raw(input.to_string())
    }

    /// The count, if this is a parsed integer.
    pub fn count(&self) -> Option<u64> {
        match self {
            Pages::Count(n) => Some(*n),
            Pages::Number(_) | Pages::Raw(_) => None,
        }
    }
}

impl Default for Pages {
    fn default() -> Self {
        Pages::Raw(String::new())
    }
}

impl fmt::Display for Pages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pages::Count(n) => write!(f, "{}", n),
            Pages::Number(n) => write!(f, "{}", n),
            Pages::Raw(s) => f.write_str(s),
        }
    }
}

impl Serialize for Pages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Pages::Count(n) => serializer.serialize_u64(*n),
            Pages::Number(n) => n.serialize(serializer),
            Pages::Raw(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Pages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Pages::from_json(serde_json::Value::deserialize(deserializer)?))
    }
}

impl Pages {
    /// Stored shape to `Pages`: non-negative integers are counts, other
    /// numbers stay numbers, `null` is empty, everything else is kept as its
    /// text.
    fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Pages::default(),
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(count) => Pages::Count(count),
                None => Pages::Number(n),
            },
            serde_json::Value::String(s) => Pages::Raw(s),
            other => Pages::Raw(other.to_string()),
        }
    }
}

/// The four user-visible fields of a book, as entered or as persisted.
///
/// Missing or `null` fields in stored records fall back to empty values
/// rather than failing the whole load. `pages` accepts any JSON value. The
/// other fields are strict: a `title` or `author` that is not a string, or a
/// `read` that is not a boolean, is a decode error for the whole collection,
/// so the stored text is never rewritten in a different shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookFields {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    pub pages: Pages,
    #[serde(deserialize_with = "null_as_default")]
    pub read: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One catalog entry.
///
/// Serializes to the persisted record shape (`title`, `author`, `pages`,
/// `read`); the id stays in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    #[serde(skip)]
    id: BookId,
    title: String,
    author: String,
    pages: Pages,
    read: bool,
}

impl Book {
    pub fn new(id: BookId, fields: BookFields) -> Self {
        let BookFields {
            title,
            author,
            pages,
            read,
        } = fields;
        Self {
            id,
            title,
            author,
            pages,
            read,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn pages(&self) -> &Pages {
        &self.pages
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    /// `"Read"` or `"Not yet read"`.
    pub fn read_display(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Not yet read"
        }
    }

    /// Label of the control that flips the read flag; the inverse of the
    /// current state.
    pub fn toggle_label(&self) -> &'static str {
        if self.read {
            "Mark Unread"
        } else {
            "Mark Read"
        }
    }

    /// Flip the read flag in place. Persisting and re-rendering are up to the
    /// caller.
    pub fn toggle_read(&mut self) {
        self.read = !self.read;
    }

    /// One-line summary built from this book's own fields.
    pub fn info(&self) -> String {
        format!(
            "{} by {}, {} pages, {}",
            self.title,
            self.author,
            self.pages,
            if self.read { "read" } else { "not read yet" }
        )
    }

    /// A copy of the user-visible fields.
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author.clone(),
            pages: self.pages.clone(),
            read: self.read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lotr() -> Book {
        Book::new(
            BookId::new(1),
            BookFields {
                title: "LOTR".to_string(),
                author: "Tolkien".to_string(),
                pages: Pages::Count(442),
                read: false,
            },
        )
    }

    #[test]
    fn read_display_tracks_toggle() {
        let mut book = lotr();
        assert_eq!(book.read_display(), "Not yet read");
        assert_eq!(book.toggle_label(), "Mark Read");

        book.toggle_read();
        assert!(book.is_read());
        assert_eq!(book.read_display(), "Read");
        assert_eq!(book.toggle_label(), "Mark Unread");

        book.toggle_read();
        assert!(!book.is_read());
        assert_eq!(book.read_display(), "Not yet read");
    }

    #[test]
    fn info_uses_own_fields() {
        let mut book = lotr();
        assert_eq!(book.info(), "LOTR by Tolkien, 442 pages, not read yet");
        book.toggle_read();
        assert_eq!(book.info(), "LOTR by Tolkien, 442 pages, read");
    }

    #[test]
    fn pages_parse() {
        assert_eq!(Pages::parse("442"), Pages::Count(442));
        assert_eq!(Pages::parse(" 12 "), Pages::Count(12));
        assert_eq!(Pages::parse(""), Pages::Raw(String::new()));
        assert_eq!(Pages::parse("-3"), Pages::Raw("-3".to_string()));
        assert_eq!(Pages::parse("about 300"), Pages::Raw("about 300".to_string()));
        assert_eq!(
            Pages::parse("99999999999999999999999"),
            Pages::Raw("99999999999999999999999".to_string())
        );
    }

    #[test]
    fn pages_keep_stored_shape() {
        let number: Pages = serde_json::from_str("442").unwrap();
        assert_eq!(number, Pages::Count(442));
        assert_eq!(serde_json::to_string(&number).unwrap(), "442");

        let string: Pages = serde_json::from_str("\"442\"").unwrap();
        assert_eq!(string, Pages::Raw("442".to_string()));
        assert_eq!(serde_json::to_string(&string).unwrap(), "\"442\"");

        let negative: Pages = serde_json::from_str("-1").unwrap();
        assert_eq!(negative, Pages::Number(serde_json::Number::from(-1i64)));
        assert_eq!(negative.count(), None);
        assert_eq!(serde_json::to_string(&negative).unwrap(), "-1");

        let fraction: Pages = serde_json::from_str("442.5").unwrap();
        assert_eq!(fraction.to_string(), "442.5");
        assert_eq!(serde_json::to_string(&fraction).unwrap(), "442.5");

        let null: Pages = serde_json::from_str("null").unwrap();
        assert_eq!(null, Pages::default());
    }

    #[test]
    fn fields_tolerate_missing_and_null() {
        let fields: BookFields = serde_json::from_str(r#"{"title": "Dune", "author": null}"#).unwrap();
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.author, "");
        assert_eq!(fields.pages, Pages::default());
        assert!(!fields.read);
    }

    #[test]
    fn fields_reject_mistyped_scalars() {
        assert!(serde_json::from_str::<BookFields>(r#"{"title": 1984}"#).is_err());
        assert!(serde_json::from_str::<BookFields>(r#"{"author": ["Orwell"]}"#).is_err());
        assert!(serde_json::from_str::<BookFields>(r#"{"read": "yes"}"#).is_err());
    }

    #[test]
    fn book_serializes_without_id() {
        let json = serde_json::to_value(lotr()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "LOTR",
                "author": "Tolkien",
                "pages": 442,
                "read": false,
            })
        );
    }

    #[test]
    fn fields_round_trip_through_book() {
        let book = lotr();
        let copy = Book::new(BookId::new(2), book.fields());
        assert_eq!(copy.fields(), book.fields());
        assert_ne!(copy, book);
    }
}
