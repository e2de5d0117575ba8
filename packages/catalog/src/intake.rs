//! The new-book form.

use std::fmt;
use std::str::FromStr;

use crate::book::{BookFields, Pages};
use crate::error::CatalogError;

/// The form's pair of read-status radio buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadChoice {
    Read,
    NotYetRead,
}

impl FromStr for ReadChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "read" | "true" => Ok(ReadChoice::Read),
            "no" | "n" | "unread" | "not" | "false" => Ok(ReadChoice::NotYetRead),
            other => Err(format!("expected yes or no, got '{}'", other)),
        }
    }
}

impl fmt::Display for ReadChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadChoice::Read => f.write_str("Read"),
            ReadChoice::NotYetRead => f.write_str("Not yet read"),
        }
    }
}

/// Intake form state: hidden or open, plus the four raw field values.
///
/// Fields can only be edited while the form is open. Submitting turns the
/// values into [`BookFields`], empties every field and hides the form again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    open: bool,
    title: String,
    author: String,
    pages: String,
    read: Option<ReadChoice>,
}

impl BookForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal the form. Values typed before a cancel are kept.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the form without submitting.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_title(&mut self, value: &str) -> Result<(), CatalogError> {
        self.ensure_open()?;
        self.title = value.to_string();
        Ok(())
    }

    pub fn set_author(&mut self, value: &str) -> Result<(), CatalogError> {
        self.ensure_open()?;
        self.author = value.to_string();
        Ok(())
    }

    pub fn set_pages(&mut self, value: &str) -> Result<(), CatalogError> {
        self.ensure_open()?;
        self.pages = value.to_string();
        Ok(())
    }

    pub fn set_read(&mut self, choice: ReadChoice) -> Result<(), CatalogError> {
        self.ensure_open()?;
        self.read = Some(choice);
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn pages(&self) -> &str {
        &self.pages
    }

    pub fn read(&self) -> Option<ReadChoice> {
        self.read
    }

    /// Read the four values into a candidate book, then reset and hide.
    ///
    /// An unset read choice counts as not read.
    pub fn submit(&mut self) -> Result<BookFields, CatalogError> {
        self.ensure_open()?;
        let fields = BookFields {
            title: std::mem::take(&mut self.title),
            author: std::mem::take(&mut self.author),
            pages: Pages::parse(&self.pages),
            read: self.read == Some(ReadChoice::Read),
        };
        self.clear();
        self.open = false;
        Ok(fields)
    }

    /// Empty every field and unset the read choice.
    pub fn clear(&mut self) {
        self.title.clear();
        self.author.clear();
        self.pages.clear();
        self.read = None;
    }

    fn ensure_open(&self) -> Result<(), CatalogError> {
        if self.open {
            Ok(())
        } else {
            Err(CatalogError::FormClosed)
        }
    }
}
