//! The application root.
//!
//! [`Catalog`] owns the library store, the table and the intake form, and is
//! the only place the three meet. Mutations always go store first, then view.

use bookshelf_kv_store::StorageAdapter;

use crate::book::{Book, BookFields};
use crate::error::CatalogError;
use crate::intake::BookForm;
use crate::library::{LibraryStore, LoadOptions};
use crate::projector::{RowId, TableView};

pub struct Catalog<S> {
    library: LibraryStore<S>,
    view: TableView,
    form: BookForm,
}

impl<S: StorageAdapter> Catalog<S> {
    /// Load the library from `storage` and render it.
    pub fn open(storage: S, options: LoadOptions) -> Result<Self, CatalogError> {
        Ok(Self::new(LibraryStore::load(storage, options)?))
    }

    /// Wrap an already loaded library and render it.
    pub fn new(library: LibraryStore<S>) -> Self {
        let mut view = TableView::new();
        view.render_library(library.books());
        Self {
            library,
            view,
            form: BookForm::new(),
        }
    }

    /// Submit the intake form and add the resulting book.
    pub fn submit_form(&mut self) -> Result<RowId, CatalogError> {
        let fields = self.form.submit()?;
        Ok(self.add_book(fields))
    }

    /// Add a book and append its row.
    pub fn add_book(&mut self, fields: BookFields) -> RowId {
        let book = self.library.add(fields);
        self.view.append_row(book)
    }

    /// Toggle the read flag of the book shown in `row` and patch that row.
    pub fn toggle_row(&mut self, row: RowId) -> Result<&Book, CatalogError> {
        let id = self.view.row_book(row).ok_or(CatalogError::UnknownRow(row))?;
        let book = self
            .library
            .toggle_read(id)
            .ok_or(CatalogError::UnknownRow(row))?;
        self.view.patch_read(book);
        Ok(book)
    }

    /// Remove the book shown in `row` along with the row itself.
    pub fn remove_row(&mut self, row: RowId) -> Result<Book, CatalogError> {
        let id = self.view.row_book(row).ok_or(CatalogError::UnknownRow(row))?;
        let book = self
            .library
            .remove(id)
            .ok_or(CatalogError::UnknownRow(row))?;
        self.view.remove_row(id);
        Ok(book)
    }

    /// The book shown in `row`.
    pub fn book_at(&self, row: RowId) -> Result<&Book, CatalogError> {
        self.view
            .row_book(row)
            .and_then(|id| self.library.get(id))
            .ok_or(CatalogError::UnknownRow(row))
    }

    pub fn library(&self) -> &LibraryStore<S> {
        &self.library
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    /// Tear down, handing back the storage adapter.
    pub fn into_storage(self) -> S {
        self.library.into_storage()
    }
}
