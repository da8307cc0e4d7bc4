//! Catalog operation handlers.

mod create_book;
mod delete_book;
mod get_book;
mod list_books;
mod update_book;

pub use create_book::{CreateBookCommand, CreateBookHandler};
pub use delete_book::{DeleteBookCommand, DeleteBookHandler};
pub use get_book::{GetBookHandler, GetBookQuery};
pub use list_books::{ListBooksHandler, ListBooksQuery};
pub use update_book::{UpdateBookCommand, UpdateBookHandler};
