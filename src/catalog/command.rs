pub mod get_book_cmd;
pub mod list_books_cmd;
pub mod register_book_cmd;
pub mod search_books_cmd;
