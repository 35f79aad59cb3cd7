use crate::books::domain::model::Book;
use crate::catalog::domain::model::Catalog;
use crate::core::library::SearchField;

// Filters a collection of catalog books, keeping their relative order. A blank query
// keeps everything. Matching is case-insensitive: substring for title, author,
// publisher and category, whole value for isbn.
pub fn search<'a, I>(catalog: &Catalog, collection: I, query: &str, field: SearchField) -> Vec<&'a Book>
    where I: IntoIterator<Item = &'a Book> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return collection.into_iter().collect();
    }
    collection.into_iter()
        .filter(|book| matches(catalog, book, query.as_str(), field))
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches(catalog: &Catalog, book: &Book, query: &str, field: SearchField) -> bool {
    let title = || contains(book.title.as_str(), query);
    let isbn = || book.isbn.to_lowercase() == query;
    let author = || catalog.author_names(book).any(|name| contains(name, query));
    match field {
        SearchField::Title => title(),
        SearchField::Isbn => isbn(),
        SearchField::Author => author(),
        SearchField::General => {
            title()
                || isbn()
                || author()
                || contains(catalog.publisher_name(book), query)
                || book.category.as_deref().map(|c| contains(c, query)).unwrap_or(false)
        }
    }
}
