use crate::books::domain::model::{Book, BookKey};

pub mod model;

// BookHolder is implemented by the entities that keep non-owning back-references
// to the books they are credited on.
pub trait BookHolder {
    fn name(&self) -> &str;
    fn books(&self) -> &[BookKey];
    fn add_book(&mut self, book: BookKey);

    // true when any held book still has a copy on the shelf
    fn get_availability(&self, arena: &[Book]) -> bool {
        self.books().iter()
            .filter_map(|key| arena.get(key.0))
            .any(Book::get_availability)
    }
}
