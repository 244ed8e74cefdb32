pub mod generated_item;
pub mod trivia_record;
pub use generated_item::GeneratedItem;
pub use trivia_record::{RawTriviaRecord, RawValue};
