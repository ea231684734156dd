mod tags;
mod token;
pub mod tokenizer;

pub use tags::{Tag, TagLayer};
pub use token::{Token, TokenCategory};
pub use tokenizer::{tokenize, TokenSource, Tokenizer};
