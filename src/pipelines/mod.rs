pub mod enrich;
pub mod link;
pub mod parse;
