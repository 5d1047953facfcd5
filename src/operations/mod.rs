pub mod edit;
pub mod fitting;
pub mod query;
