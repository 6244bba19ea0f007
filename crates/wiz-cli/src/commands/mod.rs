pub mod dispatch;
pub mod field;
pub mod flatten;
pub mod schema;
pub mod shared;
pub mod sources;
pub mod validate;
