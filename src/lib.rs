pub mod decoder;
pub mod error;
pub mod output;
pub mod path;
pub mod predicate;
pub mod query;
pub mod result;
pub mod sort;
pub mod value;

pub use decoder::{Decoder, DefaultDecoder};
pub use error::QueryError;
pub use output::{to_json, to_json_pretty};
pub use predicate::{PredicateFn, Registry};
pub use query::{Options, Query};
pub use result::QueryResult;
pub use value::Value;
