//! Loading the transaction dataset from a remote JSON source into the database.

mod endpoint;
mod source;

pub use endpoint::{IngestMessage, get_initialize_database_endpoint, load_from_source};
pub use source::DEFAULT_SOURCE_URL;
