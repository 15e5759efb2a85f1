// Infrastructure layer modules
pub mod attribute_codec;
pub mod config;
pub mod item_repository;
pub mod logging;
pub mod stream_record;

// Re-exports
pub use attribute_codec::CodecError;
pub use config::{DynamoDbConfig, DynamoDbConfigError, TableSettings};
pub use item_repository::{DynamoItemRepository, ItemRepository, RepositoryError};
pub use logging::init_logging;
pub use stream_record::{DecodedStreamRecord, StreamRecordError, decode_stream_record};
