// Domain layer modules
pub mod change_record;
pub mod item;
pub mod item_patch;

// Re-exports
pub use change_record::{ChangeKind, ChangeRecord};
pub use item::{DEFAULT_PARTITION_KEY, Item, ItemError, ItemId, PartitionKey, into_object};
pub use item_patch::ItemPatch;
