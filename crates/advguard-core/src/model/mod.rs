pub mod advisory;
pub mod document;
pub mod event;
pub mod ids;
pub mod snapshot;

pub use advisory::Advisory;
pub use document::{Document, Package, DOCUMENT_SUFFIX};
pub use event::{Event, EventData, EventKind};
pub use ids::IdScheme;
pub use snapshot::Snapshot;
