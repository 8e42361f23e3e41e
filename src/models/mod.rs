pub mod event;

pub use event::{Event, EventFilter, EventRow, Geometry, NewEvent, RenameEvent, WGS84_SRID};
