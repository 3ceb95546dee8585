pub mod geometry;
pub mod session;
pub mod table;

pub use geometry::{LineSegment, LineSet, WorkingArea};
pub use linescale_protocol::Point;
pub use session::{DEFAULT_NEW_AREA, DEFAULT_OLD_AREA, Session, SessionError};
pub use table::{LineRow, LineTable, ProcessParameters, TableError};
