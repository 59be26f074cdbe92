pub mod entry;
pub mod locale;
pub mod session;
pub mod table;

pub use entry::{Project, ProjectIndex, RawEntry};
pub use locale::Locale;
pub use session::{END_OF_DAY, START_OF_DAY, Session, WorkDay};
pub use table::{TimesheetRow, TimesheetTable};
