//! Attendance logic: the dedup gate, roster completion and the read side.

pub mod checkin;
pub mod completion;
pub mod digest;
pub mod log;
pub mod registry;
pub mod report;

pub use checkin::{CheckinLogic, CheckinOutcome, CheckinRequest, TimestampInput};
pub use completion::RosterComplete;
pub use digest::DigestLogic;
pub use registry::{LineRegistry, LineRepository};
pub use report::ReportLogic;
