//! Domain types and models

pub mod report;
pub mod session;
pub mod user;

pub use report::{Assignment, Attachment, NewReport, Page, Report, ReportLocation, ReportStatus, Task};
pub use session::{CredentialPair, Destination, Role, TokenPair};
pub use user::CurrentUser;
