/// Wire types for the GridMesh platform API
///
/// These structs mirror the JSON shapes the platform produces and consumes.
/// Remote field names are camelCase; the types stay lenient on read
/// (optional fields default) because the platform adds fields over time.

pub mod profile;
pub mod task;

pub use profile::Profile;
pub use task::{Constant, Task, TaskSubmission, TaskSummary};
