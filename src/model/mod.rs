mod category;
mod level;
mod profile;
mod submission;

pub use category::{Category, Direction, Metric};
pub use level::{Level, LevelId};
pub use profile::{Profile, ProfileDirectory, PublicUser, UserId};
pub use submission::{Submission, SubmissionId};

#[cfg(test)]
pub(crate) use submission::fixtures;
