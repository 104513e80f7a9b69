pub mod builder;
pub mod idea;
pub mod profile;

pub use builder::{BuilderAction, BuilderResult};
pub use idea::{assign_ids, Idea, IdeaDraft, IdeaMode, IdeaRequest, UrgencyLevel};
pub use profile::{Budget, Expertise, Profile};
