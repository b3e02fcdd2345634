//! Domain model (IDs, records, states, events).

pub mod batch;
pub mod candidate;
pub mod developer;
pub mod events;
pub mod ids;
pub mod project;
pub mod skill;
pub mod state;

pub use batch::AssignmentBatch;
pub use candidate::AssignmentCandidate;
pub use developer::DeveloperProfile;
pub use events::DomainEvent;
pub use ids::{BatchId, CandidateId, DeveloperId, ProjectId};
pub use project::ProjectRecord;
pub use skill::{ExperienceLevel, Skill};
pub use state::{ProjectStatus, ResponseStatus};
