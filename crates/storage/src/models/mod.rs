pub mod corporate_group;
pub mod games;
pub mod profile;
pub mod recruitment;
pub mod step;
pub mod submission;

pub use corporate_group::CorporateVolunteerGroup;
pub use games::{GamesInformation, UniformSize};
pub use profile::ProfileInformation;
pub use recruitment::{
    ExperienceLevel, RecruitmentPreferences, Sport, TimeSlot, Venue, VolunteerRole,
};
pub use step::{EoiStep, SubmissionProgress};
pub use submission::{EoiSubmission, SubmissionStatus, VolunteerType};
