pub mod criteria;
pub mod facility;

pub use criteria::{FilterCriteria, LineMatch};
pub use facility::{FacilityRecord, OperationalState};
