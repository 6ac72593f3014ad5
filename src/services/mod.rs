pub mod cache;
pub use cache::ResultCache;

pub mod status;
pub use status::StatusNormalizer;

pub mod facility_service;
pub mod facility_service_impl;
pub use facility_service::{FacilityError, FacilityService};
pub use facility_service_impl::SeaOrmFacilityService;
