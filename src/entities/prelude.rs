pub use super::station_facilities::Entity as StationFacilities;
