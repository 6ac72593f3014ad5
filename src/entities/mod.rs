pub mod prelude;

pub mod station_facilities;
