// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod completion_client;
pub mod firecrawl_client;
pub mod google_maps_client;
pub mod itinerary_generator;
pub mod notification;
pub mod place_search;
pub mod route_service;
pub mod safety_monitor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use completion_client::*;
pub use firecrawl_client::*;
pub use google_maps_client::*;
pub use itinerary_generator::*;
pub use notification::*;
pub use place_search::*;
pub use route_service::*;
pub use safety_monitor::*;
pub use traits::*;
