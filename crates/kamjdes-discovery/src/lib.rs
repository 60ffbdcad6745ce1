pub mod cuisine;
pub mod engine;
pub mod error;
pub mod filter_options;
pub mod geolocation;
pub mod grouping;
pub mod location_groups;
pub mod proximity;

pub use cuisine::CuisineMatcher;
pub use engine::Discovery;
pub use error::DiscoveryError;
pub use filter_options::{
    compute_available_options, filter_entities, location_matches, sort_entities,
    visible_quick_filters, FilterOptions, Selection, SortStrategy,
};
pub use geolocation::{
    locate, CoordinateSource, FixedCoordinateSource, GeolocationError, Generation,
    RequestGeneration,
};
pub use grouping::{
    group_by_cuisine, group_by_cuisine_labels, group_by_location, EntityGroup, EntityGroups,
    GroupPolicy,
};
pub use location_groups::LocationGroupResolver;
pub use proximity::{
    can_widen, find_nearby, format_distance, haversine_km, next_radius, NearbyMatch,
    EARTH_RADIUS_KM, RADIUS_OPTIONS_KM,
};
