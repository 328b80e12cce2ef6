// Domain layer: models and ports (interfaces) for the decode provider and reference lookups.

pub mod model;
pub mod ports;
