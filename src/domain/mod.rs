// Domain layer: core models, location catalog and ports (interfaces).

pub mod locations;
pub mod model;
pub mod ports;
