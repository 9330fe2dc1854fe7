// Domain layer: booking models and ports (interfaces).

pub mod model;
pub mod ports;
