// Domain layer: core models and ports (interfaces) shared by the booking engine and its adapters.

pub mod model;
pub mod ports;
