// Domain layer: keyboard catalog, preference models and ports. No I/O here.

pub mod catalog;
pub mod model;
pub mod ports;
