// Domain layer: the collection element types and the ports (interfaces) the core depends on.

pub mod model;
pub mod ports;
