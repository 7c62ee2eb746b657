// Domain layer: value types and the store ports the handlers are generic over.

pub mod model;
pub mod ports;
