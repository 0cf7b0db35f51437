// Domain layer: request/response models and the client port. No HTTP here.

pub mod insight;
pub mod model;
pub mod ports;
