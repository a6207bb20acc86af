// Domain layer: core models and ports (interfaces). No external collaborators
// beyond serde/async-trait where needed.

pub mod model;
pub mod ports;
