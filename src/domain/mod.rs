// Domain layer: league records, derived standings types and the ports the job talks through.

pub mod model;
pub mod ports;
