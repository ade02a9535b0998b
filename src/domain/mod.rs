// Domain layer: the check catalog, the request descriptor, the navigation mask and the
// ports the client side implements. Nothing here performs I/O.

pub mod codec;
pub mod mask;
pub mod model;
pub mod ports;
