pub mod agregacion;

pub use agregacion::ofertas_planas;
