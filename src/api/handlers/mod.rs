pub mod catalogos;
pub mod comunidad;
pub mod escuelas;
pub mod instituciones;
pub mod ofertas;
pub mod salud;

pub use catalogos::*;
pub use comunidad::*;
pub use escuelas::*;
pub use instituciones::*;
pub use ofertas::*;
pub use salud::*;
