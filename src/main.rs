// --- Catálogo de Oferta Educativa de Querétaro - Archivo principal ---

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use eduqro::catalogo::init_db;
use eduqro::config::Config;
use eduqro::server::{EstadoApp, run_server};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::desde_env().map_err(std::io::Error::other)?;

    // Un almacén ausente no impide arrancar: la API responde degradada y la
    // sonda /api/salud delata el problema.
    if let Err(e) = init_db(&config.db) {
        warn!("no se pudo inicializar el catálogo: {e}");
    }

    info!("Iniciando servidor en http://{}", config.bind);
    run_server(&config.bind, EstadoApp::nuevo(config.db)).await
}
