pub mod errors;
pub mod forms;
pub mod middleware;
pub mod payment;
pub mod routes;
pub mod server;
pub mod templates;

use csrf::AesGcmCsrfProtection;

pub struct AppState {
    pub csrf_protec: AesGcmCsrfProtection,
}
