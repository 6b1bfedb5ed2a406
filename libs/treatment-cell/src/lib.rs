pub mod models;
pub mod price;
pub mod handlers;
pub mod router;
pub mod services;

pub use models::*;
pub use price::Price;
pub use router::treatment_routes;
pub use services::TreatmentService;
