pub mod ingestion;
pub mod reservation;

pub use ingestion::IngestionDispatcher;
pub use reservation::ReservationCoordinator;
