pub mod ingestion;
pub mod inventory;
pub mod reservation;

pub use ingestion::{IngestionOutcome, VitalsPayload};
pub use inventory::InventoryItem;
pub use reservation::{Reservation, ReservationStatus};
