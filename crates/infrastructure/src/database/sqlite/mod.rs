pub mod reservation;

pub use reservation::SqliteReservationCoordinator;
