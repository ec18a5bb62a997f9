pub mod reservation;

pub use reservation::PostgresReservationCoordinator;
