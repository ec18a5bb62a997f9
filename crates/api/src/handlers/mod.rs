pub mod health;
pub mod inventory;
pub mod reservations;
pub mod vitals;
