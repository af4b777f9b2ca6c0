pub mod bag;
pub mod establishment;
pub mod reservation;
pub mod user;
