pub mod bag;
pub mod establishment;
pub mod health;
pub mod reservation;
pub mod user;
