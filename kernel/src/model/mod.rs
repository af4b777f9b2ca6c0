pub mod bag;
pub mod establishment;
pub mod id;
pub mod reservation;
pub mod user;
