pub mod employee;
pub mod reservation;
