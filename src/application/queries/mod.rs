pub mod audit;
pub mod cases;
pub mod users;
