pub mod cases;
pub mod users;
