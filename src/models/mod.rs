pub mod attendance;
pub mod order;
pub mod user;
