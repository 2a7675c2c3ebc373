pub mod birthday;
pub mod time;
