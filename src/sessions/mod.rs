pub mod cookie;
pub mod middleware;
pub mod store;
