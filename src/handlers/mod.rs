pub mod auth;
pub mod fallback;
pub mod health;
pub mod mentor;
pub mod merchandise;
pub mod pages;

#[cfg(test)]
pub(crate) mod test_support;
