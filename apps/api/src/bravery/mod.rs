pub mod enhancer;
pub mod execution;
pub mod handlers;
pub mod patterns;
pub mod scorer;
