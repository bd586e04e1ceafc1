//! Repository factory trait
//!
//! Lets the backend build a repository from a client without knowing which
//! concrete repository type it gets.

/// A factory creating repository instances of type `R` from a config or client `C`.
pub trait RepositoryFactory<R, C> {
    fn create_repository(&self, config: C) -> R;
}
