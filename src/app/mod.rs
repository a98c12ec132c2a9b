// Application layer - Use case interactors

pub mod container;
pub mod normalize_interactor;

// Re-export interactors
pub use normalize_interactor::{NormalizeInteractor, NormalizeRequest};
