use thiserror::Error;

/// Rejected quiz writes. None of these reach the visitor; the frontend logs
/// them and keeps the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("unknown quiz step `{0}`")]
    UnknownStep(String),
    #[error("step `{requested}` is not the active step (active: {active:?})")]
    InactiveStep {
        requested: String,
        active: Option<&'static str>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route must be an absolute path, got `{0}`")]
    NotAbsolute(String),
    #[error("no page at `{0}`")]
    UnknownPage(String),
    #[error("unknown product id `{0}` in route")]
    Product(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no product with id {0}")]
pub struct CatalogError(pub u32);
