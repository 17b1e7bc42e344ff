use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("unknown card: {0}")]
    UnknownCard(String),

    #[error("unknown mode: {0}")]
    UnknownMode(String),

    #[error("card pinned more than once: {0}")]
    DuplicatePin(String),

    #[error("card listed more than once: {0}")]
    DuplicateCard(String),

    #[error("{pinned} pinned card(s) exceed deck size {size}")]
    PinnedExceedsDeckSize { pinned: usize, size: usize },

    #[error("deck size {size} exceeds catalog size {catalog}")]
    DeckSizeExceedsCatalog { size: usize, catalog: usize },

    #[error("no valid deck: enumeration produced no candidates")]
    NoSolution,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeckError {
    /// Errors raised while validating a request, before any deck is scored.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DeckError::ConfigParse(_)
                | DeckError::UnknownCard(_)
                | DeckError::UnknownMode(_)
                | DeckError::DuplicatePin(_)
                | DeckError::DuplicateCard(_)
                | DeckError::PinnedExceedsDeckSize { .. }
                | DeckError::DeckSizeExceedsCatalog { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
