use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate catalog field: {name}")]
    DuplicateField { name: String },
    #[error("duplicate stable id {stable_id} shared by {first} and {second}")]
    DuplicateStableId {
        stable_id: String,
        first: String,
        second: String,
    },
    #[error("catalog field {name} has a negative unit price")]
    NegativePrice { name: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
