use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("template: unterminated action at byte {offset}")]
    UnterminatedAction { offset: usize },

    #[error("failed to serialize tests: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FormatError {
    pub fn unterminated_action(offset: usize) -> Self {
        Self::UnterminatedAction { offset }
    }
}
