use thiserror::Error;

use crate::sim::BubbleId;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no bubble with id {0}")]
    UnknownBubble(BubbleId),

    #[error("cannot merge bubble {0} with itself")]
    SelfMerge(BubbleId),

    #[error("bubble {id} holds {value}, fish needs {target}")]
    NotEdible { id: BubbleId, value: u32, target: u32 },

    #[error("session is not accepting moves")]
    NotPlaying,
}
