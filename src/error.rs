/// Errors raised at the engine's API boundary.
///
/// Ordinary misses (empty source, full target, mismatched colors) are not
/// errors; they resolve to an unchanged board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EngineError {
    #[display("container index {index} out of range (board has {len} containers)")]
    InvalidIndex { index: usize, len: usize },
    #[display("cannot pour container {index} into itself")]
    SameContainer { index: usize },
    #[display("invalid difficulty config: {reason}")]
    InvalidConfig { reason: String },
    #[display("container holds {len} units, capacity is 4")]
    ContainerOverflow { len: usize },
    #[display("unknown color symbol {symbol:?}")]
    UnknownColor { symbol: char },
    #[display("next level requested before the current one was won")]
    NotWon,
}
