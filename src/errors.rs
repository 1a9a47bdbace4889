use thiserror::Error;

#[derive(Error, Debug)]
pub enum BattleError {
    /// Persisting a snapshot failed. Reported once to the caller; a
    /// save-and-exit still exits afterwards.
    #[error("failed to save battle: {0}")]
    SaveFailed(#[from] std::io::Error),

    /// A combat invariant broke mid-transaction (e.g. level below 1).
    /// Programming fault: the resolver halts instead of continuing on a
    /// corrupted tick. Load corruption is not represented here; the save
    /// manager degrades that to "no saved session".
    #[error("combat invariant violated: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, BattleError>;
