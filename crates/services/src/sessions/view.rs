use practice_core::model::Difficulty;

/// Render-ready summary of a running session, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub difficulty: Difficulty,
    pub score: i32,
    pub seen: usize,
    pub total: usize,
    pub is_complete: bool,
}
