/// Fixed-universe bitsets for candidate and allow-set tracking
pub mod bitset;
/// Generation orchestration and the collapse state machine
pub mod executor;
/// Worklist constraint propagation
pub mod propagation;
/// Entropy-guided cell selection
pub mod selection;
/// Per-cell superposition storage with cached entropy
pub mod superposition;
