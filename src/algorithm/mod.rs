/// Fixed-capacity bitset over tile ids
pub mod bitset;
/// Per-cell possibility state with incremental entropy
pub mod cell;
/// Generation loop with restarts, retry ceiling and cancellation
pub mod executor;
/// Support counting and worklist propagation
pub mod propagation;
/// Next-cell selection heuristics
pub mod selection;
/// Grid of cells and the select, collapse, propagate cycle
pub mod wave;
