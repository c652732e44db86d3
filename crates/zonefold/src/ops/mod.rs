//! Clue operations: records, the dispatcher/fold, and execution strategies.
//!
//! The single boundary collaborators use is `compute_aggregate_region`
//! (or `FoldRequest` + an `Executor` when the fold should run off-thread).

mod dispatch;
mod exec;
mod operation;

pub use dispatch::{
    apply_operation, apply_operation_with, compute_aggregate_region,
    compute_aggregate_region_with, direction_half_plane, fold_trace,
};
pub use exec::{Executor, FoldRequest, Inline, Pending, Worker};
pub use operation::{
    display_order, merge_operations, operations_from_facts, Areas, CloserToLine, Direction,
    DrawCircle, Fact, HotterColder, LonLat, Operation, OperationKind, PolygonLocation,
    SameClosestLine, SplitByDirection,
};
