mod reconciler;

pub use reconciler::{
    reconcile, CategorySource, MainSelection, ReconcileMiss, Reconciliation, ReflectSelection,
    TargetSource,
};
