//! Applying rendered templates to live files
//!
//! Each target file goes through a small state machine:
//!
//! | snapshot vs target | accepted | action                                  |
//! |--------------------|----------|-----------------------------------------|
//! | no snapshot        | -        | warn, render, write target and snapshot |
//! | byte-equal         | -        | render, write target and snapshot       |
//! | differs            | no       | report [`FileFailure::DriftConflict`]   |
//! | differs            | yes      | render, write target and snapshot       |
//!
//! A render with missing variables becomes
//! [`FileFailure::UnresolvedVariable`] and writes nothing. An unreadable
//! template, target or snapshot, or a failed write, becomes
//! [`FileFailure::Io`]; the remaining targets are still attempted. Snapshots
//! live under `<config-dir>/.files` with the same relative path as the target.

mod diff;
mod guard;
mod report;

pub use diff::{CharDiff, DiffPart, DiffTag};
pub use guard::{AcceptSet, ApplyGuard, ApplyOptions};
pub use report::{AppliedFile, ApplyReport, FileFailure, GuardState};
