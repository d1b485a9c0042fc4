//! Error Types
//!
//! This module defines the error types used throughout the runtime.
//!
//! # Overview
//!
//! The main error type [`SinewError`] covers all failure modes including:
//! - Skeleton construction failures (bad hierarchies, degenerate bind poses)
//! - Curve binding failures (corrupt target paths)
//!
//! Recoverable binding mismatches (a curve naming a bone or property the
//! skeleton does not have) are not errors: the binder drops those curves and
//! reports them through `log::debug!`.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, SinewError>`.
//!
//! ```rust,ignore
//! use sinew::errors::{SinewError, Result};
//!
//! fn build_skeleton() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the Sinew runtime.
///
/// This enum covers all possible error conditions that can occur while
/// constructing a skeleton or binding animation curves to it. Each variant
/// provides specific context about what went wrong.
#[derive(Error, Debug)]
pub enum SinewError {
    // ========================================================================
    // Skeleton Construction Errors
    // ========================================================================
    /// A bone record references a parent that was never flattened.
    #[error("Bone '{bone}' references a parent outside the flattened hierarchy")]
    UnknownParentBone {
        /// Name of the bone whose parent could not be resolved
        bone: String,
    },

    /// A bone's accumulated bind-pose matrix could not be inverted.
    #[error("Bind pose for bone '{bone}' is degenerate and cannot be inverted")]
    DegenerateBindPose {
        /// Name of the bone with the non-invertible bind pose
        bone: String,
    },

    // ========================================================================
    // Curve Binding Errors
    // ========================================================================
    /// A curve's target path carried more than two `.`-separated property
    /// segments.
    #[error("Malformed target path '{path}': too many property segments")]
    MalformedTargetPath {
        /// The offending curve path
        path: String,
    },

    /// A short curve path named something other than the skeleton root.
    #[error("Target path '{path}' does not start at skeleton root '{root}'")]
    TargetPathMismatch {
        /// The offending curve path
        path: String,
        /// Name of the skeleton's root bone
        root: String,
    },
}

/// Alias for `Result<T, SinewError>`.
pub type Result<T> = std::result::Result<T, SinewError>;
