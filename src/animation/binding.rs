//! Target-path grammar for curve binding.
//!
//! Every curve in a clip is named by a path that tells the binder which bone
//! and which transform property the curve drives:
//!
//! ```text
//! Root/Spine/Spine:LocalRotation.x
//! ^^^^ ^^^^^       ^^^^^^^^^^^^^ ^
//! root walk        property      component (optional)
//! ```
//!
//! Slash segments spell the walk from the skeleton root; the final segment
//! carries a colon-separated object qualifier and the dot-separated property
//! name. A path with one or two slash segments addresses the root bone
//! itself and must start with the root's name.

use crate::errors::{Result, SinewError};

/// The closed set of bone properties a curve can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// `LocalPosition`: bone-local translation (`Vec3`)
    Position,
    /// `LocalRotation`: bone-local orientation (`Quat`)
    Rotation,
}

impl PropertyKind {
    /// Maps a property name onto the closed kind set. Unknown names resolve
    /// to `None` and the binder drops the curve.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "LocalPosition" => Some(Self::Position),
            "LocalRotation" => Some(Self::Rotation),
            _ => None,
        }
    }
}

/// Single-lane selector from a path's trailing component segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    X,
    Y,
    Z,
    W,
}

impl Component {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            "w" => Some(Self::W),
            _ => None,
        }
    }
}

/// A curve path decomposed into its bone walk and property target.
#[derive(Debug, Clone)]
pub struct TargetPath<'a> {
    /// All slash segments in order; the last one still carries the
    /// object:property suffix.
    pub segments: Vec<&'a str>,
    /// Property name from the final segment.
    pub property: &'a str,
    /// Optional component suffix, not yet validated against the property.
    pub component: Option<&'a str>,
}

impl<'a> TargetPath<'a> {
    /// Splits `path` by the binding grammar.
    ///
    /// More than two dot-separated property segments means the asset is
    /// corrupt, which fails hard; everything else parses and is judged
    /// later against the actual skeleton.
    pub fn parse(path: &'a str) -> Result<Self> {
        let segments: Vec<&str> = path.split('/').collect();
        let last = segments.last().copied().unwrap_or(path);

        // The object qualifier before ':' only documents which bone the
        // property lives on; the walk has already decided that.
        let target = last.rsplit(':').next().unwrap_or(last);

        let mut properties = target.split('.');
        let property = properties.next().unwrap_or(target);
        let component = properties.next();
        if properties.next().is_some() {
            return Err(SinewError::MalformedTargetPath {
                path: path.to_string(),
            });
        }

        Ok(Self {
            segments,
            property,
            component,
        })
    }

    /// The bone names to walk through below the root. Empty for short
    /// paths that address the root itself.
    pub fn intermediates(&self) -> &[&'a str] {
        if self.segments.len() > 2 {
            &self.segments[1..self.segments.len() - 1]
        } else {
            &[]
        }
    }
}
