//! Capability seams shared by every visual component.
//!
//! Rendering and layout are external collaborators; components here only
//! carry direction, viewport geometry, and the capability traits they
//! compose by delegation.

use async_trait::async_trait;

/// Navigation direction through an ordered photo list.
///
/// Maps to the `-1`/`+1` step convention of the carousel contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward lower indexes.
    Back,
    /// Toward higher indexes.
    Forward,
}

impl Direction {
    /// The signed index step for this direction.
    #[must_use]
    pub fn step(self) -> i64 {
        match self {
            Self::Back => -1,
            Self::Forward => 1,
        }
    }

    /// The sign applied to horizontal slide offsets.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Back => -1.0,
            Self::Forward => 1.0,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Back => Self::Forward,
            Self::Forward => Self::Back,
        }
    }
}

/// A horizontal swipe gesture.
///
/// Swipe direction and index direction are inverted: swiping left reveals
/// content to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moves left.
    Left,
    /// Finger moves right.
    Right,
}

impl Swipe {
    /// The navigation direction this gesture maps to.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Self::Left => Direction::Forward,
            Self::Right => Direction::Back,
        }
    }
}

/// Viewport geometry in logical units, passed explicitly to components that
/// compute fitted sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical units.
    pub width: f64,
    /// Height in logical units.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Components that reveal and hide themselves through timed animation.
#[async_trait]
pub trait Animatable: Send + Sync {
    /// Reveals the component; resolves when the reveal animation completes.
    async fn animate_in(&self);

    /// Hides the component; resolves when the hide animation completes.
    async fn animate_out(&self);
}

/// Components that recompute their fitted size on viewport changes.
pub trait Resizable {
    /// Recomputes the fitted display size for the given viewport.
    ///
    /// A no-op before the component's asset has loaded.
    fn resize(&self, viewport: Viewport);
}

/// Components that are torn down exactly once.
pub trait Destroyable {
    /// Destroys the component. Returns `true` on the first call, `false`
    /// on every repeat; destruction is latched.
    fn destroy(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_step_and_sign() {
        assert_eq!(Direction::Back.step(), -1);
        assert_eq!(Direction::Forward.step(), 1);
        assert_eq!(Direction::Back.sign(), -1.0);
        assert_eq!(Direction::Forward.sign(), 1.0);
    }

    #[test]
    fn test_direction_flipped() {
        assert_eq!(Direction::Back.flipped(), Direction::Forward);
        assert_eq!(Direction::Forward.flipped(), Direction::Back);
    }

    #[test]
    fn test_swipe_inverted_mapping() {
        assert_eq!(Swipe::Left.direction(), Direction::Forward);
        assert_eq!(Swipe::Right.direction(), Direction::Back);
    }
}
