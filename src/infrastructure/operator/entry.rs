//! Concrete operator handed to the CLI.

/// Implements every operator port against the MongoDB adapter and the
/// tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Operator;

impl Operator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}
