use std::any::Any;

/// A displayable object produced by a reader.
pub trait Node {
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn Node + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Node").field(&self.name()).finish()
    }
}
