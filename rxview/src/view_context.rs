/// Snapshot handed to a mounted view.
///
/// Built once per transition into a value-bearing view and never mutated.
/// [`implicit`](Self::implicit) and [`value`](Self::value) are two names for
/// the same binding.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewContext<T> {
    value: Option<T>,
}

impl<T> ViewContext<T> {
    pub fn new(value: T) -> Self {
        Self { value: Some(value) }
    }

    /// Context for a completion that arrived before any value.
    pub fn empty() -> Self {
        Self { value: None }
    }

    pub fn implicit(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.value
    }
}

impl<T> From<Option<T>> for ViewContext<T> {
    fn from(value: Option<T>) -> Self {
        Self { value }
    }
}
