use serde::Serialize;

/// Append-only record of the intermediate steps of one computation.
/// Serializes as a plain JSON array in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace<S> {
    steps: Vec<S>,
}

impl<S> Default for Trace<S> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<S> Trace<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: S) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.steps.iter()
    }

    pub fn last(&self) -> Option<&S> {
        self.steps.last()
    }

    pub fn into_steps(self) -> Vec<S> {
        self.steps
    }
}

impl<S> Extend<S> for Trace<S> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.steps.extend(iter);
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
