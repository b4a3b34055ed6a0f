/// Arguments supplied at one invocation of a traced function.
///
/// Named arguments keep the order they were supplied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgs<V> {
    positional: Vec<V>,
    named: Vec<(String, V)>,
}

impl<V> Default for CallArgs<V> {
    fn default() -> Self {
        CallArgs {
            positional: vec![],
            named: vec![],
        }
    }
}

impl<V> CallArgs<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: V) -> Self {
        self.push_arg(value);
        self
    }

    pub fn kwarg(mut self, name: impl Into<String>, value: V) -> Self {
        self.push_kwarg(name, value);
        self
    }

    pub fn push_arg(&mut self, value: V) {
        self.positional.push(value);
    }

    /// Supplying a name twice replaces the earlier value in place.
    pub fn push_kwarg(&mut self, name: impl Into<String>, value: V) {
        let name = name.into();
        match self.named.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.named.push((name, value)),
        }
    }

    pub fn positional(&self) -> &[V] {
        &self.positional
    }

    pub fn named(&self) -> &[(String, V)] {
        &self.named
    }

    pub fn kwarg_value(&self, name: &str) -> Option<&V> {
        self.named.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub fn into_parts(self) -> (Vec<V>, Vec<(String, V)>) {
        (self.positional, self.named)
    }
}
