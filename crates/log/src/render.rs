use crate::mask::{MaskSet, SENTINEL};
use std::fmt::{self, Debug, Display, Write};

/// Masked `args`/`kwargs` text of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub args: String,
    pub kwargs: String,
}

impl Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "args={} and kwargs={}", self.args, self.kwargs)
    }
}

/// Renders a `Debug` value through `Display`, for types without a `Display` impl.
pub struct Debugged<'a, T: ?Sized>(pub &'a T);

impl<T: Debug + ?Sized> Display for Debugged<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// `masked[i]` tells whether the declared parameter at position `i` is masked.
/// Values past the end of `masked` belong to a variadic capture and are kept.
pub(crate) fn render_positional<V: Display>(values: &[V], masked: &[bool]) -> Result<String, fmt::Error> {
    let mut out = String::from("[");
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if masked.get(i).copied().unwrap_or(false) {
            out.push_str(SENTINEL);
        } else {
            write!(out, "{}", value)?;
        }
    }
    out.push(']');
    Ok(out)
}

pub(crate) fn render_named<V: Display>(named: &[(String, V)], mask: &MaskSet) -> Result<String, fmt::Error> {
    let mut out = String::from("{");
    for (i, (name, value)) in named.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if mask.contains(name) {
            write!(out, "{}: {}", name, SENTINEL)?;
        } else {
            write!(out, "{}: {}", name, value)?;
        }
    }
    out.push('}');
    Ok(out)
}
