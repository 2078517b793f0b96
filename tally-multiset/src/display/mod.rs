//! Textual rendering of multisets.
//!
//! Every rendering goes through [`Show`], which is built with an explicit
//! [`DisplayMode`]. The process-wide mode read by `impl Display for Multiset`
//! is only a default for callers that don't pick one.

#[cfg(test)]
mod test;

use crate::Multiset;
use lazy_static::lazy_static;
use log::debug;
use std::{
    fmt,
    str::FromStr,
    sync::{PoisonError, RwLock},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// `{1,2,2}`
    #[default]
    Braces,
    /// `Multiset<i32> with 3 elements`
    Short,
    /// `Multiset(i32[1,2,2])`
    Constructor,
}

impl DisplayMode {
    pub const ALL: &'static [DisplayMode] = &[
        DisplayMode::Braces,
        DisplayMode::Short,
        DisplayMode::Constructor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Braces => "braces",
            DisplayMode::Short => "short",
            DisplayMode::Constructor => "constructor",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown display mode {input:?} (expected braces, short or constructor)")]
pub struct ParseDisplayModeError {
    pub input: String,
}

impl FromStr for DisplayMode {
    type Err = ParseDisplayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDisplayModeError {
                input: s.to_string(),
            })
    }
}

lazy_static! {
    static ref DISPLAY_MODE: RwLock<DisplayMode> = RwLock::new(DisplayMode::default());
}

/// The mode used when a multiset is formatted with `{}`.
pub fn display_mode() -> DisplayMode {
    *DISPLAY_MODE.read().unwrap_or_else(PoisonError::into_inner)
}

/// Changes the mode used by every later `{}` formatting of every multiset.
pub fn set_display_mode(mode: DisplayMode) {
    let mut current = DISPLAY_MODE.write().unwrap_or_else(PoisonError::into_inner);
    if *current != mode {
        debug!("display mode changed from {} to {}", *current, mode);
    }
    *current = mode;
}

/// The name of `A` with module paths removed, e.g. `Option<String>`.
pub fn type_name<A: ?Sized>() -> String {
    strip_module_paths(std::any::type_name::<A>())
}

fn strip_module_paths(name: &str) -> String {
    let mut stripped = String::with_capacity(name.len());
    let mut segment_start = 0;
    let mut rest = name;
    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("::") {
            stripped.truncate(segment_start);
            rest = after;
            continue;
        }
        stripped.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = stripped.len();
        }
        rest = &rest[c.len_utf8()..];
    }
    stripped
}

/// A multiset's elements captured in rendering order, paired with a mode.
pub struct Show<'a, A> {
    elements: Vec<&'a A>,
    mode: DisplayMode,
}

impl<A> Multiset<A> {
    /// Renders the elements in ascending order.
    pub fn show(&self, mode: DisplayMode) -> Show<'_, A>
    where
        A: Ord,
    {
        let mut elements: Vec<&A> = self.elements().collect();
        elements.sort();
        Show { elements, mode }
    }

    /// Renders the elements in iteration order, for element types without an ordering.
    pub fn show_unordered(&self, mode: DisplayMode) -> Show<'_, A> {
        Show {
            elements: self.elements().collect(),
            mode,
        }
    }
}

fn write_separated<A>(
    f: &mut fmt::Formatter<'_>,
    elements: &[&A],
    write_element: impl Fn(&mut fmt::Formatter<'_>, &A) -> fmt::Result,
) -> fmt::Result {
    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            f.write_str(",")?;
        }
        write_element(f, *element)?;
    }
    Ok(())
}

fn write_constructor<A: fmt::Debug>(f: &mut fmt::Formatter<'_>, elements: &[&A]) -> fmt::Result {
    write!(f, "Multiset({}[", type_name::<A>())?;
    write_separated(f, elements, |f, element| write!(f, "{:?}", element))?;
    f.write_str("])")
}

impl<'a, A: fmt::Display + fmt::Debug> fmt::Display for Show<'a, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            DisplayMode::Braces => {
                f.write_str("{")?;
                write_separated(f, &self.elements, |f, element| write!(f, "{}", element))?;
                f.write_str("}")
            }
            DisplayMode::Short => write!(
                f,
                "Multiset<{}> with {} elements",
                type_name::<A>(),
                self.elements.len()
            ),
            DisplayMode::Constructor => write_constructor(f, &self.elements),
        }
    }
}

impl<A: Ord + fmt::Display + fmt::Debug> fmt::Display for Multiset<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.show(display_mode()), f)
    }
}

impl<A: fmt::Debug> fmt::Debug for Multiset<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements: Vec<&A> = self.elements().collect();
        write_constructor(f, &elements)
    }
}
