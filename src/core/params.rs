/*!
Immutable operation parameters with copy-on-write overrides.

A parameter value never changes after construction. Tweaking one goes
through a short-lived builder: derive a builder seeded with every field of
the base value, let the caller mutate it, freeze it into a fresh immutable
value, discard the builder. Because the builder starts from the base and
never outlives one `configure` call, an override-free `configure` returns
a value equal to its base, and two concurrent `configure` calls can never
observe each other's staging state.
*/

use std::fmt::Debug;

/// Immutable configuration for one operation instance.
///
/// `Default` is the process-wide default value for the parameter type.
/// The associated `Builder` is the mutable staging object; seeding it via
/// `From<Self>` forces every field to be initialized from the base value,
/// so no field can silently fall back to something stale.
pub trait Parameters: Clone + PartialEq + Debug + Default {
    /// Mutable staging type, seeded from a base value.
    type Builder: From<Self>;

    /// Freeze a builder into an immutable value.
    fn from_builder(builder: Self::Builder) -> Self;

    /// Copy `self` with the given overrides applied.
    fn configure(&self, overrides: impl FnOnce(&mut Self::Builder)) -> Self {
        let mut builder = Self::Builder::from(self.clone());
        overrides(&mut builder);
        Self::from_builder(builder)
    }
}

/// Build a parameter value from the process-wide default plus overrides.
///
/// The parameter type is named at the call site, since the closure alone
/// does not pin it down: `configure::<AeadParameters, _>(|b| ...)`.
pub fn configure<P, F>(overrides: F) -> P
where
    P: Parameters,
    F: FnOnce(&mut P::Builder),
{
    P::default().configure(overrides)
}
