/// Answers whether the current user may export without a watermark.
///
/// Consulted once per export. Implemented for `bool` and for closures returning `bool`.
pub trait Capability {
    fn has_full_access(&self) -> bool;
}

impl Capability for bool {
    fn has_full_access(&self) -> bool {
        *self
    }
}

impl<F> Capability for F
where
    F: Fn() -> bool,
{
    fn has_full_access(&self) -> bool {
        self()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/capability.rs"]
mod tests;
