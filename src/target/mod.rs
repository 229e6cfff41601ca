//! condition targets
//!
//! a target is anything a condition chain can be evaluated against. instead
//! of one type per input kind, targets advertise capabilities and the
//! condition builders expose the predicates those capabilities allow.

mod field;
mod group;

pub use field::{Field, FieldKind, FileInfo, SelectOption};
pub use group::{FieldGroup, GroupKind};

/// the enablement flag every target carries
///
/// mutating operations on a target are no-ops while it is disabled
pub trait Gate {
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}

/// a target with a current textual value
pub trait HasValue: Gate {
    fn value(&self) -> Option<&str>;

    /// whether value comparisons are numeric rather than lexicographic
    fn is_numeric(&self) -> bool {
        false
    }
}

/// a target with attached files
pub trait HasFiles {
    fn file_count(&self) -> usize;
}

/// a target with a checked state (radio, checkbox)
pub trait HasChecked {
    fn is_checked(&self) -> bool;
}

/// a target with selectable options
pub trait HasOptions {
    fn selected_values(&self) -> Vec<&str>;
}

/// an ordered collection of single targets with a pass quorum
pub trait Collection: Gate {
    type Item;

    fn items(&self) -> &[Self::Item];

    /// minimum number of items that must pass; 0 means all of them
    fn pass_option(&self) -> usize;

    fn set_pass_option(&mut self, quorum: usize);
}
