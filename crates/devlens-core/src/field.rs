//! Field taxonomy for selecting a comparison schema.
//!
//! The reconciler compares records projected onto `all fields − ignored`.
//! Which fields count is a per-call policy decision, not a hardcoded one:
//! the API knows nothing of visibility flags, and a UI read may not be able
//! to recover ids. [`FieldSet`] is the value callers pass to make that
//! policy explicit.

/// One named field of a [`DeviceRecord`](crate::DeviceRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Server-assigned identifier.
    Id,
    /// Device name.
    SystemName,
    /// Device type discriminator.
    DeviceType,
    /// Normalized disk capacity.
    HddCapacity,
    /// Edit affordance visibility (UI-only).
    Edit,
    /// Remove affordance visibility (UI-only).
    Remove,
    /// Row visibility (UI-only).
    Displayed,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::SystemName,
        Field::DeviceType,
        Field::HddCapacity,
        Field::Edit,
        Field::Remove,
        Field::Displayed,
    ];

    /// Stable snake_case name, matching the wire schema where one exists.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::SystemName => "system_name",
            Field::DeviceType => "type",
            Field::HddCapacity => "hdd_capacity",
            Field::Edit => "edit",
            Field::Remove => "remove",
            Field::Displayed => "displayed",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Field::Id => 1 << 0,
            Field::SystemName => 1 << 1,
            Field::DeviceType => 1 << 2,
            Field::HddCapacity => 1 << 3,
            Field::Edit => 1 << 4,
            Field::Remove => 1 << 5,
            Field::Displayed => 1 << 6,
        }
    }
}

/// An immutable set of fields, used as the "ignore these" half of a
/// comparison schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSet {
    bits: u8,
}

impl FieldSet {
    /// The empty set: every field participates in comparison.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from a slice of fields.
    #[must_use]
    pub fn of(fields: &[Field]) -> Self {
        let mut set = Self::default();
        for field in fields {
            set.bits |= field.bit();
        }
        set
    }

    /// The UI-only observations: `{edit, remove, displayed}`.
    ///
    /// The usual ignore set when comparing an API read against a UI read;
    /// the API has no counterpart for any of these.
    #[must_use]
    pub fn ui_only() -> Self {
        Self::of(&[Field::Edit, Field::Remove, Field::Displayed])
    }

    /// UI-only observations plus the id: `{id, edit, remove, displayed}`.
    ///
    /// For comparisons where the UI side could not recover ids (e.g. a row
    /// whose edit affordance is missing).
    #[must_use]
    pub fn ui_only_and_id() -> Self {
        Self::of(&[Field::Id, Field::Edit, Field::Remove, Field::Displayed])
    }

    /// Returns a copy of this set with `field` added.
    #[must_use]
    pub fn with(mut self, field: Field) -> Self {
        self.bits |= field.bit();
        self
    }

    /// Whether `field` is in this set.
    #[must_use]
    pub fn contains(self, field: Field) -> bool {
        self.bits & field.bit() != 0
    }

    /// Iterates the member fields in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Whether no field is a member.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = Self::default();
        for field in iter {
            set.bits |= field.bit();
        }
        set
    }
}
