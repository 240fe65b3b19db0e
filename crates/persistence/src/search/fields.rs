//! The accepted field set of the flexible-search criteria language.
//!
//! One static table drives both the parser (whitelist) and the compiler (type
//! coercion and comparison strategy), so the two can never disagree about what
//! a field is.

/// How a field's raw value is coerced and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer column compared with the clause operator.
    Integer,
    /// Text column matched with `LIKE %value%` whatever the operator.
    Text,
    /// Composite "label by magnitude" list compiled into regex predicates.
    Affects,
}

/// One entry of the accepted field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Lower-case field name as written in criteria.
    pub name: &'static str,
    /// Column of the `Lore` table.
    pub column: &'static str,
    /// Coercion and comparison strategy.
    pub kind: FieldKind,
}

const fn field(name: &'static str, column: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, column, kind }
}

/// Every field the criteria language accepts.
pub static LORE_FIELDS: &[FieldSpec] = &[
    field("speed", "SPEED", FieldKind::Integer),
    field("accuracy", "ACCURACY", FieldKind::Integer),
    field("power", "POWER", FieldKind::Integer),
    field("charges", "CHARGES", FieldKind::Integer),
    field("weight", "WEIGHT", FieldKind::Integer),
    field("item_value", "ITEM_VALUE", FieldKind::Integer),
    field("apply", "APPLY", FieldKind::Integer),
    field("capacity", "CAPACITY", FieldKind::Integer),
    field("container_size", "CONTAINER_SIZE", FieldKind::Integer),
    field("object_name", "OBJECT_NAME", FieldKind::Text),
    field("item_type", "ITEM_TYPE", FieldKind::Text),
    field("item_is", "ITEM_IS", FieldKind::Text),
    field("submitter", "SUBMITTER", FieldKind::Text),
    field("restricts", "RESTRICTS", FieldKind::Text),
    field("class", "CLASS", FieldKind::Text),
    field("mat_class", "MAT_CLASS", FieldKind::Text),
    field("material", "MATERIAL", FieldKind::Text),
    field("immune", "IMMUNE", FieldKind::Text),
    field("effects", "EFFECTS", FieldKind::Text),
    field("damage", "DAMAGE", FieldKind::Text),
    field("can_use", "CAN_USE", FieldKind::Text),
    field("affects", "AFFECTS", FieldKind::Affects),
];

/// Looks up a field by name, ignoring ASCII case.
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    LORE_FIELDS
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}
