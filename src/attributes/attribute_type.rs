use strum::Display;

/// The semantic type of an attribute, as declared to the expression environment.
///
/// Displays in the snake_case form used by diagnostics and the environment log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AttributeType {
    String,
    StringList,
    Boolean,
    BooleanList,
    Integer,
    IntegerList,
    Timestamp,
}
