///
/// Operator
///
/// Comparison operators. The null-safe variants are the only operators that
/// never yield UNKNOWN. `AlwaysFalse`, `InList` and `InQuery` are pseudo
/// operators that only ever appear on index conditions; every operator
/// table below treats them as a defect.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    Equal,
    EqualNullSafe,
    NotEqual,
    NotEqualNullSafe,
    GreaterOrEqual,
    Greater,
    LessOrEqual,
    Less,
    SpatialIntersects,
    AlwaysFalse,
    InList,
    InQuery,
}

impl Operator {
    /// Every operator a comparison node may carry.
    pub const COMPARISONS: [Self; 9] = [
        Self::Equal,
        Self::EqualNullSafe,
        Self::NotEqual,
        Self::NotEqualNullSafe,
        Self::GreaterOrEqual,
        Self::Greater,
        Self::LessOrEqual,
        Self::Less,
        Self::SpatialIntersects,
    ];

    #[must_use]
    pub const fn is_null_safe(self) -> bool {
        matches!(self, Self::EqualNullSafe | Self::NotEqualNullSafe)
    }

    /// Apply the null-safe modifier. Only `Equal` and `NotEqual` admit it.
    #[must_use]
    pub const fn null_safe(self) -> Option<Self> {
        match self {
            Self::Equal | Self::EqualNullSafe => Some(Self::EqualNullSafe),
            Self::NotEqual | Self::NotEqualNullSafe => Some(Self::NotEqualNullSafe),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_pseudo(self) -> bool {
        matches!(self, Self::AlwaysFalse | Self::InList | Self::InQuery)
    }

    /// Operator that keeps the truth value when the operands trade places.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::Equal
            | Self::EqualNullSafe
            | Self::NotEqual
            | Self::NotEqualNullSafe
            | Self::SpatialIntersects => self,
            Self::GreaterOrEqual => Self::LessOrEqual,
            Self::Greater => Self::Less,
            Self::LessOrEqual => Self::GreaterOrEqual,
            Self::Less => Self::Greater,
            Self::AlwaysFalse | Self::InList | Self::InQuery => {
                panic!("operator {self:?} has no reverse")
            }
        }
    }

    /// Complementary operator: same operands, opposite truth value.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Equal => Self::NotEqual,
            Self::EqualNullSafe => Self::NotEqualNullSafe,
            Self::NotEqual => Self::Equal,
            Self::NotEqualNullSafe => Self::EqualNullSafe,
            Self::GreaterOrEqual => Self::Less,
            Self::Greater => Self::LessOrEqual,
            Self::LessOrEqual => Self::Greater,
            Self::Less => Self::GreaterOrEqual,
            Self::SpatialIntersects | Self::AlwaysFalse | Self::InList | Self::InQuery => {
                panic!("operator {self:?} has no complement")
            }
        }
    }

    /// Whether a comparison with this operator can bound an index scan.
    #[must_use]
    pub fn is_index_eligible(self) -> bool {
        match self {
            Self::NotEqual | Self::NotEqualNullSafe => false,
            Self::Equal
            | Self::EqualNullSafe
            | Self::GreaterOrEqual
            | Self::Greater
            | Self::LessOrEqual
            | Self::Less
            | Self::SpatialIntersects => true,
            Self::AlwaysFalse | Self::InList | Self::InQuery => {
                panic!("operator {self:?} is not a comparison operator")
            }
        }
    }

    #[must_use]
    pub fn sql_operator(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::EqualNullSafe => "IS NOT DISTINCT FROM",
            Self::NotEqual => "<>",
            Self::NotEqualNullSafe => "IS DISTINCT FROM",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::Less => "<",
            Self::SpatialIntersects => "&&",
            Self::AlwaysFalse | Self::InList | Self::InQuery => {
                panic!("operator {self:?} has no SQL form")
            }
        }
    }
}
