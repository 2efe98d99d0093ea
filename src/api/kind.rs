/*!

The kind registry. A `Kind` tags every term node (`AND`, `BITVECTOR_EXTRACT`, `CONST_RATIONAL`, …) and every sort
(`BITVECTOR_SORT`, `ARRAY_SORT`, …). The set of kinds is closed. Each kind carries a static `KindInfo` describing the
shape its nodes must have:

|                | term kinds                                         | sort kinds                        |
|:---------------|:---------------------------------------------------|:----------------------------------|
| arity          | number of children, excluding any operator         | number of component sorts         |
| payload        | constant payload type for `CONST_*` and `*_OP`     | none (sort payloads are implicit) |
| operator       | for parameterized kinds, the kind of the operator  | none                              |
| attributes     | `BooleanValued`, `Parameterized`                   | none                              |

Factory and accessor code matches on this table instead of scattering kind-specific conditionals.

*/

use std::fmt::{Display, Formatter};

use enumflags2::{bitflags, make_bitflags, BitFlags};
use once_cell::sync::Lazy;

use crate::{
  abstractions::HashMap,
  api::{
    Arity,
    constant::PayloadType
  }
};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum KindClass {
  /// Tags a term node.
  Term,
  /// Tags a sort.
  Sort,
}

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum KindAttribute {
  /// Nodes of this kind always have boolean sort.
  BooleanValued,
  /// The first child of a node of this kind is its operator, e.g. the `(_ extract 7 0)` of an extract.
  Parameterized,
}

pub type KindAttributes = BitFlags<KindAttribute, u8>;

/// What a parameterized kind accepts as its operator.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum OperatorSpec {
  None,
  /// A constant node of the given `*_OP` kind.
  Kind(Kind),
  /// Any term, e.g. the function symbol of an uninterpreted function application.
  AnyTerm,
}

#[derive(Debug)]
pub struct KindInfo {
  pub name      : &'static str,
  /// The SMT-LIB symbol for the operator, when there is one.
  pub symbol    : &'static str,
  pub class     : KindClass,
  pub arity     : Arity,
  pub payload   : Option<PayloadType>,
  pub operator  : OperatorSpec,
  pub attributes: KindAttributes,
}

const NO_ATTRIBUTES: KindAttributes = BitFlags::EMPTY;
const BOOLEAN      : KindAttributes = make_bitflags!(KindAttribute::{BooleanValued});
const PARAMETERIZED: KindAttributes = make_bitflags!(KindAttribute::{Parameterized});

/// Generates the `Kind` enum and its static info table from one row per kind.
macro_rules! define_kinds {
  (
    $(
      $variant:ident => $name:literal, $symbol:literal, $class:ident, $arity:expr, $payload:expr, $operator:expr, $attributes:expr;
    )*
  ) => {
    #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
    pub enum Kind {
      $( $variant, )*
    }

    impl Kind {
      /// Every kind, in declaration order.
      pub const ALL: &'static [Kind] = &[ $( Kind::$variant, )* ];

      pub fn info(self) -> &'static KindInfo {
        match self {
          $(
            Kind::$variant => {
              const INFO: KindInfo = KindInfo {
                name      : $name,
                symbol    : $symbol,
                class     : KindClass::$class,
                arity     : $arity,
                payload   : $payload,
                operator  : $operator,
                attributes: $attributes,
              };
              &INFO
            }
          )*
        }
      }
    }
  };
}

use Arity::{Value as Fixed, Variadic};
use OperatorSpec::{AnyTerm, None as NoOp};
use PayloadType as P;

define_kinds! {
  // region Builtin
  Variable              => "VARIABLE",               "",           Term, Fixed(0),    None,                            NoOp, NO_ATTRIBUTES;
  BoundVariable         => "BOUND_VARIABLE",         "",           Term, Fixed(0),    None,                            NoOp, NO_ATTRIBUTES;
  Equal                 => "EQUAL",                  "=",          Term, Variadic(2), None,                            NoOp, BOOLEAN;
  Distinct              => "DISTINCT",               "distinct",   Term, Variadic(2), None,                            NoOp, BOOLEAN;
  Ite                   => "ITE",                    "ite",        Term, Fixed(3),    None,                            NoOp, NO_ATTRIBUTES;
  ApplyUf               => "APPLY_UF",               "",           Term, Variadic(1), None,                            AnyTerm, PARAMETERIZED;
  BoundVarList          => "BOUND_VAR_LIST",         "",           Term, Variadic(1), None,                            NoOp, NO_ATTRIBUTES;
  Forall                => "FORALL",                 "forall",     Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  Exists                => "EXISTS",                 "exists",     Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  Tuple                 => "TUPLE",                  "mkTuple",    Term, Variadic(1), None,                            NoOp, NO_ATTRIBUTES;
  // endregion

  // region Booleans
  ConstBoolean          => "CONST_BOOLEAN",          "",           Term, Fixed(0),    Some(P::Boolean),                NoOp, BOOLEAN;
  Not                   => "NOT",                    "not",        Term, Fixed(1),    None,                            NoOp, BOOLEAN;
  And                   => "AND",                    "and",        Term, Variadic(2), None,                            NoOp, BOOLEAN;
  Or                    => "OR",                     "or",         Term, Variadic(2), None,                            NoOp, BOOLEAN;
  Xor                   => "XOR",                    "xor",        Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  Iff                   => "IFF",                    "=",          Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  Implies               => "IMPLIES",                "=>",         Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  // endregion

  // region Arithmetic
  ConstRational         => "CONST_RATIONAL",         "",           Term, Fixed(0),    Some(P::Rational),               NoOp, NO_ATTRIBUTES;
  Plus                  => "PLUS",                   "+",          Term, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  Minus                 => "MINUS",                  "-",          Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  UMinus                => "UMINUS",                 "-",          Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  Mult                  => "MULT",                   "*",          Term, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  Division              => "DIVISION",               "/",          Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  IntsDivision          => "INTS_DIVISION",          "div",        Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  IntsModulus           => "INTS_MODULUS",           "mod",        Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  Abs                   => "ABS",                    "abs",        Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  Lt                    => "LT",                     "<",          Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  Leq                   => "LEQ",                    "<=",         Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  Gt                    => "GT",                     ">",          Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  Geq                   => "GEQ",                    ">=",         Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  ToReal                => "TO_REAL",                "to_real",    Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  ToInteger             => "TO_INTEGER",             "to_int",     Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  IsInteger             => "IS_INTEGER",             "is_int",     Term, Fixed(1),    None,                            NoOp, BOOLEAN;
  // endregion

  // region Bit-vectors
  ConstBitVector        => "CONST_BITVECTOR",        "",           Term, Fixed(0),    Some(P::BitVector),              NoOp, NO_ATTRIBUTES;
  BitVectorConcat       => "BITVECTOR_CONCAT",       "concat",     Term, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  BitVectorAnd          => "BITVECTOR_AND",          "bvand",      Term, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  BitVectorOr           => "BITVECTOR_OR",           "bvor",       Term, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  BitVectorXor          => "BITVECTOR_XOR",          "bvxor",      Term, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  BitVectorNot          => "BITVECTOR_NOT",          "bvnot",      Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  BitVectorNeg          => "BITVECTOR_NEG",          "bvneg",      Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  BitVectorPlus         => "BITVECTOR_PLUS",         "bvadd",      Term, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  BitVectorSub          => "BITVECTOR_SUB",          "bvsub",      Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  BitVectorMult         => "BITVECTOR_MULT",         "bvmul",      Term, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  BitVectorUdiv         => "BITVECTOR_UDIV",         "bvudiv",     Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  BitVectorUrem         => "BITVECTOR_UREM",         "bvurem",     Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  BitVectorShl          => "BITVECTOR_SHL",          "bvshl",      Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  BitVectorLshr         => "BITVECTOR_LSHR",         "bvlshr",     Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  BitVectorAshr         => "BITVECTOR_ASHR",         "bvashr",     Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  BitVectorUlt          => "BITVECTOR_ULT",          "bvult",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  BitVectorUle          => "BITVECTOR_ULE",          "bvule",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  BitVectorUgt          => "BITVECTOR_UGT",          "bvugt",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  BitVectorUge          => "BITVECTOR_UGE",          "bvuge",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  BitVectorSlt          => "BITVECTOR_SLT",          "bvslt",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  BitVectorSle          => "BITVECTOR_SLE",          "bvsle",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  BitVectorSgt          => "BITVECTOR_SGT",          "bvsgt",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  BitVectorSge          => "BITVECTOR_SGE",          "bvsge",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  BitVectorExtractOp    => "BITVECTOR_EXTRACT_OP",   "extract",    Term, Fixed(0),    Some(P::BitVectorExtract),       NoOp, NO_ATTRIBUTES;
  BitVectorExtract      => "BITVECTOR_EXTRACT",      "extract",    Term, Fixed(1),    None,                            OperatorSpec::Kind(Kind::BitVectorExtractOp), PARAMETERIZED;
  BitVectorZeroExtendOp => "BITVECTOR_ZERO_EXTEND_OP", "zero_extend", Term, Fixed(0), Some(P::BitVectorZeroExtend),    NoOp, NO_ATTRIBUTES;
  BitVectorZeroExtend   => "BITVECTOR_ZERO_EXTEND",  "zero_extend", Term, Fixed(1),   None,                            OperatorSpec::Kind(Kind::BitVectorZeroExtendOp), PARAMETERIZED;
  BitVectorSignExtendOp => "BITVECTOR_SIGN_EXTEND_OP", "sign_extend", Term, Fixed(0), Some(P::BitVectorSignExtend),    NoOp, NO_ATTRIBUTES;
  BitVectorSignExtend   => "BITVECTOR_SIGN_EXTEND",  "sign_extend", Term, Fixed(1),   None,                            OperatorSpec::Kind(Kind::BitVectorSignExtendOp), PARAMETERIZED;
  BitVectorRepeatOp     => "BITVECTOR_REPEAT_OP",    "repeat",     Term, Fixed(0),    Some(P::BitVectorRepeat),        NoOp, NO_ATTRIBUTES;
  BitVectorRepeat       => "BITVECTOR_REPEAT",       "repeat",     Term, Fixed(1),    None,                            OperatorSpec::Kind(Kind::BitVectorRepeatOp), PARAMETERIZED;
  // endregion

  // region Floating-point
  ConstRoundingMode     => "CONST_ROUNDINGMODE",     "",           Term, Fixed(0),    Some(P::RoundingMode),           NoOp, NO_ATTRIBUTES;
  ConstFloatingPoint    => "CONST_FLOATINGPOINT",    "",           Term, Fixed(0),    Some(P::FloatingPoint),          NoOp, NO_ATTRIBUTES;
  FloatingPointFp       => "FLOATINGPOINT_FP",       "fp",         Term, Fixed(3),    None,                            NoOp, NO_ATTRIBUTES;
  FloatingPointEq       => "FLOATINGPOINT_EQ",       "fp.eq",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  FloatingPointAbs      => "FLOATINGPOINT_ABS",      "fp.abs",     Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  FloatingPointNeg      => "FLOATINGPOINT_NEG",      "fp.neg",     Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  FloatingPointPlus     => "FLOATINGPOINT_PLUS",     "fp.add",     Term, Fixed(3),    None,                            NoOp, NO_ATTRIBUTES;
  FloatingPointMult     => "FLOATINGPOINT_MULT",     "fp.mul",     Term, Fixed(3),    None,                            NoOp, NO_ATTRIBUTES;
  FloatingPointLt       => "FLOATINGPOINT_LT",       "fp.lt",      Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  FloatingPointLeq      => "FLOATINGPOINT_LEQ",      "fp.leq",     Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  FloatingPointIsNan    => "FLOATINGPOINT_ISNAN",    "fp.isNaN",   Term, Fixed(1),    None,                            NoOp, BOOLEAN;
  // endregion

  // region Arrays, sets, strings
  Select                => "SELECT",                 "select",     Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  Store                 => "STORE",                  "store",      Term, Fixed(3),    None,                            NoOp, NO_ATTRIBUTES;
  Union                 => "UNION",                  "union",      Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  Intersection          => "INTERSECTION",           "intersection", Term, Fixed(2),  None,                            NoOp, NO_ATTRIBUTES;
  SetMinus              => "SETMINUS",               "setminus",   Term, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  Member                => "MEMBER",                 "member",     Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  Subset                => "SUBSET",                 "subset",     Term, Fixed(2),    None,                            NoOp, BOOLEAN;
  Singleton             => "SINGLETON",              "singleton",  Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  ConstString           => "CONST_STRING",           "",           Term, Fixed(0),    Some(P::String),                 NoOp, NO_ATTRIBUTES;
  StringConcat          => "STRING_CONCAT",          "str.++",     Term, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  StringLength          => "STRING_LENGTH",          "str.len",    Term, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  StringContains        => "STRING_CONTAINS",        "str.contains", Term, Fixed(2),  None,                            NoOp, BOOLEAN;
  // endregion

  // region Sort kinds
  BooleanSort           => "BOOLEAN_SORT",           "Bool",       Sort, Fixed(0),    None,                            NoOp, NO_ATTRIBUTES;
  IntegerSort           => "INTEGER_SORT",           "Int",        Sort, Fixed(0),    None,                            NoOp, NO_ATTRIBUTES;
  RealSort              => "REAL_SORT",              "Real",       Sort, Fixed(0),    None,                            NoOp, NO_ATTRIBUTES;
  StringSort            => "STRING_SORT",            "String",     Sort, Fixed(0),    None,                            NoOp, NO_ATTRIBUTES;
  RoundingModeSort      => "ROUNDINGMODE_SORT",      "RoundingMode", Sort, Fixed(0),  None,                            NoOp, NO_ATTRIBUTES;
  BitVectorSort         => "BITVECTOR_SORT",         "BitVec",     Sort, Fixed(0),    None,                            NoOp, NO_ATTRIBUTES;
  FloatingPointSort     => "FLOATINGPOINT_SORT",     "FloatingPoint", Sort, Fixed(0), None,                            NoOp, NO_ATTRIBUTES;
  ArraySort             => "ARRAY_SORT",             "Array",      Sort, Fixed(2),    None,                            NoOp, NO_ATTRIBUTES;
  SetSort               => "SET_SORT",               "Set",        Sort, Fixed(1),    None,                            NoOp, NO_ATTRIBUTES;
  TupleSort             => "TUPLE_SORT",             "Tuple",      Sort, Variadic(1), None,                            NoOp, NO_ATTRIBUTES;
  FunctionSort          => "FUNCTION_SORT",          "->",         Sort, Variadic(2), None,                            NoOp, NO_ATTRIBUTES;
  DatatypeSort          => "DATATYPE_SORT",          "",           Sort, Variadic(0), None,                            NoOp, NO_ATTRIBUTES;
  SortConstructorSort   => "SORT_CONSTRUCTOR_SORT",  "",           Sort, Fixed(0),    None,                            NoOp, NO_ATTRIBUTES;
  UninterpretedSort     => "UNINTERPRETED_SORT",     "",           Sort, Variadic(0), None,                            NoOp, NO_ATTRIBUTES;
  ParamSort             => "PARAM_SORT",             "",           Sort, Fixed(0),    None,                            NoOp, NO_ATTRIBUTES;
  // endregion
}

/// Name to kind lookup for front ends.
static KIND_BY_NAME: Lazy<HashMap<&'static str, Kind>> = Lazy::new(|| {
  Kind::ALL.iter().map(|kind| (kind.name(), *kind)).collect()
});

impl Kind {
  /// Looks up a kind by its display name, e.g. `"BITVECTOR_EXTRACT"`.
  pub fn from_name(name: &str) -> Option<Kind> {
    KIND_BY_NAME.get(name).copied()
  }

  // region Accessors

  #[inline(always)]
  pub fn name(self) -> &'static str {
    self.info().name
  }

  #[inline(always)]
  pub fn symbol(self) -> &'static str {
    self.info().symbol
  }

  #[inline(always)]
  pub fn class(self) -> KindClass {
    self.info().class
  }

  #[inline(always)]
  pub fn arity(self) -> Arity {
    self.info().arity
  }

  #[inline(always)]
  pub fn payload_type(self) -> Option<PayloadType> {
    self.info().payload
  }

  #[inline(always)]
  pub fn operator(self) -> OperatorSpec {
    self.info().operator
  }

  /// The constant kind a parameterized kind requires as its operator, if it names one.
  pub fn operator_kind(self) -> Option<Kind> {
    match self.operator() {
      OperatorSpec::Kind(kind) => Some(kind),
      _ => None,
    }
  }

  #[inline(always)]
  pub fn is_sort_kind(self) -> bool {
    self.class() == KindClass::Sort
  }

  #[inline(always)]
  pub fn is_term_kind(self) -> bool {
    self.class() == KindClass::Term
  }

  /// Does this kind carry a constant payload?
  #[inline(always)]
  pub fn is_constant_kind(self) -> bool {
    self.payload_type().is_some()
  }

  #[inline(always)]
  pub fn is_variable_kind(self) -> bool {
    matches!(self, Kind::Variable | Kind::BoundVariable)
  }

  #[inline(always)]
  pub fn is_parameterized(self) -> bool {
    self.info().attributes.contains(KindAttribute::Parameterized)
  }

  #[inline(always)]
  pub fn is_boolean_valued(self) -> bool {
    self.info().attributes.contains(KindAttribute::BooleanValued)
  }

  // endregion Accessors
}

impl Display for Kind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}
