/*!

Constant payloads. Nodes of a constant kind (`CONST_BOOLEAN`, `CONST_BITVECTOR`, …) and of an operator kind
(`BITVECTOR_EXTRACT_OP`, …) carry exactly one `Constant`, and the kind's `PayloadType` fixes which variant it is.

Payload values are small, immutable, and hashable, since they take part in the structural key of their node.

# Typed access

The `ConstantValue` trait connects a Rust type to its payload variant. It is what lets
`Expr::constant::<BitVector>()` check the requested type against the node's kind:

```rust
use smtexpr::api::{BitVector, ExprManager};

let em    = ExprManager::new();
let seven = em.mk_bit_vector(4, 7).unwrap();
assert_eq!(seven.constant::<BitVector>().unwrap().value(), 7);
assert!(seven.constant::<bool>().is_err());
```

*/

use std::fmt::{Display, Formatter};

use crate::{
  abstractions::IString,
  api::kind::Kind
};

/// The semantic type of a constant payload.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PayloadType {
  Boolean,
  Rational,
  BitVector,
  String,
  RoundingMode,
  FloatingPoint,
  BitVectorExtract,
  BitVectorZeroExtend,
  BitVectorSignExtend,
  BitVectorRepeat,
}

impl PayloadType {
  /// The kind of node that carries a payload of this type.
  pub fn constant_kind(self) -> Kind {
    match self {
      PayloadType::Boolean             => Kind::ConstBoolean,
      PayloadType::Rational            => Kind::ConstRational,
      PayloadType::BitVector           => Kind::ConstBitVector,
      PayloadType::String              => Kind::ConstString,
      PayloadType::RoundingMode        => Kind::ConstRoundingMode,
      PayloadType::FloatingPoint       => Kind::ConstFloatingPoint,
      PayloadType::BitVectorExtract    => Kind::BitVectorExtractOp,
      PayloadType::BitVectorZeroExtend => Kind::BitVectorZeroExtendOp,
      PayloadType::BitVectorSignExtend => Kind::BitVectorSignExtendOp,
      PayloadType::BitVectorRepeat     => Kind::BitVectorRepeatOp,
    }
  }
}

impl Display for PayloadType {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", self)
  }
}

// region Payload value types

/// An exact rational number in lowest terms with a positive denominator.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Rational {
  numerator  : i64,
  denominator: i64,
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
  a = a.abs();
  b = b.abs();
  while b != 0 {
    (a, b) = (b, a % b);
  }
  a
}

impl Rational {
  /// Returns `None` if `denominator` is zero or the value in lowest terms does not fit in `i64`.
  pub fn new(numerator: i64, denominator: i64) -> Option<Rational> {
    if denominator == 0 {
      return None;
    }
    let (numerator, denominator) = (numerator as i128, denominator as i128);
    let divisor = gcd(numerator, denominator);
    let sign    = denominator.signum();

    Some(Rational {
      numerator  : i64::try_from(sign * numerator / divisor).ok()?,
      denominator: i64::try_from(sign * denominator / divisor).ok()?,
    })
  }

  pub fn from_integer(value: i64) -> Rational {
    Rational { numerator: value, denominator: 1 }
  }

  #[inline(always)]
  pub fn numerator(&self) -> i64 {
    self.numerator
  }

  #[inline(always)]
  pub fn denominator(&self) -> i64 {
    self.denominator
  }

  #[inline(always)]
  pub fn is_integer(&self) -> bool {
    self.denominator == 1
  }
}

impl Display for Rational {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let magnitude = self.numerator.unsigned_abs();
    let body = if self.is_integer() {
      magnitude.to_string()
    } else {
      format!("(/ {} {})", magnitude, self.denominator)
    };

    if self.numerator < 0 {
      write!(f, "(- {})", body)
    } else {
      write!(f, "{}", body)
    }
  }
}

/// A fixed-width bit-vector value of at most 128 bits.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct BitVector {
  width: u32,
  value: u128,
}

impl BitVector {
  pub const MAX_WIDTH: u32 = 128;

  /// Returns `None` unless `1 <= width <= 128`. Bits of `value` above `width` are discarded.
  pub fn new(width: u32, value: u128) -> Option<BitVector> {
    if width == 0 || width > Self::MAX_WIDTH {
      return None;
    }
    let mask = if width == Self::MAX_WIDTH { u128::MAX } else { (1u128 << width) - 1 };
    Some(BitVector { width, value: value & mask })
  }

  #[inline(always)]
  pub fn width(&self) -> u32 {
    self.width
  }

  #[inline(always)]
  pub fn value(&self) -> u128 {
    self.value
  }
}

impl Display for BitVector {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "#b{:0width$b}", self.value, width = self.width as usize)
  }
}

/// IEEE 754 rounding modes.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum RoundingMode {
  NearestTiesToEven,
  NearestTiesToAway,
  TowardPositive,
  TowardNegative,
  TowardZero,
}

impl Display for RoundingMode {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      RoundingMode::NearestTiesToEven => "RNE",
      RoundingMode::NearestTiesToAway => "RNA",
      RoundingMode::TowardPositive    => "RTP",
      RoundingMode::TowardNegative    => "RTN",
      RoundingMode::TowardZero        => "RTZ",
    };
    write!(f, "{}", name)
  }
}

/// A floating-point literal held as its IEEE bit pattern: sign, then exponent, then the significand without its
/// hidden bit.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct FloatingPoint {
  exponent_width   : u32,
  significand_width: u32,
  bits             : u128,
}

impl FloatingPoint {
  /// Returns `None` unless the exponent is at least 1 bit, the significand (including the hidden bit) at least 2, and
  /// the whole pattern fits in 128 bits.
  pub fn new(exponent_width: u32, significand_width: u32, bits: u128) -> Option<FloatingPoint> {
    if exponent_width < 1 || significand_width < 2 {
      return None;
    }
    let total = exponent_width.checked_add(significand_width).filter(|&total| total <= 128)?;
    let mask  = if total == 128 { u128::MAX } else { (1u128 << total) - 1 };

    Some(FloatingPoint { exponent_width, significand_width, bits: bits & mask })
  }

  #[inline(always)]
  pub fn exponent_width(&self) -> u32 {
    self.exponent_width
  }

  #[inline(always)]
  pub fn significand_width(&self) -> u32 {
    self.significand_width
  }

  #[inline(always)]
  pub fn bits(&self) -> u128 {
    self.bits
  }
}

impl Display for FloatingPoint {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let fraction_width = self.significand_width - 1;
    let fraction       = self.bits & ((1u128 << fraction_width) - 1);
    let exponent       = (self.bits >> fraction_width) & ((1u128 << self.exponent_width) - 1);
    let sign           = self.bits >> (fraction_width + self.exponent_width);

    write!(
      f,
      "(fp #b{} #b{:0ew$b} #b{:0fw$b})",
      sign,
      exponent,
      fraction,
      ew = self.exponent_width as usize,
      fw = fraction_width as usize
    )
  }
}

/// The indices of `(_ extract high low)`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct BitVectorExtract {
  high: u32,
  low : u32,
}

impl BitVectorExtract {
  /// Returns `None` if `high < low`.
  pub fn new(high: u32, low: u32) -> Option<BitVectorExtract> {
    (high >= low).then_some(BitVectorExtract { high, low })
  }

  #[inline(always)]
  pub fn high(&self) -> u32 {
    self.high
  }

  #[inline(always)]
  pub fn low(&self) -> u32 {
    self.low
  }
}

impl Display for BitVectorExtract {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "(_ extract {} {})", self.high, self.low)
  }
}

/// Defines a single-index bit-vector operator payload.
macro_rules! indexed_operator {
  ($name:ident, $symbol:literal) => {
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct $name(pub u32);

    impl Display for $name {
      fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(_ {} {})", $symbol, self.0)
      }
    }
  };
}

indexed_operator!(BitVectorZeroExtend, "zero_extend");
indexed_operator!(BitVectorSignExtend, "sign_extend");
indexed_operator!(BitVectorRepeat, "repeat");

// endregion Payload value types

/// The payload of a constant or operator node.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Constant {
  Boolean(bool),
  Rational(Rational),
  BitVector(BitVector),
  String(IString),
  RoundingMode(RoundingMode),
  FloatingPoint(FloatingPoint),
  BitVectorExtract(BitVectorExtract),
  BitVectorZeroExtend(BitVectorZeroExtend),
  BitVectorSignExtend(BitVectorSignExtend),
  BitVectorRepeat(BitVectorRepeat),
}

impl Constant {
  pub fn payload_type(&self) -> PayloadType {
    match self {
      Constant::Boolean(_)             => PayloadType::Boolean,
      Constant::Rational(_)            => PayloadType::Rational,
      Constant::BitVector(_)           => PayloadType::BitVector,
      Constant::String(_)              => PayloadType::String,
      Constant::RoundingMode(_)        => PayloadType::RoundingMode,
      Constant::FloatingPoint(_)       => PayloadType::FloatingPoint,
      Constant::BitVectorExtract(_)    => PayloadType::BitVectorExtract,
      Constant::BitVectorZeroExtend(_) => PayloadType::BitVectorZeroExtend,
      Constant::BitVectorSignExtend(_) => PayloadType::BitVectorSignExtend,
      Constant::BitVectorRepeat(_)     => PayloadType::BitVectorRepeat,
    }
  }
}

impl Display for Constant {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Constant::Boolean(value)             => write!(f, "{}", value),
      Constant::Rational(value)            => write!(f, "{}", value),
      Constant::BitVector(value)           => write!(f, "{}", value),
      Constant::String(value)              => write!(f, "\"{}\"", value.replace('"', "\"\"")),
      Constant::RoundingMode(value)        => write!(f, "{}", value),
      Constant::FloatingPoint(value)       => write!(f, "{}", value),
      Constant::BitVectorExtract(value)    => write!(f, "{}", value),
      Constant::BitVectorZeroExtend(value) => write!(f, "{}", value),
      Constant::BitVectorSignExtend(value) => write!(f, "{}", value),
      Constant::BitVectorRepeat(value)     => write!(f, "{}", value),
    }
  }
}

/// A Rust type that can be stored in, and read back out of, a constant node.
pub trait ConstantValue: Sized {
  const PAYLOAD: PayloadType;

  fn into_constant(self) -> Constant;

  /// Returns `None` if `constant` holds a different payload type.
  fn from_constant(constant: &Constant) -> Option<Self>;
}

macro_rules! implement_constant_value {
  ($variant:ident, $type:ty) => {
    impl ConstantValue for $type {
      const PAYLOAD: PayloadType = PayloadType::$variant;

      fn into_constant(self) -> Constant {
        Constant::$variant(self)
      }

      fn from_constant(constant: &Constant) -> Option<Self> {
        match constant {
          Constant::$variant(value) => Some(value.clone()),
          _ => None,
        }
      }
    }
  };
}

implement_constant_value!(Boolean, bool);
implement_constant_value!(Rational, Rational);
implement_constant_value!(BitVector, BitVector);
implement_constant_value!(String, IString);
implement_constant_value!(RoundingMode, RoundingMode);
implement_constant_value!(FloatingPoint, FloatingPoint);
implement_constant_value!(BitVectorExtract, BitVectorExtract);
implement_constant_value!(BitVectorZeroExtend, BitVectorZeroExtend);
implement_constant_value!(BitVectorSignExtend, BitVectorSignExtend);
implement_constant_value!(BitVectorRepeat, BitVectorRepeat);
