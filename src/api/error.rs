/*!

Every failure the expression layer can report. All of them are caller errors: the operation is rejected at the point
of the offending call and the manager's tables are left exactly as they were.

*/

use std::{
  error::Error,
  fmt::{Debug, Display, Formatter}
};

use crate::api::{
  Arity,
  constant::PayloadType,
  kind::Kind
};

pub type ExprResult<T> = Result<T, ExprError>;

pub enum ExprError {
  /// A sort accessor was invoked on a sort of a different kind.
  WrongSortKind {
    expected: &'static str,
    actual  : Kind
  },
  /// A term accessor was invoked on a node of a kind that does not support it.
  WrongTermKind {
    expected: &'static str,
    actual  : Kind
  },
  /// Wrong number of children, component sorts, or actual parameters.
  ArityMismatch {
    what    : &'static str,
    expected: Arity,
    actual  : usize
  },
  MalformedTerm(String),
  MalformedSort(String),
  /// A structural query on the null expression.
  NullExpression,
  /// `constant::<T>()` with a `T` that is not the payload type of the node's kind.
  WrongConstType {
    kind     : Kind,
    requested: PayloadType
  },
  /// Handles from two different managers were combined.
  ForeignManager,
}

impl Display for ExprError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      ExprError::WrongSortKind { expected, actual } => {
        write!(f, "expected a sort of kind {} but found a sort of kind {}", expected, actual)
      }

      ExprError::WrongTermKind { expected, actual } => {
        write!(f, "expected {} but found a term of kind {}", expected, actual)
      }

      ExprError::ArityMismatch { what, expected, actual } => {
        write!(f, "{} expects {} argument(s) but was given {}", what, expected, actual)
      }

      ExprError::MalformedTerm(message) => {
        write!(f, "malformed term: {}", message)
      }

      ExprError::MalformedSort(message) => {
        write!(f, "malformed sort: {}", message)
      }

      ExprError::NullExpression => {
        write!(f, "the null expression has no structure")
      }

      ExprError::WrongConstType { kind, requested } => {
        match kind.payload_type() {
          Some(payload) => write!(
            f, "a {} node holds a {} payload, not a {} payload", kind, payload, requested
          ),
          None => write!(f, "a {} node holds no constant, so there is no {} payload", kind, requested),
        }
      }

      ExprError::ForeignManager => {
        write!(f, "the expressions or sorts belong to different expression managers")
      }

    } // end match on `ExprError`
  }
}

impl Debug for ExprError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for ExprError {}
