//! Terms: the heterogeneous payload carried by expression node slots.
//!
//! A node slot (`left`, `right`, a function argument, an inserted value)
//! holds either another node or plain data. [`Term`] models that sum so a
//! single `escape_value` entry point can dispatch on it.

use crate::error::{Error, Result};
use crate::node::Node;

/// A plain scalar literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
}

/// Any payload a node slot can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A nested expression node.
    Node(Box<Node>),
    /// A scalar literal.
    Scalar(Literal),
    /// An ordered sequence.
    List(Vec<Term>),
    /// A key/value map.
    Map(Vec<(String, Term)>),
    /// A binary buffer.
    Blob(Vec<u8>),
    /// A JSON document.
    Json(serde_json::Value),
}

impl Term {
    /// Returns `true` if this term is the scalar NULL literal.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Literal::Null))
    }

    /// Projects the term onto a JSON value for the serialization paths
    /// (`json` explicit type, non-native arrays, object stringification).
    ///
    /// # Errors
    ///
    /// Fails for payloads with no JSON representation (nested nodes, blobs,
    /// non-finite floats).
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Self::Node(_) => Err(Error::value("an expression node cannot be JSON-serialized")),
            Self::Blob(_) => Err(Error::value("a binary buffer cannot be JSON-serialized")),
            Self::Scalar(lit) => lit.to_json(),
            Self::List(items) => items
                .iter()
                .map(Self::to_json)
                .collect::<Result<Vec<_>>>()
                .map(serde_json::Value::Array),
            Self::Map(entries) => entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
                .collect::<Result<serde_json::Map<_, _>>>()
                .map(serde_json::Value::Object),
            Self::Json(v) => Ok(v.clone()),
        }
    }
}

impl Literal {
    fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Self::Null => Ok(serde_json::Value::Null),
            Self::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Self::Int(i) => Ok(serde_json::Value::from(*i)),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| Error::value(format!("{f} has no JSON representation"))),
            Self::Text(s) => Ok(serde_json::Value::String(s.clone())),
        }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Self::Scalar(lit)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Self::Scalar(Literal::Bool(b))
    }
}

macro_rules! term_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Term {
            fn from(i: $ty) -> Self {
                Self::Scalar(Literal::Int(i64::from(i)))
            }
        })*
    };
}

term_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Term {
    fn from(f: f64) -> Self {
        Self::Scalar(Literal::Float(f))
    }
}

impl From<f32> for Term {
    fn from(f: f32) -> Self {
        Self::Scalar(Literal::Float(f64::from(f)))
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Self::Scalar(Literal::Text(String::from(s)))
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Self::Scalar(Literal::Text(s))
    }
}

impl From<&[u8]> for Term {
    fn from(bytes: &[u8]) -> Self {
        Self::Blob(bytes.to_vec())
    }
}

impl From<serde_json::Value> for Term {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<Term>> From<Option<T>> for Term {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Scalar(Literal::Null),
        }
    }
}

impl<T: Into<Term>> From<Vec<T>> for Term {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Term>, const N: usize> From<[T; N]> for Term {
    fn from(items: [T; N]) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Node> for Term {
    fn from(node: Node) -> Self {
        Self::Node(Box::new(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Term::from(true), Term::Scalar(Literal::Bool(true)));
        assert_eq!(Term::from(42_i32), Term::Scalar(Literal::Int(42)));
        assert_eq!(Term::from(0.5_f64), Term::Scalar(Literal::Float(0.5)));
        assert_eq!(
            Term::from("hello"),
            Term::Scalar(Literal::Text(String::from("hello")))
        );
        assert_eq!(Term::from(None::<i32>), Term::Scalar(Literal::Null));
        assert_eq!(Term::from(Some(7_i32)), Term::Scalar(Literal::Int(7)));
    }

    #[test]
    fn test_sequence_conversion() {
        let t = Term::from(vec![1_i32, 2, 3]);
        assert_eq!(
            t,
            Term::List(vec![
                Term::Scalar(Literal::Int(1)),
                Term::Scalar(Literal::Int(2)),
                Term::Scalar(Literal::Int(3)),
            ])
        );
    }

    #[test]
    fn test_to_json() {
        let t = Term::from(vec![1_i32, 2]);
        assert_eq!(t.to_json().unwrap(), serde_json::json!([1, 2]));

        let m = Term::Map(vec![(String::from("a"), Term::from(true))]);
        assert_eq!(m.to_json().unwrap(), serde_json::json!({"a": true}));

        assert!(Term::Blob(vec![0]).to_json().is_err());
    }
}
