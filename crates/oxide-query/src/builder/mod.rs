//! Query builders and node factory functions.
//!
//! Everything here constructs nodes; nothing compiles. Statement builders
//! stay chainable even on misuse: the first structural defect a method
//! detects is recorded on the query and surfaced by `compile`.

mod compound;
mod delete;
pub mod funcs;
mod insert;
mod select;
mod update;

pub use compound::{CompoundOp, CompoundQuery};
pub use delete::DeleteQuery;
pub use insert::InsertQuery;
pub use select::{FieldSpec, SelectQuery};
pub use update::UpdateQuery;

use crate::node::{
    BinaryOp, Case, ConditionMap, Func, Identifier, Logical, LogicalKind, Node, Raw, Sort,
    UnaryOp, Value,
};
use crate::node::ExplicitType;
use crate::term::{Literal, Term};

/// Creates a raw SQL fragment node.
#[must_use]
pub fn raw(fragment: impl Into<String>) -> Node {
    Node::Raw(Raw::new(fragment))
}

/// Creates a raw SQL fragment node with `?`/`$N` bindings.
#[must_use]
pub fn raw_with(fragment: impl Into<String>, bindings: Vec<Term>) -> Node {
    Node::Raw(Raw::with_bindings(fragment, bindings))
}

/// Creates a column/identifier reference. The name may be dotted.
#[must_use]
pub fn col(name: impl Into<String>) -> Node {
    Node::Identifier(Identifier::new(name))
}

/// Creates an untyped value node.
#[must_use]
pub fn val(value: impl Into<Term>) -> Node {
    Node::Value(Value::new(value))
}

/// Creates an array-typed value node.
#[must_use]
pub fn array_val(items: impl IntoIterator<Item = impl Into<Term>>) -> Node {
    let list = Term::List(items.into_iter().map(Into::into).collect());
    Node::Value(Value::typed(ExplicitType::Array, Some(list)))
}

/// Creates a JSON-typed value node.
#[must_use]
pub fn json_val(value: impl Into<Term>) -> Node {
    Node::Value(Value::typed(ExplicitType::Json, Some(value.into())))
}

/// Creates a value node with an explicit logical type.
#[must_use]
pub fn typed_val(explicit: ExplicitType, value: impl Into<Term>) -> Node {
    Node::Value(Value::typed(explicit, Some(value.into())))
}

/// Creates a binary operator node. A plain string on the left is taken as
/// a column reference; use [`val`] to compare against a string literal.
#[must_use]
pub fn op(left: impl Into<Term>, token: impl Into<String>, right: impl Into<Term>) -> Node {
    Node::Binary(BinaryOp::new(ident_term(left.into()), token, right))
}

/// `left = right`.
#[must_use]
pub fn eq(left: impl Into<Term>, right: impl Into<Term>) -> Node {
    op(left, "=", right)
}

/// `left <> right`.
#[must_use]
pub fn ne(left: impl Into<Term>, right: impl Into<Term>) -> Node {
    op(left, "<>", right)
}

/// `left < right`.
#[must_use]
pub fn lt(left: impl Into<Term>, right: impl Into<Term>) -> Node {
    op(left, "<", right)
}

/// `left <= right`.
#[must_use]
pub fn le(left: impl Into<Term>, right: impl Into<Term>) -> Node {
    op(left, "<=", right)
}

/// `left > right`.
#[must_use]
pub fn gt(left: impl Into<Term>, right: impl Into<Term>) -> Node {
    op(left, ">", right)
}

/// `left >= right`.
#[must_use]
pub fn ge(left: impl Into<Term>, right: impl Into<Term>) -> Node {
    op(left, ">=", right)
}

/// Creates a prefix NOT node.
#[must_use]
pub fn not(expr: impl Into<Term>) -> Node {
    Node::Unary(UnaryOp::new("NOT", expr))
}

/// Creates an EXISTS test over a sub-query.
#[must_use]
pub fn exists(query: impl Into<Term>) -> Node {
    Node::Unary(UnaryOp::new("EXISTS", query))
}

/// Creates a prefix negation node.
#[must_use]
pub fn neg(expr: impl Into<Term>) -> Node {
    Node::Unary(UnaryOp::new("-", expr))
}

/// Creates an AND group of two expressions; extend with [`Logical::add`].
#[must_use]
pub fn and(left: impl Into<Term>, right: impl Into<Term>) -> Logical {
    Logical::new(LogicalKind::And, vec![left.into(), right.into()])
}

/// Creates an OR group of two expressions; extend with [`Logical::add`].
#[must_use]
pub fn or(left: impl Into<Term>, right: impl Into<Term>) -> Logical {
    Logical::new(LogicalKind::Or, vec![left.into(), right.into()])
}

/// Creates a condition map (an implicit AND of equalities).
#[must_use]
pub fn cond(
    pairs: impl IntoIterator<Item = (impl Into<String>, impl Into<Term>)>,
) -> ConditionMap {
    ConditionMap::from_pairs(pairs)
}

/// Creates a sort key with a direction token.
#[must_use]
pub fn sort(key: impl Into<Term>, direction: impl Into<String>) -> Sort {
    Sort::new(key).direction(direction)
}

/// Creates an empty CASE expression; add arms with [`Case::when`].
#[must_use]
pub const fn case_when() -> Case {
    Case::new()
}

/// Creates a function call by name.
#[must_use]
pub fn func(name: impl Into<String>, args: impl IntoIterator<Item = impl Into<Term>>) -> Func {
    Func::with_args(name, args)
}

/// Creates an empty SELECT (compiles to `SELECT *` until fields are added).
#[must_use]
pub fn select() -> SelectQuery {
    SelectQuery::new()
}

/// Creates an INSERT into a table.
#[must_use]
pub fn insert(table: impl Into<Term>) -> InsertQuery {
    InsertQuery::new().table(table)
}

/// Creates an UPDATE of a table.
#[must_use]
pub fn update(table: impl Into<Term>) -> UpdateQuery {
    UpdateQuery::new().table(table)
}

/// Creates a DELETE; name the table with `.from(...)`.
#[must_use]
pub fn delete() -> DeleteQuery {
    DeleteQuery::new()
}

/// Creates a UNION of two queries; extend with [`CompoundQuery::add`].
#[must_use]
pub fn union(first: impl Into<Node>, second: impl Into<Node>) -> CompoundQuery {
    CompoundQuery::new(CompoundOp::Union, first, second)
}

/// Creates a UNION ALL of two queries.
#[must_use]
pub fn union_all(first: impl Into<Node>, second: impl Into<Node>) -> CompoundQuery {
    union(first, second).all()
}

/// Creates an INTERSECT of two queries.
#[must_use]
pub fn intersect(first: impl Into<Node>, second: impl Into<Node>) -> CompoundQuery {
    CompoundQuery::new(CompoundOp::Intersect, first, second)
}

/// Creates an INTERSECT ALL of two queries.
#[must_use]
pub fn intersect_all(first: impl Into<Node>, second: impl Into<Node>) -> CompoundQuery {
    intersect(first, second).all()
}

/// Creates an EXCEPT of two queries.
#[must_use]
pub fn except(first: impl Into<Node>, second: impl Into<Node>) -> CompoundQuery {
    CompoundQuery::new(CompoundOp::Except, first, second)
}

/// Creates an EXCEPT ALL of two queries.
#[must_use]
pub fn except_all(first: impl Into<Node>, second: impl Into<Node>) -> CompoundQuery {
    except(first, second).all()
}

/// Coerces a bare string into an identifier; anything else stays as-is.
/// This is how the left side of the WHERE `(column, op, value)` forms and
/// the [`op`] factory read their first argument.
pub(crate) fn ident_term(term: Term) -> Term {
    match term {
        Term::Scalar(Literal::Text(name)) => {
            Term::Node(Box::new(Node::Identifier(Identifier::new(name))))
        }
        other => other,
    }
}

/// Adds a condition to a WHERE/HAVING slot.
///
/// Same-operator additions extend the group; switching between AND and OR
/// wraps the existing tree as the sole child of a fresh group, which keeps
/// grouping flat left-to-right with parentheses only where the operator
/// changes.
pub(crate) fn add_condition(slot: &mut Option<Logical>, kind: LogicalKind, term: Term) {
    let term = match term {
        Term::Map(entries) => {
            Term::Node(Box::new(Node::ConditionMap(ConditionMap { entries })))
        }
        other => other,
    };
    match slot {
        None => *slot = Some(Logical::new(kind, vec![term])),
        Some(group) if group.op == kind => group.push(term),
        Some(group) => {
            let previous = std::mem::replace(group, Logical::new(kind, vec![]));
            group.push(Term::Node(Box::new(Node::Logical(previous))));
            group.push(term);
        }
    }
}

/// Expands a field argument into field nodes: strings become identifiers,
/// sequences flatten, scalars become values, nodes pass through.
pub(crate) fn push_fields(fields: &mut Vec<Node>, term: Term) {
    match term {
        Term::Scalar(Literal::Text(name)) => fields.push(Node::Identifier(Identifier::new(name))),
        Term::Node(node) => fields.push(*node),
        Term::List(items) => {
            for item in items {
                push_fields(fields, item);
            }
        }
        other => fields.push(Node::Value(Value::new(other))),
    }
}
