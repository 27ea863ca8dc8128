//! The built-in operator/function catalog and its specialized compilers.

use super::{DialectMask, OpCategory, OpFlags, OpInfo, Registry};
use crate::dialect::Context;
use crate::error::{Error, Result};
use crate::node::Func;
use crate::term::{Literal, Term};

pub(super) fn populate(r: &mut Registry) {
    use OpCategory::{Arithmetic, Array, Bitwise, Comparison, Conditional, Math, Pattern, Text};

    // Comparison operators.
    r.add(OpInfo::binary("=", Comparison, "equal").negates("<>"));
    r.add(OpInfo::binary("<>", Comparison, "not equal").negates("="));
    r.add(OpInfo::binary(">", Comparison, "greater than").negates("<="));
    r.add(OpInfo::binary(">=", Comparison, "greater than or equal").negates("<"));
    r.add(OpInfo::binary("<", Comparison, "less than").negates(">="));
    r.add(OpInfo::binary("<=", Comparison, "less than or equal").negates(">"));
    r.add(
        OpInfo::binary("IN", Comparison, "membership in a sequence or sub-query")
            .flag(OpFlags::RIGHT_VALUES | OpFlags::IN_PLACE_NOT),
    );
    r.add(
        OpInfo::binary("NOT IN", Comparison, "negated membership")
            .flag(OpFlags::RIGHT_VALUES)
            .negates("IN"),
    );
    r.add(
        OpInfo::binary("IS", Comparison, "null-safe identity")
            .flag(OpFlags::IN_PLACE_NOT)
            .negates("IS NOT"),
    );
    r.add(OpInfo::binary("IS NOT", Comparison, "negated null-safe identity").negates("IS"));

    // Prefix operators.
    r.add(OpInfo::unary("NOT", Comparison, "boolean negation"));
    r.add(OpInfo::unary("EXISTS", Comparison, "sub-query produces at least one row"));

    // Arithmetic.
    r.add(OpInfo::binary("+", Arithmetic, "addition"));
    r.add(OpInfo::binary("-", Arithmetic, "subtraction"));
    r.add(OpInfo::binary("*", Arithmetic, "multiplication"));
    r.add(OpInfo::binary("/", Arithmetic, "division"));
    r.add(OpInfo::binary("%", Arithmetic, "modulo"));

    // Bitwise.
    r.add(OpInfo::binary("&", Bitwise, "bitwise and"));
    r.add(OpInfo::binary("|", Bitwise, "bitwise or"));
    r.add(OpInfo::binary("^", Bitwise, "bitwise xor").dialects(DialectMask::MYSQL));
    r.add(OpInfo::binary("#", Bitwise, "bitwise xor").dialects(DialectMask::PG));
    r.add(OpInfo::binary("<<", Bitwise, "left shift"));
    r.add(OpInfo::binary(">>", Bitwise, "right shift"));

    // String concatenation and pattern matching.
    r.add(
        OpInfo::binary("||", Text, "string concatenation")
            .dialects(DialectMask::PG | DialectMask::SQLITE),
    );
    r.add(OpInfo::binary("LIKE", Pattern, "pattern match").flag(OpFlags::IN_PLACE_NOT));
    r.add(OpInfo::binary("NOT LIKE", Pattern, "negated pattern match").negates("LIKE"));
    r.add(
        OpInfo::binary("ILIKE", Pattern, "case-insensitive pattern match")
            .flag(OpFlags::IN_PLACE_NOT)
            .dialects(DialectMask::PG),
    );
    r.add(
        OpInfo::binary("NOT ILIKE", Pattern, "negated case-insensitive pattern match")
            .negates("ILIKE")
            .dialects(DialectMask::PG),
    );
    r.add(
        OpInfo::binary("~", Pattern, "regular expression match")
            .negates("!~")
            .dialects(DialectMask::PG),
    );
    r.add(
        OpInfo::binary("!~", Pattern, "negated regular expression match")
            .negates("~")
            .dialects(DialectMask::PG),
    );
    r.add(
        OpInfo::binary("~*", Pattern, "case-insensitive regular expression match")
            .negates("!~*")
            .dialects(DialectMask::PG),
    );
    r.add(
        OpInfo::binary("!~*", Pattern, "negated case-insensitive regular expression match")
            .negates("~*")
            .dialects(DialectMask::PG),
    );

    // Array containment/overlap.
    r.add(OpInfo::binary("@>", Array, "contains").dialects(DialectMask::PG));
    r.add(OpInfo::binary("<@", Array, "is contained by").dialects(DialectMask::PG));
    r.add(OpInfo::binary("&&", Array, "overlaps").dialects(DialectMask::PG));

    // Conditionals and conversions.
    r.add(OpInfo::function("CAST", 2, 2, Conditional, "type conversion").compiler(compile_cast));
    r.add(
        OpInfo::function("BETWEEN", 3, 3, Conditional, "range containment")
            .flag(OpFlags::IN_PLACE_NOT)
            .compiler(compile_between),
    );
    r.add(OpInfo::function("COALESCE", 1, usize::MAX, Conditional, "first non-null argument"));
    r.add(OpInfo::function("GREATEST", 1, usize::MAX, Conditional, "largest argument"));
    r.add(OpInfo::function("LEAST", 1, usize::MAX, Conditional, "smallest argument"));
    r.add(OpInfo::function("NULLIF", 2, 2, Conditional, "null when arguments are equal"));

    // Math functions.
    r.add(OpInfo::function("ABS", 1, 1, Math, "absolute value"));
    r.add(OpInfo::function("ACOS", 1, 1, Math, "inverse cosine"));
    r.add(OpInfo::function("ASIN", 1, 1, Math, "inverse sine"));
    r.add(
        OpInfo::function("ATAN", 1, 2, Math, "inverse tangent, one or two arguments")
            .compiler(compile_atan),
    );
    r.add(OpInfo::function("ATAN2", 2, 2, Math, "two-argument inverse tangent"));
    r.add(OpInfo::function("CBRT", 1, 1, Math, "cube root").dialects(DialectMask::PG));
    r.add(OpInfo::function("CEILING", 1, 1, Math, "round up"));
    r.add(OpInfo::function("COS", 1, 1, Math, "cosine"));
    r.add(OpInfo::function("COT", 1, 1, Math, "cotangent"));
    r.add(OpInfo::function("DEGREES", 1, 1, Math, "radians to degrees"));
    r.add(OpInfo::function("EXP", 1, 1, Math, "exponential"));
    r.add(OpInfo::function("FLOOR", 1, 1, Math, "round down"));
    r.add(OpInfo::function("LN", 1, 1, Math, "natural logarithm"));
    r.add(OpInfo::function("LOG", 1, 2, Math, "logarithm"));
    r.add(OpInfo::function("LOG10", 1, 1, Math, "base-10 logarithm").compiler(compile_log10));
    r.add(OpInfo::function("LOG2", 1, 1, Math, "base-2 logarithm").compiler(compile_log2));
    r.add(OpInfo::function("MOD", 2, 2, Math, "modulo"));
    r.add(OpInfo::function("PI", 0, 0, Math, "the constant pi").flag(OpFlags::VOID));
    r.add(OpInfo::function("POWER", 2, 2, Math, "exponentiation"));
    r.add(OpInfo::function("RADIANS", 1, 1, Math, "degrees to radians"));
    r.add(
        OpInfo::function("RANDOM", 0, 0, Math, "pseudo-random number")
            .flag(OpFlags::VOID)
            .compiler(compile_random),
    );
    r.add(OpInfo::function("ROUND", 1, 2, Math, "round to a precision"));
    r.add(OpInfo::function("SIGN", 1, 1, Math, "sign of the argument"));
    r.add(OpInfo::function("SIN", 1, 1, Math, "sine"));
    r.add(OpInfo::function("SQRT", 1, 1, Math, "square root"));
    r.add(OpInfo::function("TAN", 1, 1, Math, "tangent"));
    r.add(OpInfo::function("TRUNC", 1, 2, Math, "truncate toward zero").compiler(compile_trunc));

    // String functions.
    r.add(OpInfo::function("ASCII", 1, 1, Text, "code of the first character"));
    r.add(OpInfo::function("BIT_LENGTH", 1, 1, Text, "length in bits"));
    r.add(
        OpInfo::function("BTRIM", 1, 2, Text, "trim both ends").dialects(DialectMask::PG),
    );
    r.add(OpInfo::function("CHAR_LENGTH", 1, 1, Text, "length in characters"));
    r.add(OpInfo::function("CHR", 1, 1, Text, "character for a code").compiler(compile_chr));
    r.add(OpInfo::function("CONCAT", 1, usize::MAX, Text, "concatenate strings"));
    r.add(OpInfo::function("LEFT", 2, 2, Text, "leading characters"));
    r.add(OpInfo::function("LENGTH", 1, 1, Text, "length in characters"));
    r.add(OpInfo::function("LOWER", 1, 1, Text, "lowercase"));
    r.add(OpInfo::function("LPAD", 2, 3, Text, "pad on the left"));
    r.add(OpInfo::function("LTRIM", 1, 2, Text, "trim the left end"));
    r.add(OpInfo::function("MD5", 1, 1, Text, "MD5 digest"));
    r.add(OpInfo::function("OCTET_LENGTH", 1, 1, Text, "length in bytes"));
    r.add(OpInfo::function("REPEAT", 2, 2, Text, "repeat a string"));
    r.add(OpInfo::function("REPLACE", 3, 3, Text, "replace a substring"));
    r.add(OpInfo::function("REVERSE", 1, 1, Text, "reverse a string"));
    r.add(OpInfo::function("RIGHT", 2, 2, Text, "trailing characters"));
    r.add(OpInfo::function("RPAD", 2, 3, Text, "pad on the right"));
    r.add(OpInfo::function("RTRIM", 1, 2, Text, "trim the right end"));
    r.add(OpInfo::function("SUBSTR", 2, 3, Text, "substring by position"));
    r.add(OpInfo::function("TRIM", 1, 1, Text, "trim both ends"));
    r.add(OpInfo::function("UPPER", 1, 1, Text, "uppercase"));

    // Aggregates.
    r.add(OpInfo::aggregate("ARRAY_AGG", 1, 1, "collect into an array").dialects(DialectMask::PG));
    r.add(OpInfo::aggregate("AVG", 1, 1, "arithmetic mean"));
    r.add(OpInfo::aggregate("BIT_AND", 1, 1, "bitwise and of all values"));
    r.add(OpInfo::aggregate("BIT_OR", 1, 1, "bitwise or of all values"));
    r.add(
        OpInfo::aggregate("BOOL_AND", 1, 1, "true when every value is true")
            .dialects(DialectMask::PG),
    );
    r.add(
        OpInfo::aggregate("BOOL_OR", 1, 1, "true when any value is true")
            .dialects(DialectMask::PG),
    );
    r.add(OpInfo::aggregate("COUNT", 0, 1, "row count").compiler(compile_count));
    r.add(OpInfo::aggregate("MAX", 1, 1, "largest value"));
    r.add(OpInfo::aggregate("MIN", 1, 1, "smallest value"));
    r.add(
        OpInfo::aggregate("STRING_AGG", 2, 2, "concatenate values with a separator")
            .dialects(DialectMask::PG),
    );
    r.add(OpInfo::aggregate("SUM", 1, 1, "sum of all values"));
    r.add(OpInfo::aggregate("STDDEV_POP", 1, 1, "population standard deviation"));
    r.add(OpInfo::aggregate("STDDEV_SAMP", 1, 1, "sample standard deviation"));
    r.add(OpInfo::aggregate("VAR_POP", 1, 1, "population variance"));
    r.add(OpInfo::aggregate("VAR_SAMP", 1, 1, "sample variance"));

    // Aliases.
    r.alias("!=", "<>");
    r.alias("POW", "POWER");
    r.alias("CEIL", "CEILING");
    r.alias("EVERY", "BOOL_AND");
    r.alias("STDDEV", "STDDEV_SAMP");
    r.alias("VARIANCE", "VAR_SAMP");
}

fn is_mysql(ctx: &dyn Context) -> bool {
    ctx.base().dialect == "mysql"
}

/// `CAST(expr AS type)` — the type name is emitted bare.
fn compile_cast(ctx: &dyn Context, f: &Func) -> Result<String> {
    let expr = ctx.escape_value(&f.args[0])?;
    let Term::Scalar(Literal::Text(type_name)) = &f.args[1] else {
        return Err(Error::compile("CAST requires a type name as its second argument"));
    };
    Ok(format!("CAST({expr} AS {type_name})"))
}

/// `$1 BETWEEN $2 AND $3`.
fn compile_between(ctx: &dyn Context, f: &Func) -> Result<String> {
    let expr = ctx.escape_value(&f.args[0])?;
    let low = ctx.escape_value(&f.args[1])?;
    let high = ctx.escape_value(&f.args[2])?;
    Ok(format!("{expr} BETWEEN {low} AND {high}"))
}

/// Single argument compiles to ATAN, two arguments to ATAN2.
fn compile_atan(ctx: &dyn Context, f: &Func) -> Result<String> {
    let name = if f.args.len() == 2 { "ATAN2" } else { "ATAN" };
    f.compile_default(ctx, name)
}

/// MySQL has LOG10; everywhere else it is `LOG(10, x)`.
fn compile_log10(ctx: &dyn Context, f: &Func) -> Result<String> {
    if is_mysql(ctx) {
        f.compile_default(ctx, "LOG10")
    } else {
        let x = ctx.escape_value(&f.args[0])?;
        Ok(format!("LOG(10, {x})"))
    }
}

/// MySQL has LOG2; everywhere else it is `LOG(2, x)`.
fn compile_log2(ctx: &dyn Context, f: &Func) -> Result<String> {
    if is_mysql(ctx) {
        f.compile_default(ctx, "LOG2")
    } else {
        let x = ctx.escape_value(&f.args[0])?;
        Ok(format!("LOG(2, {x})"))
    }
}

/// MySQL spells it RAND.
fn compile_random(ctx: &dyn Context, f: &Func) -> Result<String> {
    f.compile_default(ctx, if is_mysql(ctx) { "RAND" } else { "RANDOM" })
}

/// MySQL only has TRUNCATE, which always takes a precision.
fn compile_trunc(ctx: &dyn Context, f: &Func) -> Result<String> {
    if is_mysql(ctx) {
        let x = ctx.escape_value(&f.args[0])?;
        let precision = match f.args.get(1) {
            Some(p) => ctx.escape_value(p)?,
            None => String::from("0"),
        };
        Ok(format!("TRUNCATE({x}, {precision})"))
    } else {
        f.compile_default(ctx, "TRUNC")
    }
}

/// MySQL spells it CHAR.
fn compile_chr(ctx: &dyn Context, f: &Func) -> Result<String> {
    f.compile_default(ctx, if is_mysql(ctx) { "CHAR" } else { "CHR" })
}

/// `COUNT()` means `COUNT(*)`.
fn compile_count(ctx: &dyn Context, f: &Func) -> Result<String> {
    if f.args.is_empty() {
        Ok(String::from("COUNT(*)"))
    } else {
        f.compile_default(ctx, "COUNT")
    }
}
