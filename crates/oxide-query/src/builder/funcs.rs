//! Named factories for the registered SQL functions.
//!
//! One snake_case factory per catalog entry, all returning a [`Func`] that
//! can still be refined with [`Func::arg`], [`Func::distinct`] and
//! [`Func::alias`].

use crate::node::Func;
use crate::term::Term;

macro_rules! function_factories {
    ($($factory:ident => $name:literal),* $(,)?) => {
        $(
            #[doc = concat!("The `", $name, "` function.")]
            #[must_use]
            pub fn $factory<I, T>(args: I) -> Func
            where
                I: IntoIterator<Item = T>,
                T: Into<Term>,
            {
                Func::with_args($name, args)
            }
        )*
    };
}

function_factories! {
    // Math.
    abs => "ABS",
    acos => "ACOS",
    asin => "ASIN",
    atan => "ATAN",
    atan2 => "ATAN2",
    cbrt => "CBRT",
    ceiling => "CEILING",
    cos => "COS",
    cot => "COT",
    degrees => "DEGREES",
    exp => "EXP",
    floor => "FLOOR",
    ln => "LN",
    log => "LOG",
    log10 => "LOG10",
    log2 => "LOG2",
    modulo => "MOD",
    power => "POWER",
    radians => "RADIANS",
    round => "ROUND",
    sign => "SIGN",
    sin => "SIN",
    sqrt => "SQRT",
    tan => "TAN",
    trunc => "TRUNC",
    // Strings.
    ascii => "ASCII",
    bit_length => "BIT_LENGTH",
    btrim => "BTRIM",
    char_length => "CHAR_LENGTH",
    chr => "CHR",
    concat => "CONCAT",
    left => "LEFT",
    length => "LENGTH",
    lower => "LOWER",
    lpad => "LPAD",
    ltrim => "LTRIM",
    md5 => "MD5",
    octet_length => "OCTET_LENGTH",
    repeat => "REPEAT",
    replace => "REPLACE",
    reverse => "REVERSE",
    right => "RIGHT",
    rpad => "RPAD",
    rtrim => "RTRIM",
    substr => "SUBSTR",
    trim => "TRIM",
    upper => "UPPER",
    // Conditionals.
    coalesce => "COALESCE",
    greatest => "GREATEST",
    least => "LEAST",
    nullif => "NULLIF",
    // Aggregates.
    array_agg => "ARRAY_AGG",
    avg => "AVG",
    bit_and => "BIT_AND",
    bit_or => "BIT_OR",
    bool_and => "BOOL_AND",
    bool_or => "BOOL_OR",
    count => "COUNT",
    max => "MAX",
    min => "MIN",
    string_agg => "STRING_AGG",
    sum => "SUM",
    stddev_pop => "STDDEV_POP",
    stddev_samp => "STDDEV_SAMP",
    var_pop => "VAR_POP",
    var_samp => "VAR_SAMP",
}

/// The `PI` constant function.
#[must_use]
pub fn pi() -> Func {
    Func::new("PI")
}

/// The `RANDOM` function (`RAND` on MySQL).
#[must_use]
pub fn random() -> Func {
    Func::new("RANDOM")
}

/// `COUNT(*)`.
#[must_use]
pub fn count_star() -> Func {
    Func::new("COUNT")
}

/// `CAST(expr AS type)`.
#[must_use]
pub fn cast(expr: impl Into<Term>, type_name: impl Into<String>) -> Func {
    Func::with_args("CAST", [expr.into(), Term::from(type_name.into())])
}

/// `expr BETWEEN low AND high`.
#[must_use]
pub fn between(expr: impl Into<Term>, low: impl Into<Term>, high: impl Into<Term>) -> Func {
    Func::with_args("BETWEEN", [expr.into(), low.into(), high.into()])
}
