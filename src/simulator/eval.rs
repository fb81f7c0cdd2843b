//! String-driven expression and condition evaluation.
//!
//! There is no tokenizer: an expression is classified by its shape, in a
//! fixed order. Binary operators are found by searching for ` + `, ` - `,
//! ` * ` and ` / ` in that order and splitting at the first occurrence. The
//! operator searched first always ends up outermost: `2 + 3 * 4` is
//! `2 + (3 * 4)`, while `10 - 4 - 3` is `10 - (4 - 3)`. This is not standard
//! precedence.

use anyhow::{Result, bail};

use super::value::{Value, Variables, format_number, parse_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

const OPERATORS: [(&str, BinaryOp); 4] = [
    (" + ", BinaryOp::Add),
    (" - ", BinaryOp::Sub),
    (" * ", BinaryOp::Mul),
    (" / ", BinaryOp::Div),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Greater,
    Less,
    Equal,
}

const COMPARISONS: [(&str, Comparison); 3] = [
    (" > ", Comparison::Greater),
    (" < ", Comparison::Less),
    (" == ", Comparison::Equal),
];

/// Deepest operator nesting a single expression may reach.
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// Evaluate `expr` against the variable table.
///
/// In order: quoted string, numeric literal, bound variable, binary
/// expression, and finally the text itself as an opaque string.
pub fn evaluate(expr: &str, vars: &Variables) -> Result<Value> {
    evaluate_at(expr, vars, 0)
}

fn evaluate_at(expr: &str, vars: &Variables, depth: usize) -> Result<Value> {
    if let Some(inner) = unquote(expr) {
        return Ok(Value::Str(inner.to_string()));
    }
    if let Some(n) = parse_number(expr) {
        return Ok(Value::Num(n));
    }
    if let Some(v) = vars.get(expr) {
        return Ok(v.clone());
    }
    for (token, op) in OPERATORS {
        if let Some((left, right)) = expr.split_once(token) {
            if depth >= MAX_EXPRESSION_DEPTH {
                bail!(
                    "expression nests more than {} operators deep",
                    MAX_EXPRESSION_DEPTH
                );
            }
            let left = evaluate_at(left, vars, depth + 1)?;
            let right = evaluate_at(right, vars, depth + 1)?;
            return apply(op, left, right);
        }
    }
    Ok(Value::Str(expr.to_string()))
}

/// Evaluate an `if` condition.
///
/// Supports ` > `, ` < ` and ` == ` (checked in that order); anything else
/// is evaluated as an expression and tested for truthiness.
pub fn evaluate_condition(condition: &str, vars: &Variables) -> Result<bool> {
    for (token, cmp) in COMPARISONS {
        if let Some((left, right)) = condition.split_once(token) {
            let left = evaluate(left, vars)?;
            let right = evaluate(right, vars)?;
            return Ok(compare(cmp, &left, &right));
        }
    }
    Ok(evaluate(condition, vars)?.is_truthy())
}

fn unquote(expr: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if expr.starts_with(quote) && expr.ends_with(quote) {
            // a lone quote character is both the opening and the closing one
            return Some(if expr.len() >= 2 { &expr[1..expr.len() - 1] } else { "" });
        }
    }
    None
}

fn apply(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    if op == BinaryOp::Add {
        return match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => finite(a + b, *a, "+", *b).map(Value::Num),
            _ => Ok(Value::Str(format!("{}{}", left, right))),
        };
    }

    let a = as_number(&left)?;
    let b = as_number(&right)?;
    let (symbol, result) = match op {
        BinaryOp::Sub => ("-", a - b),
        BinaryOp::Mul => ("*", a * b),
        BinaryOp::Div => {
            if b == 0.0 {
                bail!("division by zero: {} / {}", format_number(a), format_number(b));
            }
            ("/", a / b)
        }
        BinaryOp::Add => unreachable!("handled above"),
    };
    finite(result, a, symbol, b).map(Value::Num)
}

fn as_number(value: &Value) -> Result<f64> {
    match value.to_number() {
        Some(n) => Ok(n),
        None => bail!("cannot use {} '{}' as a number", value.type_name(), value),
    }
}

fn finite(result: f64, a: f64, symbol: &str, b: f64) -> Result<f64> {
    if !result.is_finite() {
        bail!(
            "{} {} {} does not give a finite number",
            format_number(a),
            symbol,
            format_number(b)
        );
    }
    Ok(result)
}

fn compare(cmp: Comparison, left: &Value, right: &Value) -> bool {
    match cmp {
        Comparison::Equal => match (left, right) {
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        },
        Comparison::Greater | Comparison::Less => {
            let ordering = match (left, right) {
                // neither side is a number: compare the text
                (Value::Str(_) | Value::List(_), Value::Str(_) | Value::List(_)) => {
                    Some(left.to_string().cmp(&right.to_string()))
                }
                _ => match (left.to_number(), right.to_number()) {
                    (Some(a), Some(b)) => a.partial_cmp(&b),
                    _ => None,
                },
            };
            match (cmp, ordering) {
                (Comparison::Greater, Some(std::cmp::Ordering::Greater)) => true,
                (Comparison::Less, Some(std::cmp::Ordering::Less)) => true,
                _ => false,
            }
        }
    }
}
