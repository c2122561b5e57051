//! Pure structural checks over the AST that select special layouts.

use crate::ast::{BinOp, Delimiter, Expr};

/// `[[a, b], [c, d]]`: a bracket group holding a sequence of bracket groups.
pub fn is_matrix(expr: &Expr) -> bool {
    match expr {
        Expr::Group {
            delim: Delimiter::Bracket,
            expr: Some(inner),
        } => matches!(inner.as_ref(), Expr::Sequence(rows) if is_matrix_rows(rows)),
        _ => false,
    }
}

/// Every item of a matrix body is itself a bracket group.
pub fn is_matrix_rows(rows: &[Expr]) -> bool {
    !rows.is_empty() && rows.iter().all(|row| row.is_group(Delimiter::Bracket))
}

/// True when a division appears anywhere along the operator spine.
pub fn contains_fraction(expr: &Expr) -> bool {
    match expr {
        Expr::Binary {
            op: BinOp::Divide, ..
        } => true,
        Expr::Binary { left, right, .. } => contains_fraction(left) || contains_fraction(right),
        Expr::Script { base, .. } => contains_fraction(base),
        Expr::Group {
            expr: Some(inner), ..
        } => contains_fraction(inner),
        _ => false,
    }
}

pub fn is_partial(expr: &Expr) -> bool {
    matches!(expr, Expr::Ident(name) if name == "partial")
}

/// True when `partial` appears in a product or as a script base.
pub fn contains_partial(expr: &Expr) -> bool {
    match expr {
        Expr::Ident(_) => is_partial(expr),
        Expr::Binary { left, right, .. } => contains_partial(left) || contains_partial(right),
        Expr::Script { base, .. } => contains_partial(base),
        _ => false,
    }
}

/// The `n` of `mod n` written as identifier `mod` times an operand.
pub fn modulus_operand(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Binary {
            op: BinOp::Multiply,
            left,
            right,
            implicit: true,
        } if matches!(left.as_ref(), Expr::Ident(name) if name == "mod") => Some(right),
        _ => None,
    }
}

pub fn is_modulus(expr: &Expr) -> bool {
    modulus_operand(expr).is_some()
}

/// True when the leftmost operand is a prefix `mod`, i.e. the rendering
/// starts with `\pmod`.
pub fn starts_with_pmod(expr: &Expr) -> bool {
    match expr {
        Expr::Unary { op, .. } => op.is_keyword("mod"),
        Expr::Binary { left, .. } => starts_with_pmod(left),
        Expr::Sequence(items) => items.first().is_some_and(starts_with_pmod),
        _ => false,
    }
}

/// A `( )` group that renders as `\pmod{...}` without its parentheses.
pub fn is_pmod_group(expr: &Expr) -> bool {
    match expr {
        Expr::Group {
            delim: Delimiter::Paren,
            expr: Some(inner),
        } => is_modulus(inner) || starts_with_pmod(inner),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::UnaryOp;

    fn row(cells: &[&str]) -> Expr {
        let cells = cells.iter().map(|c| Expr::ident(*c)).collect();
        Expr::group(Delimiter::Bracket, Some(Expr::Sequence(cells)))
    }

    #[test]
    fn test_is_matrix() {
        let matrix = Expr::group(
            Delimiter::Bracket,
            Some(Expr::Sequence(vec![row(&["a", "b"]), row(&["c", "d"])])),
        );
        assert!(is_matrix(&matrix));

        // A single row has no sequence of rows
        let single = Expr::group(Delimiter::Bracket, Some(row(&["a", "b"])));
        assert!(!is_matrix(&single));

        let mixed = Expr::group(
            Delimiter::Bracket,
            Some(Expr::Sequence(vec![row(&["a", "b"]), Expr::ident("c")])),
        );
        assert!(!is_matrix(&mixed));
    }

    #[test]
    fn test_contains_fraction() {
        let frac = Expr::binary(BinOp::Divide, Expr::number("1"), Expr::ident("c"));
        let sum = Expr::binary(BinOp::Add, Expr::ident("b"), frac);
        assert!(contains_fraction(&Expr::group(Delimiter::Paren, Some(sum))));

        let plain = Expr::binary(BinOp::Add, Expr::ident("b"), Expr::ident("c"));
        assert!(!contains_fraction(&Expr::group(Delimiter::Paren, Some(plain))));
    }

    #[test]
    fn test_contains_partial() {
        let d2 = Expr::Script {
            base: Box::new(Expr::ident("partial")),
            sub: None,
            sup: Some(Box::new(Expr::number("2"))),
            is_double_script: false,
        };
        assert!(contains_partial(&d2));
        assert!(contains_partial(&Expr::implicit(Expr::ident("partial"), Expr::ident("x"))));
        assert!(!contains_partial(&Expr::ident("x")));
    }

    #[test]
    fn test_modulus_shapes() {
        let word = Expr::implicit(Expr::ident("mod"), Expr::ident("n"));
        assert!(is_modulus(&word));
        assert_eq!(modulus_operand(&word), Some(&Expr::ident("n")));

        let prefix = Expr::unary(UnaryOp::Keyword("mod".to_string()), Expr::ident("n"));
        assert!(!is_modulus(&prefix));
        assert!(starts_with_pmod(&prefix));
        assert!(starts_with_pmod(&Expr::implicit(prefix, Expr::ident("k"))));
        assert!(!starts_with_pmod(&Expr::unary(UnaryOp::Negate, Expr::ident("n"))));

        assert!(is_pmod_group(&Expr::group(Delimiter::Paren, Some(word))));
        assert!(!is_pmod_group(&Expr::group(Delimiter::Paren, Some(Expr::ident("n")))));
    }
}
