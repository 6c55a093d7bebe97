//! Random question generation.

use rand::Rng;

use crate::models::{Operator, Question};

/// Largest operand drawn at `level`.
pub fn max_operand(level: u32) -> u32 {
    5 + level * 5
}

/// Draw a question for `level` using one of `operators`, chosen uniformly.
///
/// Division questions are built from divisor and quotient so the answer is
/// always a whole number. Subtraction puts the larger operand first.
///
/// # Panics
///
/// Panics if `operators` is empty; [`Rules::validate`](super::Rules::validate)
/// rules that out.
pub fn generate_question<R: Rng + ?Sized>(
    rng: &mut R,
    level: u32,
    operators: &[Operator],
) -> Question {
    let operator = operators[rng.random_range(0..operators.len())];
    let max_n = max_operand(level);

    if operator == Operator::Divide {
        let divisor = rng.random_range(1..=max_n);
        let quotient = rng.random_range(1..=max_n);
        return Question {
            operand_a: divisor * quotient,
            operand_b: divisor,
            operator,
            answer: quotient,
        };
    }

    let mut a = rng.random_range(1..=max_n);
    let mut b = rng.random_range(1..=max_n);
    if operator == Operator::Subtract && a < b {
        std::mem::swap(&mut a, &mut b);
    }

    let answer = match operator {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => unreachable!("handled above"),
    };

    Question {
        operand_a: a,
        operand_b: b,
        operator,
        answer,
    }
}
