use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four arithmetic operators a question can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Glyph shown between the operands.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A generated arithmetic question. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub operand_a: u32,
    pub operand_b: u32,
    pub operator: Operator,
    pub answer: u32,
}

impl Question {
    pub fn is_correct(&self, value: i64) -> bool {
        value == i64::from(self.answer)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = ?",
            self.operand_a, self.operator, self.operand_b
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_display_glyphs() {
        let question = Question {
            operand_a: 42,
            operand_b: 6,
            operator: Operator::Divide,
            answer: 7,
        };
        assert_eq!(question.to_string(), "42 ÷ 6 = ?");

        let question = Question {
            operand_a: 3,
            operand_b: 4,
            operator: Operator::Multiply,
            answer: 12,
        };
        assert_eq!(question.to_string(), "3 × 4 = ?");
    }

    #[test]
    fn negative_input_is_never_correct() {
        let question = Question {
            operand_a: 5,
            operand_b: 5,
            operator: Operator::Subtract,
            answer: 0,
        };
        assert!(question.is_correct(0));
        assert!(!question.is_correct(-1));
    }
}
