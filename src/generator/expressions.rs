/*
expressions.rs

Copyright 2025 The Numtrail Authors

This file is part of Numtrail.

Numtrail is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Numtrail is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Numtrail. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Synthesize an arithmetic expression for a target integer.
//!
//! The expression text format is `"<operand> <symbol> <operand>"` with the
//! unicode symbols `+ − × ÷`. Downstream renderers match on this format, so
//! it must remain stable. [`parse_expression`] accepts the ASCII equivalents
//! interchangeably.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::settings::DifficultySettings;

/// Number of operation draws before falling back to plain addition.
const MAX_RETRIES: usize = 10;

/// Probability of forcing division on a cell flagged as division-friendly.
const DIVISION_FORCE_PROBABILITY: f64 = 0.8;

/// Hard cap on divisors, whatever the configured range.
const MAX_DIVISOR: i32 = 14;

/// Arithmetic operation of an expression.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    /// Display symbol of the operation.
    pub fn symbol(&self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '−',
            Operation::Multiplication => '×',
            Operation::Division => '÷',
        }
    }
}

/// A synthesized expression whose evaluation equals its target.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// Display text, such as `"12 ÷ 3"`.
    pub text: String,

    pub operation: Operation,
    pub operand_a: i32,
    pub operand_b: i32,

    /// Evaluation result, always equal to the requested target.
    pub result: i32,
}

impl Expression {
    fn new(operand_a: i32, operation: Operation, operand_b: i32, result: i32) -> Self {
        Self {
            text: format!("{operand_a} {} {operand_b}", operation.symbol()),
            operation,
            operand_a,
            operand_b,
            result,
        }
    }
}

/// [`ExpressionSynthesizer`] object.
pub struct ExpressionSynthesizer<'a> {
    settings: &'a DifficultySettings,
}

impl<'a> ExpressionSynthesizer<'a> {
    /// Create the object.
    pub fn new(settings: &'a DifficultySettings) -> Self {
        Self { settings }
    }

    /// Generate an expression that evaluates to `target`.
    ///
    /// The operation is a weighted random pick among the enabled operations.
    /// Cells flagged with `prioritize_division` force division most of the
    /// time when the target fits the divisor range, and targets with a valid
    /// factor decomposition lean toward multiplication. The method never
    /// fails: when no drawn operation fits the target, it falls back to an
    /// unconstrained addition split (and to `2 − 1` for a target of 1).
    pub fn synthesize(
        &self,
        target: i32,
        prioritize_division: bool,
        rng: &mut impl Rng,
    ) -> Expression {
        for _ in 0..MAX_RETRIES {
            let operation: Operation = self.pick_operation(target, prioritize_division, rng);
            let expression: Option<Expression> = match operation {
                Operation::Addition => self.try_addition(target, rng),
                Operation::Subtraction => self.try_subtraction(target, rng),
                Operation::Multiplication => self.try_multiplication(target, rng),
                Operation::Division => self.try_division(target, rng),
            };
            if let Some(e) = expression {
                return e;
            }
        }
        debug!("Falling back to relaxed addition for target {target}");
        if target <= 1 {
            return Expression::new(2, Operation::Subtraction, 1, 1);
        }
        let a: i32 = rng.random_range(1..target);
        Expression::new(a, Operation::Addition, target - a, target)
    }

    /// Pick an operation among the ones enabled in the settings.
    fn pick_operation(
        &self,
        target: i32,
        prioritize_division: bool,
        rng: &mut impl Rng,
    ) -> Operation {
        if prioritize_division
            && self.settings.division
            && target <= self.settings.mult_div_range
            && !self.division_candidates(target).is_empty()
            && rng.random_bool(DIVISION_FORCE_PROBABILITY)
        {
            return Operation::Division;
        }
        if self.settings.multiplication
            && !self.factor_pairs(target).is_empty()
            && rng.random_bool(Self::multiplication_boost(target))
        {
            return Operation::Multiplication;
        }

        let mut choices: Vec<(Operation, u32)> = Vec::with_capacity(4);
        if self.settings.addition {
            choices.push((Operation::Addition, self.settings.weights.addition));
        }
        if self.settings.subtraction {
            choices.push((Operation::Subtraction, self.settings.weights.subtraction));
        }
        if self.settings.multiplication {
            choices.push((Operation::Multiplication, self.settings.weights.multiplication));
        }
        if self.settings.division {
            choices.push((Operation::Division, self.settings.weights.division));
        }

        // The orchestrator rejects settings with no enabled operation, but a
        // direct caller still gets a working synthesizer.
        if choices.is_empty() {
            return Operation::Addition;
        }
        let total: u32 = choices.iter().map(|(_, w)| *w).sum();
        if total == 0 {
            return choices[0].0;
        }
        let mut roll: u32 = rng.random_range(0..total);
        for (operation, weight) in &choices {
            if roll < *weight {
                return *operation;
            }
            roll -= weight;
        }
        choices[0].0
    }

    /// Probability of biasing toward multiplication for the given target.
    ///
    /// Scales from 0.40 at targets of 25 or less to 0.60 at 50 or more.
    fn multiplication_boost(target: i32) -> f64 {
        0.40 + 0.20 * (((target - 25) as f64) / 25.0).clamp(0.0, 1.0)
    }

    fn try_addition(&self, target: i32, rng: &mut impl Rng) -> Option<Expression> {
        let max_operand: i32 = self.settings.add_sub_range;
        let low: i32 = (target - max_operand).max(1);
        let high: i32 = max_operand.min(target - 1);
        if low > high {
            return None;
        }
        let a: i32 = rng.random_range(low..=high);
        Some(Expression::new(a, Operation::Addition, target - a, target))
    }

    fn try_subtraction(&self, target: i32, rng: &mut impl Rng) -> Option<Expression> {
        let max_operand: i32 = self.settings.add_sub_range;
        if max_operand <= target {
            return None;
        }
        // a = target + b keeps the result positive and a within range.
        let b: i32 = rng.random_range(1..=max_operand - target);
        Some(Expression::new(target + b, Operation::Subtraction, b, target))
    }

    fn try_multiplication(&self, target: i32, rng: &mut impl Rng) -> Option<Expression> {
        let pairs: Vec<(i32, i32)> = self.factor_pairs(target);
        let (a, b) = *pairs.choose(rng)?;
        let (a, b) = if rng.random_bool(0.5) { (a, b) } else { (b, a) };
        Some(Expression::new(a, Operation::Multiplication, b, target))
    }

    fn try_division(&self, target: i32, rng: &mut impl Rng) -> Option<Expression> {
        let candidates: Vec<i32> = self.division_candidates(target);
        let b: i32 = *candidates.choose(rng)?;
        Some(Expression::new(target * b, Operation::Division, b, target))
    }

    /// Factor pairs `(a, b)` with both factors in `[2, mult_div_range]` and
    /// `a * b == target`.
    fn factor_pairs(&self, target: i32) -> Vec<(i32, i32)> {
        let max_factor: i32 = self.settings.mult_div_range;
        let mut pairs: Vec<(i32, i32)> = Vec::new();

        let mut a: i32 = 2;
        while a * a <= target && a <= max_factor {
            if target % a == 0 {
                let b: i32 = target / a;
                if b >= 2 && b <= max_factor {
                    pairs.push((a, b));
                }
            }
            a += 1;
        }
        pairs
    }

    /// Divisors `b` such that `target * b` stays within the dividend bound.
    fn division_candidates(&self, target: i32) -> Vec<i32> {
        let max_divisor: i32 = self.settings.mult_div_range.min(MAX_DIVISOR);
        let max_dividend: i32 = self.settings.mult_div_range * self.settings.mult_div_range;

        (2..=max_divisor)
            .filter(|b| target * b <= max_dividend)
            .collect()
    }
}

/// Parse an expression text into its operands and operation.
///
/// The unicode symbols `+ − × ÷` and their ASCII equivalents `- * x /` are
/// accepted interchangeably.
pub fn parse_expression(text: &str) -> Option<(i32, Operation, i32)> {
    let mut parts = text.split_whitespace();
    let a: i32 = parts.next()?.parse().ok()?;
    let operation: Operation = match parts.next()? {
        "+" => Operation::Addition,
        "−" | "-" => Operation::Subtraction,
        "×" | "*" | "x" | "X" => Operation::Multiplication,
        "÷" | "/" => Operation::Division,
        _ => return None,
    };
    let b: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((a, operation, b))
}

/// Evaluate an expression text.
///
/// Return [`None`] for malformed texts and for divisions that are not exact.
pub fn evaluate(text: &str) -> Option<i32> {
    let (a, operation, b) = parse_expression(text)?;

    match operation {
        Operation::Addition => Some(a + b),
        Operation::Subtraction => Some(a - b),
        Operation::Multiplication => Some(a * b),
        Operation::Division => {
            if b != 0 && a % b == 0 {
                Some(a / b)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::settings::DifficultySettings;

    fn only(operation: Operation) -> DifficultySettings {
        let mut settings: DifficultySettings = DifficultySettings::custom(3, 4);
        settings.addition = operation == Operation::Addition;
        settings.subtraction = operation == Operation::Subtraction;
        settings.multiplication = operation == Operation::Multiplication;
        settings.division = operation == Operation::Division;
        settings
    }

    #[test]
    fn test_target_one_fallback() {
        let settings: DifficultySettings = only(Operation::Addition);
        let synthesizer: ExpressionSynthesizer = ExpressionSynthesizer::new(&settings);
        let mut rng: StdRng = StdRng::seed_from_u64(0);
        let expression: Expression = synthesizer.synthesize(1, false, &mut rng);

        assert_eq!(expression.text, "2 − 1");
        assert_eq!(expression.result, 1);
    }

    #[test]
    fn test_addition_only_never_fails() {
        let settings: DifficultySettings = only(Operation::Addition);
        let synthesizer: ExpressionSynthesizer = ExpressionSynthesizer::new(&settings);
        let mut rng: StdRng = StdRng::seed_from_u64(1);

        for target in 1..=80 {
            let expression: Expression = synthesizer.synthesize(target, false, &mut rng);

            assert_eq!(expression.result, target);
            assert_eq!(evaluate(&expression.text), Some(target));
        }
    }

    #[test]
    fn test_multiplication_operands_in_range() {
        let settings: DifficultySettings = only(Operation::Multiplication);
        let synthesizer: ExpressionSynthesizer = ExpressionSynthesizer::new(&settings);

        for seed in 0..20 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let expression: Expression = synthesizer.synthesize(12, false, &mut rng);

            assert_eq!(expression.operation, Operation::Multiplication);
            assert_eq!(expression.operand_a * expression.operand_b, 12);
            assert!(expression.operand_a >= 2 && expression.operand_a <= 12);
            assert!(expression.operand_b >= 2 && expression.operand_b <= 12);
        }
    }

    #[test]
    fn test_division_constraints() {
        let settings: DifficultySettings = only(Operation::Division);
        let synthesizer: ExpressionSynthesizer = ExpressionSynthesizer::new(&settings);

        for seed in 0..20 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            let expression: Expression = synthesizer.synthesize(6, true, &mut rng);

            assert_eq!(expression.operation, Operation::Division);
            assert!(expression.operand_b >= 2 && expression.operand_b <= 12);
            assert_eq!(expression.operand_a % expression.operand_b, 0);
            assert_eq!(expression.operand_a / expression.operand_b, 6);
        }
    }

    #[test]
    fn test_subtraction_never_negative() {
        let settings: DifficultySettings = only(Operation::Subtraction);
        let synthesizer: ExpressionSynthesizer = ExpressionSynthesizer::new(&settings);
        let mut rng: StdRng = StdRng::seed_from_u64(9);

        for target in 1..=25 {
            let expression: Expression = synthesizer.synthesize(target, false, &mut rng);

            if expression.operation == Operation::Subtraction {
                assert!(expression.operand_a > expression.operand_b);
                assert!(expression.operand_a <= settings.add_sub_range);
            }
            assert_eq!(expression.result, target);
        }
    }

    #[test]
    fn test_parse_unicode_and_ascii() {
        assert_eq!(
            parse_expression("3 × 4"),
            Some((3, Operation::Multiplication, 4))
        );
        assert_eq!(
            parse_expression("3 * 4"),
            Some((3, Operation::Multiplication, 4))
        );
        assert_eq!(
            parse_expression("9 − 2"),
            Some((9, Operation::Subtraction, 2))
        );
        assert_eq!(
            parse_expression("9 - 2"),
            Some((9, Operation::Subtraction, 2))
        );
        assert_eq!(parse_expression("8 ÷ 2"), Some((8, Operation::Division, 2)));
        assert_eq!(parse_expression("8 / 2"), Some((8, Operation::Division, 2)));
        assert_eq!(parse_expression("garbage"), None);
        assert_eq!(parse_expression("1 + 2 + 3"), None);
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate("3 + 4"), Some(7));
        assert_eq!(evaluate("9 − 2"), Some(7));
        assert_eq!(evaluate("3 × 4"), Some(12));
        assert_eq!(evaluate("12 ÷ 4"), Some(3));
        assert_eq!(evaluate("13 ÷ 4"), None);
        assert_eq!(evaluate("nope"), None);
    }
}
