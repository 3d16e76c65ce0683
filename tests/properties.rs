// Property tests for validation and execution semantics

use bfrt::engine::{BasicEngine, JumpTableEngine};
use bfrt::{parse_source, EofMode, ExecutionControl, ParseError, Settings};
use proptest::prelude::*;

/// Reference bracket check, independent of the parser.
fn balanced(s: &str) -> bool {
    let mut depth: i64 = 0;
    for c in s.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

fn is_core(c: char) -> bool {
    matches!(c, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']')
}

/// Balanced programs over the core alphabet mixed with noise.
fn balanced_program() -> impl Strategy<Value = String> {
    let leaf = prop::collection::vec(
        prop::sample::select(vec!['>', '<', '+', '-', '.', ',', 'x', ' ', '\n', '#']),
        0..8,
    )
    .prop_map(|cs| cs.into_iter().collect::<String>());

    leaf.prop_recursive(4, 64, 4, |inner| {
        prop::collection::vec(
            prop_oneof![
                inner.clone(),
                inner.prop_map(|body| format!("[{}]", body)),
            ],
            1..4,
        )
        .prop_map(|parts| parts.concat())
    })
}

/// Loop-free programs that never read input.
fn straight_line() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['>', '<', '+', '-', '.']), 0..200)
        .prop_map(|cs| cs.into_iter().collect())
}

fn run_basic(src: &str, input: &str, settings: &Settings) -> BasicEngine {
    let program = parse_source(src, settings).unwrap();
    let mut engine = BasicEngine::new(&program, settings, input);
    engine.run().unwrap();
    engine
}

proptest! {
    #[test]
    fn balanced_programs_validate_to_filtered_source(src in balanced_program()) {
        let program = parse_source(&src, &Settings::default()).unwrap();
        let expected: String = src.chars().filter(|&c| is_core(c)).collect();
        prop_assert_eq!(program.cleaned(), expected.as_str());
        prop_assert_eq!(program.original(), src.as_str());
    }

    #[test]
    fn validation_agrees_with_reference(src in "[\\[\\]+a-]{0,40}") {
        let result = parse_source(&src, &Settings::default());
        prop_assert_eq!(result.is_ok(), balanced(&src));
    }

    #[test]
    fn extra_bracket_is_rejected(
        src in balanced_program(),
        bracket in prop::sample::select(vec!['[', ']']),
        pos in any::<prop::sample::Index>(),
    ) {
        let mut chars: Vec<char> = src.chars().collect();
        let at = pos.index(chars.len() + 1);
        chars.insert(at, bracket);
        let broken: String = chars.into_iter().collect();

        prop_assert_eq!(
            parse_source(&broken, &Settings::default()),
            Err(ParseError::ImbalancedBrackets)
        );
    }

    #[test]
    fn leading_close_is_rejected(src in balanced_program()) {
        let broken = format!("]{}[", src);
        prop_assert_eq!(
            parse_source(&broken, &Settings::default()),
            Err(ParseError::ImbalancedBrackets)
        );
    }

    #[test]
    fn cell_arithmetic_is_modular(
        n in 0usize..700,
        min in -300i64..300,
        width in 1i64..300,
        increment in any::<bool>(),
    ) {
        let settings = Settings {
            cell_min: min,
            cell_max: min + width,
            ..Settings::default()
        };
        let op = if increment { "+" } else { "-" };
        let engine = run_basic(&op.repeat(n), "", &settings);

        let start = min + (0 - min).rem_euclid(width);
        let delta = if increment { n as i64 } else { -(n as i64) };
        let expected = min + (start + delta - min).rem_euclid(width);
        prop_assert_eq!(engine.execution().tape().get(), expected);
    }

    #[test]
    fn max_wraps_to_min(min in -1000i64..1000, width in 1i64..1000) {
        let settings = Settings {
            cell_min: min,
            cell_max: min + width,
            eof_mode: EofMode::Zero,
            ..Settings::default()
        };
        // Walk the cell up to the maximum starting from its zero residue
        let start = min + (0 - min).rem_euclid(width);
        let to_max = (min + width - 1 - start) as usize;
        let engine = run_basic(&"+".repeat(to_max + 1), "", &settings);
        prop_assert_eq!(engine.execution().tape().get(), min);
    }

    #[test]
    fn pointer_stays_on_tape(
        moves in prop::collection::vec(any::<bool>(), 0..300),
        len in 1usize..40,
    ) {
        let src: String = moves.iter().map(|&right| if right { '>' } else { '<' }).collect();
        let settings = Settings { tape_length: len, ..Settings::default() };
        let engine = run_basic(&src, "", &settings);

        let mut expected = 0usize;
        for right in moves {
            expected = if right { (expected + 1).min(len - 1) } else { expected.saturating_sub(1) };
        }
        prop_assert_eq!(engine.execution().tape().pointer(), expected);
        prop_assert!(engine.execution().tape().pointer() < len);
    }

    #[test]
    fn eof_policy_applies_after_input(
        input in "[a-z]{0,5}",
        extra in 1usize..4,
        mode in prop::sample::select(EofMode::ALL.to_vec()),
    ) {
        let settings = Settings { eof_mode: mode, ..Settings::default() };
        let reads = ",".repeat(input.len() + extra);
        let engine = run_basic(&reads, &input, &settings);

        let last_read = input.chars().last().map(|c| i64::from(u32::from(c))).unwrap_or(0);
        let expected = match mode {
            EofMode::Zero => 0,
            EofMode::NegativeOne => 255,
            EofMode::Nop => last_read,
        };
        prop_assert_eq!(engine.execution().tape().get(), expected);
        prop_assert_eq!(engine.execution().input_cursor(), input.len());
    }

    #[test]
    fn straight_line_output_matches(src in straight_line()) {
        let settings = Settings::default();
        let program = parse_source(&src, &settings).unwrap();
        let mut basic = BasicEngine::new(&program, &settings, "");
        let mut table = JumpTableEngine::new(&program, &settings, "");
        prop_assert_eq!(basic.run(), table.run());
    }

    #[test]
    fn engines_agree(src in balanced_program(), input in "[ -~]{0,8}") {
        let settings = Settings::default();
        let program = parse_source(&src, &settings).unwrap();
        let control = ExecutionControl::unbounded().with_max_steps(5_000);

        let mut basic = BasicEngine::new(&program, &settings, &input).with_control(control.clone());
        let mut table = JumpTableEngine::new(&program, &settings, &input).with_control(control);

        prop_assert_eq!(basic.run(), table.run());
        prop_assert_eq!(basic.state(), table.state());
    }
}
