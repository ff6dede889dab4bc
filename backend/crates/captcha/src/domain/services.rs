//! Domain Services
//!
//! Pure domain logic for challenge generation and answer checking.

use rand::Rng;

/// A generated arithmetic challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathChallenge {
    /// Question shown to the client, e.g. "3 + 5"
    pub question: String,
    /// Integer result; negative for some subtractions
    pub answer: i32,
}

/// Generate an arithmetic challenge: two integers in [1,9] and + or -
pub fn generate_math_challenge<R: Rng>(rng: &mut R) -> MathChallenge {
    let a: i32 = rng.gen_range(1..=9);
    let b: i32 = rng.gen_range(1..=9);

    if rng.gen_bool(0.5) {
        MathChallenge {
            question: format!("{} + {}", a, b),
            answer: a + b,
        }
    } else {
        MathChallenge {
            question: format!("{} - {}", a, b),
            answer: a - b,
        }
    }
}

/// Compare a supplied answer against the stored one
///
/// Whitespace is trimmed and the comparison is case-insensitive, so
/// non-numeric challenge kinds can reuse the same check.
pub fn answers_match(stored: &str, supplied: &str) -> bool {
    stored.trim().eq_ignore_ascii_case(supplied.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_math_challenge_ranges() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let challenge = generate_math_challenge(&mut rng);
            // Sums are at most 18, differences at least -8
            assert!(challenge.answer >= -8 && challenge.answer <= 18);
            assert!(challenge.question.contains('+') || challenge.question.contains('-'));
        }
    }

    #[test]
    fn test_generate_math_challenge_answer_consistent() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let challenge = generate_math_challenge(&mut rng);
            let parts: Vec<&str> = challenge.question.split_whitespace().collect();
            assert_eq!(parts.len(), 3);
            let a: i32 = parts[0].parse().unwrap();
            let b: i32 = parts[2].parse().unwrap();
            let expected = match parts[1] {
                "+" => a + b,
                "-" => a - b,
                op => panic!("unexpected operator {op}"),
            };
            assert_eq!(challenge.answer, expected);
        }
    }

    #[test]
    fn test_answers_match_trims_whitespace() {
        assert!(answers_match("8", " 8 "));
        assert!(answers_match(" -3", "-3"));
        assert!(!answers_match("8", "9"));
    }

    #[test]
    fn test_answers_match_case_insensitive() {
        assert!(answers_match("ABC", "abc"));
        assert!(!answers_match("abc", "abd"));
    }
}
