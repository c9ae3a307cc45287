// repeated characters and monotonic sequences

use crate::data::Tables;

use super::{Match, MatchKind};

/// maximal runs of the same byte, length >= 3
pub fn repeat_match(password: &[u8]) -> Vec<Match> {
    let mut results = Vec::new();
    let mut i = 0;
    while i < password.len() {
        let mut j = i + 1;
        while j < password.len() && password[j] == password[i] {
            j += 1;
        }
        if j - i >= 3 {
            results.push(Match::new(
                MatchKind::Repeat {
                    repeated_char: password[i] as char,
                },
                i,
                j - 1,
                password,
            ));
        }
        i = j;
    }
    results
}

/// runs over the monotonic character sequences (lower, upper, digit),
/// stepping by exactly +-1 without wrap, length >= 3
pub fn sequence_match(password: &[u8], tables: &Tables) -> Vec<Match> {
    let mut results = Vec::new();
    let n = password.len();
    let mut i = 0;
    'outer: while i + 1 < n {
        for &(name, seq) in tables.sequences {
            let (Some(cur), Some(next)) = (
                position_in(seq, password[i]),
                position_in(seq, password[i + 1]),
            ) else {
                continue;
            };
            let direction = next - cur;
            if direction != 1 && direction != -1 {
                continue;
            }
            // extend while the step direction holds
            let mut j = i + 1;
            let mut prev = next;
            while j + 1 < n {
                let Some(pos) = position_in(seq, password[j + 1]) else {
                    break;
                };
                if pos - prev != direction {
                    break;
                }
                prev = pos;
                j += 1;
            }
            if j - i + 1 >= 3 {
                results.push(Match::new(
                    MatchKind::Sequence {
                        seq_name: name,
                        seq_space: seq.len() as u64,
                        ascending: direction == 1,
                    },
                    i,
                    j,
                    password,
                ));
            }
            i = j;
            continue 'outer;
        }
        i += 1;
    }
    results
}

fn position_in(seq: &[u8], byte: u8) -> Option<i32> {
    seq.iter().position(|&c| c == byte).map(|p| p as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Tables {
        Tables::load().unwrap()
    }

    #[test]
    fn repeat_run_of_three() {
        let matches = repeat_match(b"aaa");
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (0, 2));
        match &matches[0].kind {
            MatchKind::Repeat { repeated_char } => assert_eq!(*repeated_char, 'a'),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn repeat_runs_are_maximal() {
        let matches = repeat_match(b"xaaaax");
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (1, 4));
    }

    #[test]
    fn repeat_short_runs_ignored() {
        assert!(repeat_match(b"aabbcc").is_empty());
        assert!(repeat_match(b"aa").is_empty());
        assert!(repeat_match(b"").is_empty());
    }

    #[test]
    fn repeat_multiple_runs() {
        let matches = repeat_match(b"aaa999");
        assert_eq!(matches.len(), 2);
        assert_eq!((matches[1].i, matches[1].j), (3, 5));
    }

    #[test]
    fn ascending_lower_sequence() {
        let matches = sequence_match(b"abcd", &tables());
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.i, m.j), (0, 3));
        match &m.kind {
            MatchKind::Sequence {
                seq_name,
                seq_space,
                ascending,
            } => {
                assert_eq!(*seq_name, "lower");
                assert_eq!(*seq_space, 26);
                assert!(*ascending);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn descending_digit_sequence() {
        let matches = sequence_match(b"98765", &tables());
        assert_eq!(matches.len(), 1);
        match &matches[0].kind {
            MatchKind::Sequence {
                seq_name,
                ascending,
                ..
            } => {
                assert_eq!(*seq_name, "digit");
                assert!(!ascending);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn sequence_embedded_in_noise() {
        let matches = sequence_match(b"x7stuvx", &tables());
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (2, 5));
    }

    #[test]
    fn no_wrap_around() {
        assert!(sequence_match(b"yzab", &tables()).len() <= 1);
        let matches = sequence_match(b"zab", &tables());
        assert!(matches.is_empty());
    }

    #[test]
    fn pairs_too_short() {
        assert!(sequence_match(b"ab", &tables()).is_empty());
        assert!(sequence_match(b"ab1", &tables()).is_empty());
    }

    #[test]
    fn mixed_case_breaks_sequence() {
        // 'b' and 'C' live in different sequence tables
        assert!(sequence_match(b"aBc", &tables()).is_empty());
    }
}
