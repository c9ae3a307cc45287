// lookup tables derived from the embedded data at construction time

use std::collections::HashMap;

/// one ranked frequency list; rank of a word is its position + 1
#[derive(Debug, Clone)]
pub struct FrequencyList {
    pub name: String,
    pub words: Vec<String>,
}

/// keyboard layout family, decided by the layout name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardClass {
    Alpha,
    Keypad,
}

impl KeyboardClass {
    pub fn of_name(name: &str) -> KeyboardClass {
        if name.contains("keypad") {
            KeyboardClass::Keypad
        } else {
            KeyboardClass::Alpha
        }
    }
}

/// one keyboard layout: key byte -> ordered neighbor slots.
/// a slot holds "<unshifted><shifted>" (shifted optional) or is empty where
/// no key exists; the slot index encodes the physical direction.
#[derive(Debug, Clone)]
pub struct Keyboard {
    pub name: String,
    pub class: KeyboardClass,
    pub adjacency: HashMap<u8, Vec<Vec<u8>>>,
}

/// per-class keyboard averages feeding the spatial entropy model
#[derive(Debug, Clone)]
pub struct GraphStats {
    pub class: KeyboardClass,
    pub members: Vec<String>,
    pub average_degree: f64,
    pub starting_positions: f64,
}

static FALLBACK_STATS: GraphStats = GraphStats {
    class: KeyboardClass::Alpha,
    members: Vec::new(),
    average_degree: 1.0,
    starting_positions: 1.0,
};

/// character classes as (min byte, max byte, cardinality); a class counts
/// toward the brute-force alphabet if any password byte falls in its range.
/// order matters: the first matching class claims the byte.
const CHAR_CLASSES: [(u8, u8, u64); 5] = [
    (b'0', b'9', 10),
    (b'a', b'z', 26),
    (b'A', b'Z', 26),
    (0x00, 0x7f, 33),
    (0x00, 0xff, 100),
];

const L33T_TABLE: [(u8, &[u8]); 12] = [
    (b'a', b"4@"),
    (b'b', b"8"),
    (b'c', b"({[<"),
    (b'e', b"3"),
    (b'g', b"69"),
    (b'i', b"1!|"),
    (b'l', b"1|7"),
    (b'o', b"0"),
    (b's', b"$5"),
    (b't', b"+7"),
    (b'x', b"%"),
    (b'z', b"2"),
];

const SEQUENCES: [(&str, &[u8]); 3] = [
    ("lower", b"abcdefghijklmnopqrstuvwxyz"),
    ("upper", b"ABCDEFGHIJKLMNOPQRSTUVWXYZ"),
    ("digit", b"0123456789"),
];

/// immutable analyzer tables, loaded once at construction
#[derive(Debug, Clone)]
pub struct Tables {
    pub frequency_lists: Vec<FrequencyList>,
    pub keyboards: Vec<Keyboard>,
    pub graph_stats: Vec<GraphStats>,
    pub l33t_table: &'static [(u8, &'static [u8])],
    pub sequences: &'static [(&'static str, &'static [u8])],
    pub char_classes: &'static [(u8, u8, u64)],
}

impl Tables {
    pub fn load() -> Result<Tables, String> {
        let frequency_lists = super::load_frequency_lists()?
            .into_iter()
            .map(|(name, words)| FrequencyList { name, words })
            .collect();

        let keyboards: Vec<Keyboard> = super::load_adjacency_graphs()?
            .into_iter()
            .map(|(name, adjacency)| Keyboard {
                class: KeyboardClass::of_name(&name),
                name,
                adjacency,
            })
            .collect();

        let graph_stats = build_graph_stats(&keyboards);

        Ok(Tables {
            frequency_lists,
            keyboards,
            graph_stats,
            l33t_table: &L33T_TABLE,
            sequences: &SEQUENCES,
            char_classes: &CHAR_CLASSES,
        })
    }

    /// stats for a keyboard class; total for every class with a loaded layout
    pub fn stats_for(&self, class: KeyboardClass) -> &GraphStats {
        self.graph_stats
            .iter()
            .find(|s| s.class == class)
            .unwrap_or(&FALLBACK_STATS)
    }

    /// sum the cardinalities of the character classes present in the password
    pub fn bruteforce_cardinality(&self, password: &[u8]) -> u64 {
        let mut present = [false; CHAR_CLASSES.len()];
        for &b in password {
            for (idx, &(min, max, _)) in self.char_classes.iter().enumerate() {
                if min <= b && b <= max {
                    present[idx] = true;
                    break;
                }
            }
        }
        let mut total = 0u64;
        for (idx, &(_, _, card)) in self.char_classes.iter().enumerate() {
            if present[idx] {
                total += card;
            }
        }
        total
    }
}

/// classwise running averages over each layout's degree and key count.
/// degree of a layout = mean over keys of the summed slot-string lengths.
fn build_graph_stats(keyboards: &[Keyboard]) -> Vec<GraphStats> {
    let mut stats: Vec<GraphStats> = Vec::new();
    for kb in keyboards {
        let keys = kb.adjacency.len() as f64;
        let degree = kb
            .adjacency
            .values()
            .map(|slots| slots.iter().map(|s| s.len() as f64).sum::<f64>())
            .sum::<f64>()
            / keys;

        match stats.iter_mut().find(|s| s.class == kb.class) {
            Some(entry) => {
                let n = entry.members.len() as f64;
                entry.members.push(kb.name.clone());
                entry.average_degree = (entry.average_degree * n + degree) / (n + 1.0);
                entry.starting_positions = (entry.starting_positions * n + keys) / (n + 1.0);
            }
            None => stats.push(GraphStats {
                class: kb.class,
                members: vec![kb.name.clone()],
                average_degree: degree,
                starting_positions: keys,
            }),
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Tables {
        Tables::load().unwrap()
    }

    #[test]
    fn keyboard_classes() {
        assert_eq!(KeyboardClass::of_name("qwerty"), KeyboardClass::Alpha);
        assert_eq!(KeyboardClass::of_name("dvorak"), KeyboardClass::Alpha);
        assert_eq!(KeyboardClass::of_name("keypad"), KeyboardClass::Keypad);
        assert_eq!(KeyboardClass::of_name("mac_keypad"), KeyboardClass::Keypad);
    }

    #[test]
    fn stats_cover_both_classes() {
        let t = tables();
        let alpha = t.stats_for(KeyboardClass::Alpha);
        assert_eq!(alpha.members.len(), 2);
        assert!(alpha.average_degree > 1.0);
        assert!(alpha.starting_positions > 90.0);
        let keypad = t.stats_for(KeyboardClass::Keypad);
        assert_eq!(keypad.members.len(), 2);
        assert!(keypad.starting_positions < 20.0);
    }

    #[test]
    fn cardinality_single_classes() {
        let t = tables();
        assert_eq!(t.bruteforce_cardinality(b"1990"), 10);
        assert_eq!(t.bruteforce_cardinality(b"abc"), 26);
        assert_eq!(t.bruteforce_cardinality(b"ABC"), 26);
        assert_eq!(t.bruteforce_cardinality(b"!@#"), 33);
    }

    #[test]
    fn cardinality_combined_classes() {
        let t = tables();
        assert_eq!(t.bruteforce_cardinality(b"a1"), 36);
        assert_eq!(t.bruteforce_cardinality(b"Aa1!"), 95);
        assert_eq!(t.bruteforce_cardinality(&[b'a', 0xff]), 126);
    }

    #[test]
    fn cardinality_empty() {
        let t = tables();
        assert_eq!(t.bruteforce_cardinality(b""), 0);
    }

    #[test]
    fn l33t_table_shape() {
        let t = tables();
        assert_eq!(t.l33t_table.len(), 12);
        let (orig, leets) = t.l33t_table[0];
        assert_eq!(orig, b'a');
        assert_eq!(leets, b"4@");
    }

    #[test]
    fn sequences_shape() {
        let t = tables();
        assert_eq!(t.sequences.len(), 3);
        assert_eq!(t.sequences[0].0, "lower");
        assert_eq!(t.sequences[0].1.len(), 26);
        assert_eq!(t.sequences[2].1, b"0123456789");
    }
}
