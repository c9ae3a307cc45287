// keyboard adjacency walks

use crate::data::tables::{Keyboard, Tables};

use super::{Match, MatchKind};

/// walk the password over every loaded keyboard layout
pub fn spatial_match(password: &[u8], tables: &Tables) -> Vec<Match> {
    let mut results = Vec::new();
    for keyboard in &tables.keyboards {
        spatial_match_helper(password, keyboard, &mut results);
    }
    results
}

/// greedy left-to-right walk: a chain grows while the next byte sits in a
/// neighbor slot of the previous one. slot index is the direction; changing
/// direction counts a turn, and the first step always does.
fn spatial_match_helper(password: &[u8], keyboard: &Keyboard, out: &mut Vec<Match>) {
    if password.len() < 3 {
        return;
    }
    let mut i = 0;
    while i < password.len() - 1 {
        let mut j = i + 1;
        let mut last_direction: i32 = -1;
        let mut turns: u64 = 0;
        let mut shifted_count: u64 = 0;
        loop {
            let prev = password[j - 1];
            let mut found_direction: i32 = -1;
            if j < password.len() {
                let cur = password[j];
                if let Some(slots) = keyboard.adjacency.get(&prev) {
                    for (slot_idx, slot) in slots.iter().enumerate() {
                        if let Some(pos) = slot.iter().position(|&c| c == cur) {
                            found_direction = slot_idx as i32;
                            if pos == 1 {
                                shifted_count += 1;
                            }
                            break;
                        }
                    }
                }
            }
            if found_direction >= 0 {
                if found_direction != last_direction {
                    turns += 1;
                    last_direction = found_direction;
                }
                j += 1;
            } else {
                // chains of length <= 2 are noise
                if j - i > 2 {
                    out.push(Match::new(
                        MatchKind::Spatial {
                            graph_name: keyboard.name.clone(),
                            turns,
                            shifted_count,
                        },
                        i,
                        j - 1,
                        password,
                    ));
                }
                i = j;
                break;
            }
        }
    }
}
