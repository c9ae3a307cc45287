// embedded table data: gzip blobs in a delimited byte format
//
// shared delimiter alphabet (all payload bytes are > 0x03):
//   0x00 file end, 0x01 group end, 0x02 field separator, 0x03 neighbor separator

pub mod tables;

pub use tables::{GraphStats, Keyboard, KeyboardClass, Tables};

use std::collections::HashMap;
use std::io::Read;

use flate2::read::GzDecoder;
use memchr::memchr;

const FREQUENCY_LISTS: &[u8] = include_bytes!("../../data/frequency_lists.bin");
const ADJACENCY_GRAPHS: &[u8] = include_bytes!("../../data/adjacency_graphs.bin");

const FILE_END: u8 = 0x00;
const GROUP_END: u8 = 0x01;
const SEP: u8 = 0x02;
const NEIGH_SEP: u8 = 0x03;

/// read the little-endian 32-bit uncompressed size from the blob trailer
fn decompressed_size(blob: &[u8]) -> Result<usize, String> {
    if blob.len() < 4 {
        return Err("embedded blob too short for size trailer".to_string());
    }
    let t = &blob[blob.len() - 4..];
    Ok(u32::from_le_bytes([t[0], t[1], t[2], t[3]]) as usize)
}

/// decompress an embedded gzip blob, using the size trailer as capacity hint
fn decompress(blob: &[u8], what: &str) -> Result<Vec<u8>, String> {
    let size = decompressed_size(blob)?;
    let mut raw = Vec::with_capacity(size);
    GzDecoder::new(blob)
        .read_to_end(&mut raw)
        .map_err(|e| format!("failed to decompress {}: {}", what, e))?;
    if raw.len() != size {
        return Err(format!(
            "{}: size trailer says {} bytes, decompressed {}",
            what,
            size,
            raw.len()
        ));
    }
    Ok(raw)
}

/// byte cursor over a decompressed delimited stream
struct Cursor<'a> {
    raw: &'a [u8],
    pos: usize,
    what: &'static str,
}

impl<'a> Cursor<'a> {
    fn new(raw: &'a [u8], what: &'static str) -> Self {
        Cursor { raw, pos: 0, what }
    }

    fn peek(&self) -> Result<u8, String> {
        self.raw
            .get(self.pos)
            .copied()
            .ok_or_else(|| format!("{}: truncated stream at byte {}", self.what, self.pos))
    }

    fn bump(&mut self) -> Result<u8, String> {
        let b = self.peek()?;
        self.pos += 1;
        Ok(b)
    }

    /// consume up to (and including) the next `delim`, returning the field bytes
    fn take_until(&mut self, delim: u8) -> Result<&'a [u8], String> {
        match memchr(delim, &self.raw[self.pos..]) {
            Some(off) => {
                let field = &self.raw[self.pos..self.pos + off];
                self.pos += off + 1;
                Ok(field)
            }
            None => Err(format!(
                "{}: missing 0x{:02x} delimiter after byte {}",
                self.what, delim, self.pos
            )),
        }
    }
}

fn field_to_string(field: &[u8], what: &str) -> Result<String, String> {
    String::from_utf8(field.to_vec()).map_err(|_| format!("{}: non-UTF8 field", what))
}

/// parse the frequency-list stream: `(name 0x02 (word 0x02)* 0x01)* 0x00`.
/// words keep their source order; rank is position + 1.
fn parse_frequency_lists(raw: &[u8]) -> Result<Vec<(String, Vec<String>)>, String> {
    let what = "frequency lists";
    let mut cur = Cursor::new(raw, what);
    let mut lists = Vec::new();
    while cur.peek()? != FILE_END {
        let name = field_to_string(cur.take_until(SEP)?, what)?;
        let mut words = Vec::new();
        while cur.peek()? != GROUP_END {
            words.push(field_to_string(cur.take_until(SEP)?, what)?);
        }
        cur.bump()?;
        lists.push((name, words));
    }
    Ok(lists)
}

/// parse the adjacency-graph stream:
/// `(name 0x02 (key 0x02 (neighbor 0x03)* 0x02)* 0x01)* 0x00`.
/// empty neighbor strings are placeholders for missing keys and are kept so
/// that the slot index of each physical direction is stable.
fn parse_adjacency_graphs(raw: &[u8]) -> Result<Vec<(String, HashMap<u8, Vec<Vec<u8>>>)>, String> {
    let what = "adjacency graphs";
    let mut cur = Cursor::new(raw, what);
    let mut graphs = Vec::new();
    while cur.peek()? != FILE_END {
        let name = field_to_string(cur.take_until(SEP)?, what)?;
        let mut adjacency = HashMap::new();
        while cur.peek()? != GROUP_END {
            let key = cur.bump()?;
            if cur.bump()? != SEP {
                return Err(format!("{}: key byte not followed by separator", what));
            }
            let mut slots = Vec::new();
            while cur.peek()? != SEP {
                slots.push(cur.take_until(NEIGH_SEP)?.to_vec());
            }
            cur.bump()?;
            adjacency.insert(key, slots);
        }
        cur.bump()?;
        graphs.push((name, adjacency));
    }
    Ok(graphs)
}

/// decompress and parse the embedded frequency lists
pub fn load_frequency_lists() -> Result<Vec<(String, Vec<String>)>, String> {
    let raw = decompress(FREQUENCY_LISTS, "frequency lists")?;
    parse_frequency_lists(&raw)
}

/// decompress and parse the embedded keyboard adjacency graphs
pub fn load_adjacency_graphs() -> Result<Vec<(String, HashMap<u8, Vec<Vec<u8>>>)>, String> {
    let raw = decompress(ADJACENCY_GRAPHS, "adjacency graphs")?;
    parse_adjacency_graphs(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_trailer_matches() {
        let size = decompressed_size(FREQUENCY_LISTS).unwrap();
        let raw = decompress(FREQUENCY_LISTS, "frequency lists").unwrap();
        assert_eq!(raw.len(), size);
    }

    #[test]
    fn trailer_too_short() {
        assert!(decompressed_size(&[0x1f, 0x8b]).is_err());
    }

    #[test]
    fn garbage_blob_rejected() {
        let blob = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x00, 0x00, 0x10];
        assert!(decompress(&blob, "garbage").is_err());
    }

    #[test]
    fn frequency_lists_load() {
        let lists = load_frequency_lists().unwrap();
        let names: Vec<&str> = lists.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["passwords", "english", "male_names", "female_names", "surnames"]
        );
        for (name, words) in &lists {
            assert!(!words.is_empty(), "empty list {}", name);
        }
    }

    #[test]
    fn password_is_ranked_near_top() {
        let lists = load_frequency_lists().unwrap();
        let (_, words) = &lists[0];
        let rank = words.iter().position(|w| w == "password").unwrap() + 1;
        assert!(rank <= 5, "rank {}", rank);
    }

    #[test]
    fn adjacency_graphs_load() {
        let graphs = load_adjacency_graphs().unwrap();
        let names: Vec<&str> = graphs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["dvorak", "keypad", "mac_keypad", "qwerty"]);
    }

    #[test]
    fn qwerty_slots_are_positionally_stable() {
        let graphs = load_adjacency_graphs().unwrap();
        let (_, qwerty) = graphs.iter().find(|(n, _)| n == "qwerty").unwrap();
        // 'a' has no left or down-left neighbor; placeholders preserved
        let slots = &qwerty[&b'a'];
        assert_eq!(slots.len(), 6);
        assert!(slots[0].is_empty());
        assert_eq!(slots[1], b"qQ");
        assert_eq!(slots[3], b"sS");
        assert!(slots[5].is_empty());
    }

    #[test]
    fn parse_rejects_truncated_stream() {
        // name with no terminating separator
        assert!(parse_frequency_lists(b"passwords").is_err());
        // missing file end
        assert!(parse_frequency_lists(b"passwords\x02word\x02\x01").is_err());
    }

    #[test]
    fn parse_minimal_frequency_stream() {
        let lists = parse_frequency_lists(b"tiny\x02one\x02two\x02\x01\x00").unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].0, "tiny");
        assert_eq!(lists[0].1, ["one", "two"]);
    }

    #[test]
    fn parse_minimal_graph_stream() {
        let graphs = parse_adjacency_graphs(b"g\x02a\x02bB\x03\x03\x02\x01\x00").unwrap();
        assert_eq!(graphs.len(), 1);
        let (name, adjacency) = &graphs[0];
        assert_eq!(name, "g");
        let slots = &adjacency[&b'a'];
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0], b"bB");
        assert!(slots[1].is_empty());
    }
}
