use std::fs::File;
use std::io::Write;

/// Truncate `path` and write the word stream, high byte first, no header.
pub fn to_file(path: &str, words: &[u16]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(&to_bytes(words))
}

/// Flat big-endian byte image of the word stream.
pub fn to_bytes(words: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(words.len() * 2);
    for word in words {
        bytes.extend_from_slice(&word.to_be_bytes());
    }
    bytes
}

/// Counts header plus a 16-words-per-line uppercase hex listing.
pub fn hex_dump(words: &[u16], instructions: usize, labels: usize) -> String {
    let mut out =
        format!("{} instructions [{} words, {} labels]", instructions, words.len(), labels);
    for (i, word) in words.iter().enumerate() {
        if i % 16 == 0 {
            out.push_str(&format!("\n0x{i:04X} | "));
        }
        out.push_str(&format!("{word:04X} "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_big_endian() {
        assert_eq!(to_bytes(&[0x9401, 0x0020]), vec![0x94, 0x01, 0x00, 0x20]);
    }

    #[test]
    fn dump_wraps_every_sixteen_words() {
        let words: Vec<u16> = (0..18).collect();
        let dump = hex_dump(&words, 1, 0);
        assert!(dump.starts_with("1 instructions [18 words, 0 labels]"));
        assert!(dump.contains("\n0x0000 | "));
        assert!(dump.contains("\n0x0010 | "));
    }
}
