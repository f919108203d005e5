use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A word symbol table loaded from a Kaldi-style `words.txt`.
///
/// The on-disk format is one `word id` pair per line. Epsilon, sentence
/// boundary, and disambiguation symbols are retained for lookup but excluded
/// from the spoken vocabulary used to label decoded words.
#[derive(Debug, Clone)]
pub struct WordSymbolTable {
    entries: Vec<(String, u32)>,
    spoken: Vec<usize>,
}

impl WordSymbolTable {
    /// Load and parse a symbol table, failing with [`Error::ResourceLoad`] on
    /// unreadable files, malformed lines, or an empty spoken vocabulary.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|err| Error::resource_load(path, format!("unreadable: {err}")))?;

        let mut entries = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let word = fields.next();
            let id = fields.next().and_then(|raw| raw.parse::<u32>().ok());
            match (word, id, fields.next()) {
                (Some(word), Some(id), None) => entries.push((word.to_owned(), id)),
                _ => {
                    return Err(Error::resource_load(
                        path,
                        format!("malformed symbol table entry on line {}", line_no + 1),
                    ));
                }
            }
        }

        let spoken: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, (word, _))| !is_special_symbol(word))
            .map(|(index, _)| index)
            .collect();

        if spoken.is_empty() {
            return Err(Error::resource_load(
                path,
                "symbol table contains no spoken words",
            ));
        }

        Ok(Self { entries, spoken })
    }

    /// Look up a word by its symbol id.
    pub fn word(&self, id: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, entry_id)| *entry_id == id)
            .map(|(word, _)| word.as_str())
    }

    /// Total number of symbols, special symbols included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of spoken (non-special) words.
    pub fn spoken_len(&self) -> usize {
        self.spoken.len()
    }

    /// The spoken word at `index % spoken_len()`.
    ///
    /// The decoding engine maps acoustic evidence onto the spoken vocabulary
    /// through this accessor, so label selection is total over any index.
    pub(crate) fn spoken_word(&self, index: usize) -> &str {
        let entry = self.spoken[index % self.spoken.len()];
        self.entries[entry].0.as_str()
    }
}

/// Symbols that can never be emitted as decoded words: epsilon, sentence
/// boundaries, silence markers, and `#N` disambiguation symbols.
fn is_special_symbol(word: &str) -> bool {
    matches!(word, "<eps>" | "<s>" | "</s>" | "<unk>" | "<UNK>" | "!SIL" | "SIL" | "<sil>")
        || word.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_table(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_words_and_skips_specials() {
        let file = write_table("<eps> 0\nhello 1\nworld 2\n#0 3\n</s> 4\n");
        let table = WordSymbolTable::from_file(file.path()).unwrap();

        assert_eq!(table.len(), 5);
        assert_eq!(table.spoken_len(), 2);
        assert_eq!(table.word(1), Some("hello"));
        assert_eq!(table.word(2), Some("world"));
        assert_eq!(table.spoken_word(0), "hello");
        assert_eq!(table.spoken_word(1), "world");
        assert_eq!(table.spoken_word(2), "hello");
    }

    #[test]
    fn rejects_malformed_lines() {
        let file = write_table("hello 1\nbroken\n");
        let err = WordSymbolTable::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ResourceLoad { .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_tables_with_no_spoken_words() {
        let file = write_table("<eps> 0\n#0 1\n");
        assert!(matches!(
            WordSymbolTable::from_file(file.path()),
            Err(Error::ResourceLoad { .. })
        ));
    }

    #[test]
    fn rejects_missing_files() {
        assert!(matches!(
            WordSymbolTable::from_file("/nonexistent/words.txt"),
            Err(Error::ResourceLoad { .. })
        ));
    }
}
