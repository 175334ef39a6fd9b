//! Script transliteration tables.
//!
//! Tables map lowercase source letters to target graphemes. Uppercase input
//! is handled by case mapping, so tables never list capitals.

/// A one-directional character-to-grapheme table.
#[derive(Debug, Clone, Copy)]
pub struct ScriptTable {
    pub name: &'static str,
    pub letters: &'static [(char, &'static str)],
}

/// Serbian Cyrillic to Gaj's Latin alphabet.
pub const SERBIAN_CYRILLIC_TO_LATIN: ScriptTable = ScriptTable {
    name: "sr-Cyrl→sr-Latn",
    letters: &[
        ('а', "a"),
        ('б', "b"),
        ('в', "v"),
        ('г', "g"),
        ('д', "d"),
        ('ђ', "đ"),
        ('е', "e"),
        ('ж', "ž"),
        ('з', "z"),
        ('и', "i"),
        ('ј', "j"),
        ('к', "k"),
        ('л', "l"),
        ('љ', "lj"),
        ('м', "m"),
        ('н', "n"),
        ('њ', "nj"),
        ('о', "o"),
        ('п', "p"),
        ('р', "r"),
        ('с', "s"),
        ('т', "t"),
        ('ћ', "ć"),
        ('у', "u"),
        ('ф', "f"),
        ('х', "h"),
        ('ц', "c"),
        ('ч', "č"),
        ('џ', "dž"),
        ('ш', "š"),
    ],
};

impl ScriptTable {
    fn lookup(&self, c: char) -> Option<&'static str> {
        self.letters
            .iter()
            .find(|(source, _)| *source == c)
            .map(|(_, target)| *target)
    }

    /// Transliterate `text`, leaving characters outside the table untouched.
    ///
    /// A capital that maps to a digraph keeps its first letter uppercase; the
    /// second letter is uppercased only when the next source letter is also
    /// uppercase, so `Љубав` gives `Ljubav` and `ЉУБАВ` gives `LJUBAV`.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_uppercase() {
                let lower = c.to_lowercase().next().unwrap_or(c);
                match self.lookup(lower) {
                    Some(target) => {
                        let shout = chars.peek().is_some_and(|next| next.is_uppercase());
                        let mut graphemes = target.chars();
                        if let Some(first) = graphemes.next() {
                            out.extend(first.to_uppercase());
                        }
                        for rest in graphemes {
                            if shout {
                                out.extend(rest.to_uppercase());
                            } else {
                                out.push(rest);
                            }
                        }
                    }
                    None => out.push(c),
                }
            } else {
                match self.lookup(c) {
                    Some(target) => out.push_str(target),
                    None => out.push(c),
                }
            }
        }

        out
    }
}

/// Transliterate Serbian Cyrillic text to Latin.
pub fn transliterate(text: &str) -> String {
    SERBIAN_CYRILLIC_TO_LATIN.apply(text)
}
