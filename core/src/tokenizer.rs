use std::collections::HashSet;

/// Split text into words on the ASCII space character.
///
/// Only `' '` separates words: tabs and newlines stay inside the token they
/// appear in. Runs of spaces never produce empty words.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Words excluded from both indexing and querying.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    /// Tokenize `text` and add every word to the set. Never removes words.
    pub fn configure(&mut self, text: &str) {
        for word in split_into_words(text) {
            self.words.insert(word.to_string());
        }
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    /// Drop every token that is a stop word, preserving order.
    pub fn filter<'a, I>(&self, tokens: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tokens.into_iter().filter(|w| !self.contains(w)).collect()
    }

    pub fn split_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.filter(split_into_words(text))
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut stop_words = StopWords::new();
        for text in iter {
            stop_words.configure(text.as_ref());
        }
        stop_words
    }
}
