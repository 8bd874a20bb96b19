//! # Porter Stemmer
//!
//! The original Porter (1980) suffix-stripping algorithm, steps 1a through
//! 5b. Operates on lowercase input; characters outside `a-z` are treated
//! as consonants, so accented words pass through mostly unchanged.
//!
//! Within each step only the longest matching suffix is considered. If its
//! condition fails, no shorter suffix is tried.

/// Stem a single lowercase word. Words of two characters or fewer are
/// returned unchanged.
pub fn stem(word: &str) -> String {
    if word.chars().count() <= 2 {
        return word.to_string();
    }

    let mut stemmer = Stemmer {
        b: word.chars().collect(),
    };
    stemmer.step1a();
    stemmer.step1b();
    stemmer.step1c();
    stemmer.step2();
    stemmer.step3();
    stemmer.step4();
    stemmer.step5a();
    stemmer.step5b();
    stemmer.b.into_iter().collect()
}

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// Longer suffixes precede the shorter suffixes they contain.
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

struct Stemmer {
    b: Vec<char>,
}

impl Stemmer {
    fn len(&self) -> usize {
        self.b.len()
    }

    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// The measure `m` of `b[..len]`, i.e. the number of VC sequences in
    /// `[C](VC){m}[V]`.
    fn measure(&self, len: usize) -> usize {
        let mut m = 0;
        let mut i = 0;
        while i < len && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < len && !self.is_consonant(i) {
                i += 1;
            }
            if i >= len {
                return m;
            }
            while i < len && self.is_consonant(i) {
                i += 1;
            }
            m += 1;
            if i >= len {
                return m;
            }
        }
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.is_consonant(i))
    }

    fn ends_double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.is_consonant(len - 1)
    }

    /// `*o`: `b[..len]` ends consonant-vowel-consonant, the last not w, x or y.
    fn ends_cvc(&self, len: usize) -> bool {
        len >= 3
            && self.is_consonant(len - 3)
            && !self.is_consonant(len - 2)
            && self.is_consonant(len - 1)
            && !matches!(self.b[len - 1], 'w' | 'x' | 'y')
    }

    fn ends_with(&self, suffix: &str) -> bool {
        let n = suffix.chars().count();
        n <= self.len() && self.b[self.len() - n..].iter().copied().eq(suffix.chars())
    }

    /// Length of the word once `suffix` is removed.
    fn stem_len(&self, suffix: &str) -> usize {
        self.len() - suffix.chars().count()
    }

    fn replace_tail(&mut self, stem_len: usize, replacement: &str) {
        self.b.truncate(stem_len);
        self.b.extend(replacement.chars());
    }

    /// Apply the first rule whose suffix matches, if the remaining stem has
    /// measure above `min_measure`.
    fn apply_rules(&mut self, rules: &[(&str, &str)], min_measure: usize) {
        if let Some((suffix, replacement)) = rules.iter().find(|(s, _)| self.ends_with(s)) {
            let stem_len = self.stem_len(suffix);
            if self.measure(stem_len) > min_measure {
                self.replace_tail(stem_len, replacement);
            }
        }
    }

    fn step1a(&mut self) {
        if self.ends_with("sses") {
            let l = self.stem_len("sses");
            self.replace_tail(l, "ss");
        } else if self.ends_with("ies") {
            let l = self.stem_len("ies");
            self.replace_tail(l, "i");
        } else if self.ends_with("ss") {
            // unchanged
        } else if self.ends_with("s") {
            self.b.pop();
        }
    }

    fn step1b(&mut self) {
        if self.ends_with("eed") {
            if self.measure(self.stem_len("eed")) > 0 {
                self.b.pop();
            }
            return;
        }

        let Some(suffix) = ["ed", "ing"].into_iter().find(|s| self.ends_with(s)) else {
            return;
        };
        let stem_len = self.stem_len(suffix);
        if !self.has_vowel(stem_len) {
            return;
        }
        self.b.truncate(stem_len);

        if self.ends_with("at") || self.ends_with("bl") || self.ends_with("iz") {
            self.b.push('e');
        } else if self.ends_double_consonant(self.len())
            && !matches!(self.b[self.len() - 1], 'l' | 's' | 'z')
        {
            self.b.pop();
        } else if self.measure(self.len()) == 1 && self.ends_cvc(self.len()) {
            self.b.push('e');
        }
    }

    fn step1c(&mut self) {
        if self.ends_with("y") && self.has_vowel(self.len() - 1) {
            let last = self.len() - 1;
            self.b[last] = 'i';
        }
    }

    fn step2(&mut self) {
        self.apply_rules(STEP2_RULES, 0);
    }

    fn step3(&mut self) {
        self.apply_rules(STEP3_RULES, 0);
    }

    fn step4(&mut self) {
        let Some(suffix) = STEP4_SUFFIXES.iter().find(|s| self.ends_with(s)) else {
            return;
        };
        let stem_len = self.stem_len(suffix);
        if self.measure(stem_len) <= 1 {
            return;
        }
        if *suffix == "ion" && !(stem_len > 0 && matches!(self.b[stem_len - 1], 's' | 't')) {
            return;
        }
        self.b.truncate(stem_len);
    }

    fn step5a(&mut self) {
        if !self.ends_with("e") {
            return;
        }
        let stem_len = self.len() - 1;
        let m = self.measure(stem_len);
        if m > 1 || (m == 1 && !self.ends_cvc(stem_len)) {
            self.b.truncate(stem_len);
        }
    }

    fn step5b(&mut self) {
        let len = self.len();
        if self.measure(len) > 1 && self.ends_double_consonant(len) && self.b[len - 1] == 'l' {
            self.b.pop();
        }
    }
}
