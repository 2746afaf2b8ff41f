//! Built-in word lists and pattern banks
//!
//! These are the defaults the built-in rubrics are constructed from; a
//! rubric document may override every list. All matching elsewhere is
//! case-insensitive substring containment against the lowercased
//! transcript unless a function documents otherwise.

/// Must-have introduction keywords (4 points each, capped at 20)
pub const MUST_HAVE_KEYWORDS: &[&str] = &[
    "name",
    "age",
    "class",
    "school",
    "family",
    "hobbies",
    "interests",
    "like",
    "play",
];

pub const MUST_HAVE_SCORE_EACH: f64 = 4.0;
pub const MUST_HAVE_CAP: f64 = 20.0;

/// Good-to-have introduction keywords (2 points each, capped at 10)
pub const GOOD_TO_HAVE_KEYWORDS: &[&str] = &[
    "about family",
    "from",
    "ambition",
    "goal",
    "dream",
    "fun fact",
    "interesting",
    "unique",
    "strength",
    "achievement",
];

pub const GOOD_TO_HAVE_SCORE_EACH: f64 = 2.0;
pub const GOOD_TO_HAVE_CAP: f64 = 10.0;

/// Filler words, matched as substrings of whitespace-split words
pub const FILLER_WORDS: &[&str] = &["um", "uh", "like", "so", "actually", "basically", "literally"];

/// Politeness markers
pub const POLITE_MARKERS: &[&str] = &[
    "please",
    "thank",
    "thanks",
    "excuse me",
    "sorry",
    "pardon",
    "good morning",
    "good afternoon",
    "good evening",
    "hello",
    "respect",
    "appreciate",
    "grateful",
    "pleasure",
];

/// Professional register markers
pub const PROFESSIONAL_MARKERS: &[&str] = &[
    "professional",
    "experienced",
    "skilled",
    "qualified",
    "expertise",
    "background",
    "education",
    "certified",
    "trained",
    "specialized",
    "achieved",
    "accomplished",
    "successfully",
    "managed",
    "led",
];

/// Informal register markers
pub const INFORMAL_MARKERS: &[&str] = &[
    "guys", "dude", "bro", "sis", "awesome", "cool", "totally", "like", "you know", "stuff",
    "things", "kinda", "sorta",
];

/// Positive sentiment words, matched against alphabetic tokens
pub const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "love",
    "enjoy",
    "fun",
    "favorite",
    "interesting",
    "excited",
    "passionate",
    "proud",
    "grateful",
    "kind",
    "special",
    "thank",
    "thanks",
    "improve",
    "best",
    "delighted",
    "pleasure",
    "awesome",
];

/// Negative sentiment words, matched against alphabetic tokens
pub const NEGATIVE_WORDS: &[&str] = &[
    "bad", "sad", "hate", "angry", "terrible", "awful", "horrible", "worst", "stole", "steal",
    "afraid", "scared", "fail", "failure", "wrong", "poor",
];

/// Keywords that boost a sentence's weight in the extractive summary
pub const SUMMARY_KEYWORDS: &[&str] = &["name", "goal", "experience", "skill", "achievement", "unique"];

/// Core-message keywords a complete introduction must cover
pub const CORE_MESSAGE_KEYWORDS: &[&str] =
    &["name", "age", "goal", "experience", "skill", "family", "interests"];

/// Apostrophe-dropped contraction tokens flagged by the grammar detector
///
/// Tokens that are also real English words (e.g. "its", "were", "well")
/// are deliberately excluded.
pub const DROPPED_APOSTROPHE_TOKENS: &[&str] = &[
    "im", "ive", "ill", "dont", "cant", "wont", "isnt", "arent", "wasnt", "werent", "didnt",
    "doesnt", "couldnt", "wouldnt", "shouldnt", "youre", "theyre", "hes", "shes",
];
