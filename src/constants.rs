//! Fixed thresholds, denylists and phrase sets
//!
//! Every tunable the extractors depend on lives here. The values are part
//! of the trained-model contract: changing one without refitting the
//! bundle changes what the ensemble sees.

// ============================================================================
// URL HEURISTIC THRESHOLDS
// ============================================================================

/// URLs at or above this length are flagged as suspiciously long.
pub const LONG_URL_THRESHOLD: usize = 54;

/// Redirect chains longer than this many hops set the redirect flag.
pub const REDIRECT_HOP_LIMIT: usize = 3;

/// End-to-end fetch time above this sets the slow-response flag.
pub const SLOW_RESPONSE_SECS: f64 = 3.0;

/// Hard timeout for the live probes (redirect chain, slow response, fetch).
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// How long the browser probe waits for a native dialog.
pub const POPUP_WAIT_SECS: u64 = 5;

/// Domains expiring within this many months count as "expiring soon".
pub const EXPIRY_SOON_MONTHS: i64 = 6;

// ============================================================================
// URL SHORTENER DENYLIST
// ============================================================================

/// Known URL shortening services, as a single regex alternation.
pub const SHORTENER_PATTERN: &str = concat!(
    r"bit\.ly|goo\.gl|shorte\.st|go2l\.ink|x\.co|ow\.ly|t\.co|tinyurl|tr\.im|is\.gd|cli\.gs|",
    r"yfrog\.com|migre\.me|ff\.im|tiny\.cc|url4\.eu|twit\.ac|su\.pr|twurl\.nl|snipurl\.com|",
    r"short\.to|BudURL\.com|ping\.fm|post\.ly|Just\.as|bkite\.com|snipr\.com|fic\.kr|loopt\.us|",
    r"doiop\.com|short\.ie|kl\.am|wp\.me|rubyurl\.com|om\.ly|to\.ly|bit\.do|t\.co|lnkd\.in|db\.tt|",
    r"qr\.ae|adf\.ly|goo\.gl|bitly\.com|cur\.lv|tinyurl\.com|ow\.ly|bit\.ly|ity\.im|q\.gs|is\.gd|",
    r"po\.st|bc\.vc|twitthis\.com|u\.to|j\.mp|buzurl\.com|cutt\.us|u\.bb|yourls\.org|x\.co|",
    r"prettylinkpro\.com|scrnch\.me|filoops\.info|vzturl\.com|qr\.net|1url\.com|tweez\.me|v\.gd|",
    r"tr\.im|link\.zip\.net",
);

// ============================================================================
// EMAIL CONTENT SETS
// ============================================================================

/// Minimum number of 3+ punctuation runs before the excessive flag trips.
pub const PUNCTUATION_THRESHOLD: usize = 3;

/// Case-insensitive urgency bait phrases.
pub const URGENCY_PHRASES: &[&str] = &["urgent", "act now", "limited time"];

/// Known bait misspellings seen in spam corpora.
pub const MISSPELLED_WORDS: &[&str] = &[
    "amzon", "barbee", "lerning", "shooping", "deels", "seal", "indla", "saeson",
];

/// Known spam-bait keywords.
pub const SPAM_KEYWORDS: &[&str] = &[
    "urgent", "free", "discount", "offer", "guaranteed", "sales", "prizes", "cashback", "scheme",
];

/// Attachment extensions that mark an email as carrying a suspicious payload.
pub const SUSPICIOUS_EXTENSIONS: &[&str] = &["jar", "lnk", "ps1", "exe", "rar"];

// ============================================================================
// TEXT NORMALIZATION
// ============================================================================

/// English stop words removed by the normalization pipeline.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "you", "your", "yours", "yourself", "yourselves",
];
