use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

use crate::config::{EngineConfig, StopWords};

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref ENGLISH: HashSet<&'static str> = ENGLISH_STOP_WORDS.iter().copied().collect();
}

/// English stop words, the list conventionally used for English TF-IDF.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a","about","above","across","after","afterwards","again","against","all","almost","alone","along","already","also",
    "although","always","am","among","amongst","amoungst","amount","an","and","another","any","anyhow","anyone","anything",
    "anyway","anywhere","are","around","as","at",
    "back","be","became","because","become","becomes","becoming","been","before","beforehand","behind","being","below",
    "beside","besides","between","beyond","bill","both","bottom","but","by",
    "call","can","cannot","cant","co","con","could","couldnt","cry",
    "de","describe","detail","do","done","down","due","during",
    "each","eg","eight","either","eleven","else","elsewhere","empty","enough","etc","even","ever","every","everyone",
    "everything","everywhere","except",
    "few","fifteen","fifty","fill","find","fire","first","five","for","former","formerly","forty","found","four","from",
    "front","full","further",
    "get","give","go",
    "had","has","hasnt","have","he","hence","her","here","hereafter","hereby","herein","hereupon","hers","herself","him",
    "himself","his","how","however","hundred",
    "i","ie","if","in","inc","indeed","interest","into","is","it","its","itself",
    "keep",
    "last","latter","latterly","least","less","ltd",
    "made","many","may","me","meanwhile","might","mill","mine","more","moreover","most","mostly","move","much","must","my",
    "myself",
    "name","namely","neither","never","nevertheless","next","nine","no","nobody","none","noone","nor","not","nothing","now",
    "nowhere",
    "of","off","often","on","once","one","only","onto","or","other","others","otherwise","our","ours","ourselves","out",
    "over","own",
    "part","per","perhaps","please","put",
    "rather","re",
    "same","see","seem","seemed","seeming","seems","serious","several","she","should","show","side","since","sincere",
    "six","sixty","so","some","somehow","someone","something","sometime","sometimes","somewhere","still","such","system",
    "take","ten","than","that","the","their","them","themselves","then","thence","there","thereafter","thereby",
    "therefore","therein","thereupon","these","they","thick","thin","third","this","those","though","three","through",
    "throughout","thru","thus","to","together","too","top","toward","towards","twelve","twenty","two",
    "un","under","until","up","upon","us",
    "very","via",
    "was","we","well","were","what","whatever","when","whence","whenever","where","whereafter","whereas","whereby",
    "wherein","whereupon","wherever","whether","which","while","whither","who","whoever","whole","whom","whose","why",
    "will","with","within","without","would",
    "yet","you","your","yours","yourself","yourselves",
];

enum StopSet {
    English,
    Custom(HashSet<String>),
}

impl StopSet {
    fn contains(&self, token: &str) -> bool {
        match self {
            StopSet::English => ENGLISH.contains(token),
            StopSet::Custom(set) => set.contains(token),
        }
    }
}

/// Text to term splitter. Tokenization is total: any input, including empty or
/// punctuation-only text, yields a (possibly empty) list of terms.
pub struct Tokenizer {
    min_term_length: usize,
    stop_words: StopSet,
    normalize_unicode: bool,
    stem: bool,
}

impl Tokenizer {
    pub fn new(config: &EngineConfig) -> Self {
        let stop_words = match &config.stop_words {
            StopWords::English => StopSet::English,
            StopWords::None => StopSet::Custom(HashSet::new()),
            StopWords::Custom(words) => StopSet::Custom(words.iter().map(|w| w.to_lowercase()).collect()),
        };
        Self {
            min_term_length: config.min_term_length,
            stop_words,
            normalize_unicode: config.normalize_unicode,
            stem: config.stem,
        }
    }

    /// Lower-case, split on non-alphanumeric runs, drop short tokens and stop words, then optionally stem.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = if self.normalize_unicode {
            text.nfkc().collect::<String>().to_lowercase()
        } else {
            text.to_lowercase()
        };
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&lowered) {
            let token = mat.as_str();
            if token.chars().count() < self.min_term_length { continue; }
            if self.stop_words.contains(token) { continue; }
            if self.stem {
                tokens.push(STEMMER.stem(token).into_owned());
            } else {
                tokens.push(token.to_string());
            }
        }
        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self { Self::new(&EngineConfig::default()) }
}
