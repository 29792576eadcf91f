//! Rule tables
//!
//! A grammar is an explicit, ordered list of rules. At every cursor position the tokenizer
//! tries the rules in list order and the first one that matches wins, so the order is what
//! resolves ambiguity (a `$` sigil must be tried before generic punctuation, `->` before `-`).
//!
//! # Rule Order (metta grammar)
//!
//! 1. comment          - `;` to end of line, then `/* ... */`
//! 2. string           - single or double quoted, backslash escapes
//! 3. variable         - `$` sigil + identifier
//! 4. namespace-ref    - `&` sigil + identifier
//! 5. number           - integer or decimal, ends at a word boundary
//! 6. keyword          - closed list (default `Type!`), ends at an identifier boundary
//! 7. function-name    - bare symbol
//! 8. operator         - `->` first, then single characters
//! 9. bracket          - `( ) [ ] { }`
//! 10. punctuation     - `,` `;`
//!
//! Anything left over is handled by the tokenizer's one-character plain-text fallback.
//!
//! Patterns are matched against the text starting at the cursor and nothing before it. The
//! `regex` crate has no look-ahead, so a rule may name a capture group: the pattern then has
//! to match including its trailing context, but only the group becomes the token.

use crate::metta::token::Category;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Decides how many bytes at the start of `rest` belong to a token.
///
/// Implementations must return `None` rather than a zero length, and the returned length must
/// fall on a char boundary. The tokenizer discards answers that break either condition.
pub trait Matcher: Send + Sync {
    fn match_len(&self, rest: &str) -> Option<usize>;
}

/// Regex-backed matcher anchored at the cursor.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    group: usize,
}

impl Pattern {
    /// Compile `pattern`, anchoring it at the cursor. `group` selects the capture group that
    /// forms the token (0 = whole match).
    pub fn new(pattern: &str, group: usize) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})"))?;
        Ok(Pattern { regex, group })
    }
}

impl Matcher for Pattern {
    fn match_len(&self, rest: &str) -> Option<usize> {
        let len = if self.group == 0 {
            self.regex.find(rest)?.end()
        } else {
            let caps = self.regex.captures(rest)?;
            let group = caps.get(self.group)?;
            if group.start() != 0 {
                return None;
            }
            group.end()
        };
        (len > 0).then_some(len)
    }
}

/// One entry of a grammar: a matcher and the category it assigns.
#[derive(Clone)]
pub struct Rule {
    name: String,
    category: Category,
    matcher: Arc<dyn Matcher>,
}

impl Rule {
    pub fn new(name: impl Into<String>, category: Category, matcher: impl Matcher + 'static) -> Self {
        Rule {
            name: name.into(),
            category,
            matcher: Arc::new(matcher),
        }
    }

    /// Rule whose whole regex match is the token.
    pub fn pattern(
        name: impl Into<String>,
        category: Category,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Rule::new(name, category, Pattern::new(pattern, 0)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Length of the token this rule would produce at the start of `rest`.
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        self.matcher
            .match_len(rest)
            .filter(|&len| len > 0 && len <= rest.len() && rest.is_char_boundary(len))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Built-in grammar variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrammarKind {
    /// Code-block highlighter: block comments and symbol classification included.
    #[default]
    Metta,
    /// Lighter grammar of the interactive editor: no block comments, no symbol rule, `|` is an
    /// operator.
    Editor,
}

impl GrammarKind {
    pub fn name(&self) -> &'static str {
        match self {
            GrammarKind::Metta => "metta",
            GrammarKind::Editor => "editor",
        }
    }

    fn slots(&self) -> &'static [Slot] {
        match self {
            GrammarKind::Metta => METTA_SLOTS,
            GrammarKind::Editor => EDITOR_SLOTS,
        }
    }
}

impl fmt::Display for GrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrammarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metta" => Ok(GrammarKind::Metta),
            "editor" => Ok(GrammarKind::Editor),
            other => Err(format!(
                "Unknown grammar '{other}' (expected 'metta' or 'editor')"
            )),
        }
    }
}

/// Keywords recognised when none are configured.
pub const DEFAULT_KEYWORDS: &[&str] = &["Type!"];

/// Characters that continue an identifier; keywords must not be followed by one.
const IDENT_CONTINUE: &str = "A-Za-z0-9_-";

enum Slot {
    Rule {
        name: &'static str,
        category: Category,
        pattern: &'static str,
        group: usize,
    },
    Keywords,
}

const fn rule(name: &'static str, category: Category, pattern: &'static str) -> Slot {
    Slot::Rule {
        name,
        category,
        pattern,
        group: 0,
    }
}

const LINE_COMMENT: Slot = rule("comment", Category::Comment, r";[^\r\n]*");
const SINGLE_QUOTED: Slot = rule("string", Category::String, r#"'(?:[^'\\]|\\.)*'"#);
const DOUBLE_QUOTED: Slot = rule("string", Category::String, r#""(?:[^"\\]|\\.)*""#);
const VARIABLE: Slot = rule("variable", Category::Variable, r"\$[A-Za-z_][A-Za-z0-9_-]*");
const NAMESPACE: Slot = rule("namespace-ref", Category::NamespaceRef, r"&[A-Za-z_][A-Za-z0-9_-]*");
const NUMBER: Slot = Slot::Rule {
    name: "number",
    category: Category::Number,
    pattern: r"([0-9]+(?:\.[0-9]+)?)(?:[^A-Za-z0-9_]|$)",
    group: 1,
};
const BRACKET: Slot = rule("bracket", Category::Bracket, r"[\[\]{}()]");
const PUNCTUATION: Slot = rule("punctuation", Category::Punctuation, r"[;,]");

const METTA_SLOTS: &[Slot] = &[
    LINE_COMMENT,
    rule("comment", Category::Comment, r"/\*(?s:.)*?\*/"),
    SINGLE_QUOTED,
    DOUBLE_QUOTED,
    VARIABLE,
    NAMESPACE,
    NUMBER,
    Slot::Keywords,
    rule("function-name", Category::FunctionName, r"[A-Za-z][A-Za-z0-9_-]*"),
    rule("operator", Category::Operator, r"->|[:+*/=-]"),
    BRACKET,
    PUNCTUATION,
];

const EDITOR_SLOTS: &[Slot] = &[
    LINE_COMMENT,
    SINGLE_QUOTED,
    DOUBLE_QUOTED,
    VARIABLE,
    NAMESPACE,
    NUMBER,
    Slot::Keywords,
    rule("operator", Category::Operator, r"->|[:+*/|=-]"),
    BRACKET,
    PUNCTUATION,
];

/// An ordered rule list.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    rules: Vec<Rule>,
}

static METTA: Lazy<Grammar> = Lazy::new(|| {
    GrammarBuilder::new(GrammarKind::Metta)
        .build()
        .expect("built-in metta grammar compiles")
});

static EDITOR: Lazy<Grammar> = Lazy::new(|| {
    GrammarBuilder::new(GrammarKind::Editor)
        .build()
        .expect("built-in editor grammar compiles")
});

impl Grammar {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Grammar {
            name: name.into(),
            rules,
        }
    }

    /// Grammar of the code-block highlighter with the default keywords.
    pub fn metta() -> Self {
        METTA.clone()
    }

    /// Grammar of the interactive editor with the default keywords.
    pub fn editor() -> Self {
        EDITOR.clone()
    }

    pub fn builder(kind: GrammarKind) -> GrammarBuilder {
        GrammarBuilder::new(kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up the first rule with the given name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    /// First rule (in priority order) that matches at the start of `rest`.
    pub fn match_at(&self, rest: &str) -> Option<(Category, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_len(rest).map(|len| (rule.category(), len)))
    }
}

/// Assembles a built-in grammar with a custom keyword list.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    kind: GrammarKind,
    keywords: Vec<String>,
}

impl GrammarBuilder {
    pub fn new(kind: GrammarKind) -> Self {
        GrammarBuilder {
            kind,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Replace the keyword list. An empty list drops the keyword rule.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<Grammar, regex::Error> {
        let mut rules = Vec::new();
        for slot in self.kind.slots() {
            match slot {
                Slot::Rule {
                    name,
                    category,
                    pattern,
                    group,
                } => rules.push(Rule::new(*name, *category, Pattern::new(pattern, *group)?)),
                Slot::Keywords => {
                    if let Some(rule) = keyword_rule(&self.keywords)? {
                        rules.push(rule);
                    }
                }
            }
        }
        Ok(Grammar::new(self.kind.name(), rules))
    }
}

fn keyword_rule(keywords: &[String]) -> Result<Option<Rule>, regex::Error> {
    let mut words: Vec<&str> = keywords
        .iter()
        .map(String::as_str)
        .filter(|k| !k.is_empty())
        .collect();
    if words.is_empty() {
        return Ok(None);
    }
    // Longest first so a keyword never loses to its own prefix.
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words.dedup();

    let alternatives = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!("({alternatives})(?:[^{IDENT_CONTINUE}]|$)");
    Ok(Some(Rule::new(
        "keyword",
        Category::Keyword,
        Pattern::new(&pattern, 1)?,
    )))
}
