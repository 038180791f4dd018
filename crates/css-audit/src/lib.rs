//! Finds CSS class and id selectors that no source file references.
//!
//! Selectors are taken from rule preludes only (the text before each `{`),
//! with comments, at-rule preludes and attribute brackets ignored. A selector
//! counts as used when any source file matches one of the usage patterns in
//! [`UsageMatcher`]; the last pattern is a bare word match, so the audit errs
//! on the side of "used".

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_CSS: &str = "src/pages/Rebecca.css";
pub const DEFAULT_SRC: &str = "src";
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["ts", "tsx", "js", "jsx", "html"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SelectorKind {
    Id,
    Class,
}

/// A `.class` or `#id` token. Orders by its printed form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector {
    pub kind: SelectorKind,
    pub name: String,
}

impl Selector {
    pub fn class(name: &str) -> Self {
        Self {
            kind: SelectorKind::Class,
            name: name.to_string(),
        }
    }

    pub fn id(name: &str) -> Self {
        Self {
            kind: SelectorKind::Id,
            name: name.to_string(),
        }
    }

    fn sigil(&self) -> char {
        match self.kind {
            SelectorKind::Class => '.',
            SelectorKind::Id => '#',
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sigil(), self.name)
    }
}

impl PartialOrd for Selector {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Selector {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.sigil(), &self.name).cmp(&(other.sigil(), &other.name))
    }
}

/// Removes `/* ... */` blocks; an unterminated comment runs to the end.
pub fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Pulls `.class` / `#id` tokens out of stylesheet rule preludes.
pub struct SelectorScanner {
    token: Regex,
    attribute: Regex,
}

impl SelectorScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            token: Regex::new(r"([.#])([A-Za-z_-][A-Za-z0-9_-]*)")?,
            attribute: Regex::new(r"\[[^\]]*\]")?,
        })
    }

    /// Every selector named in a rule prelude, including rules nested inside
    /// `@media` blocks.
    pub fn scan(&self, css: &str) -> BTreeSet<Selector> {
        let css = strip_comments(css);
        let mut found = BTreeSet::new();
        let mut start = 0;
        for (i, c) in css.char_indices() {
            match c {
                '{' => {
                    let prelude = css[start..i].trim();
                    if !prelude.starts_with('@') {
                        self.collect(prelude, &mut found);
                    }
                    start = i + 1;
                }
                '}' | ';' => start = i + 1,
                _ => {}
            }
        }
        found
    }

    fn collect(&self, prelude: &str, found: &mut BTreeSet<Selector>) {
        let prelude = self.attribute.replace_all(prelude, "");
        for cap in self.token.captures_iter(&prelude) {
            let name = &cap[2];
            found.insert(match &cap[1] {
                "." => Selector::class(name),
                _ => Selector::id(name),
            });
        }
    }
}

pub fn extract_selectors(css: &str) -> Result<BTreeSet<Selector>> {
    Ok(SelectorScanner::new()?.scan(css))
}

#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

/// Reads every file under `dir` with one of `extensions`. Unreadable entries
/// are logged and skipped.
pub fn collect_sources(dir: &Path, extensions: &[String]) -> Vec<SourceFile> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("skipping {}: {}", e.path().unwrap_or(dir).display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }
        match fs::read_to_string(entry.path()) {
            Ok(contents) => files.push(SourceFile {
                path: entry.path().to_path_buf(),
                contents,
            }),
            Err(e) => log::warn!("skipping {}: {}", entry.path().display(), e),
        }
    }
    log::debug!("{} source files under {}", files.len(), dir.display());
    files
}

/// Which pattern found a selector in the sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsageKind {
    /// `class="..."` / `className="..."`
    ClassAttribute,
    /// `querySelector(".x")` / `querySelectorAll("#x")`
    QuerySelector,
    /// `getElementsByClassName("x")` / `getElementById("x")`
    DomLookup,
    IdAttribute,
    /// The name anywhere, as a whole word.
    Bare,
}

/// Usage patterns for one selector, tried in order.
pub struct UsageMatcher {
    patterns: Vec<(UsageKind, Regex)>,
}

const QUOTE: &str = r#"["'`]"#;
const NOT_QUOTE: &str = r#"[^"'`]*"#;

impl UsageMatcher {
    pub fn new(selector: &Selector) -> Result<Self> {
        let name = regex::escape(&selector.name);
        let sigil = regex::escape(&selector.sigil().to_string());
        let mut sources = Vec::with_capacity(4);
        match selector.kind {
            SelectorKind::Class => {
                sources.push((
                    UsageKind::ClassAttribute,
                    format!(r"(className|class)\s*=\s*{QUOTE}{NOT_QUOTE}\b{name}\b{NOT_QUOTE}{QUOTE}"),
                ));
                sources.push((
                    UsageKind::QuerySelector,
                    format!(r#"\.querySelector(All)?\s*\(\s*['"]{sigil}{name}['"]\s*\)"#),
                ));
                sources.push((
                    UsageKind::DomLookup,
                    format!(r#"getElementsByClassName\s*\(\s*['"]{name}['"]\s*\)"#),
                ));
            }
            SelectorKind::Id => {
                sources.push((
                    UsageKind::IdAttribute,
                    format!(r"\bid\s*=\s*{QUOTE}{NOT_QUOTE}\b{name}\b{NOT_QUOTE}{QUOTE}"),
                ));
                sources.push((
                    UsageKind::QuerySelector,
                    format!(r#"\.querySelector(All)?\s*\(\s*['"]{sigil}{name}['"]\s*\)"#),
                ));
                sources.push((
                    UsageKind::DomLookup,
                    format!(r#"getElementById\s*\(\s*['"]{name}['"]\s*\)"#),
                ));
            }
        }
        sources.push((UsageKind::Bare, format!(r"\b{name}\b")));

        let patterns = sources
            .into_iter()
            .map(|(kind, src)| {
                Regex::new(&src)
                    .with_context(|| format!("usage pattern for {}", selector))
                    .map(|re| (kind, re))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// First file and pattern that reference the selector.
    pub fn find<'a>(&self, sources: &'a [SourceFile]) -> Option<(UsageKind, &'a Path)> {
        sources.iter().find_map(|file| {
            self.patterns
                .iter()
                .find(|(_, re)| re.is_match(&file.contents))
                .map(|(kind, _)| (*kind, file.path.as_path()))
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub unused: Vec<String>,
    pub total_selectors: usize,
    pub checked_files: usize,
}

/// Checks every selector of `css` against `sources`.
pub fn audit(css: &str, sources: &[SourceFile]) -> Result<AuditReport> {
    let selectors = extract_selectors(css)?;
    let mut unused = Vec::new();
    for selector in &selectors {
        match UsageMatcher::new(selector)?.find(sources) {
            Some((kind, path)) => log::debug!("{} used ({:?}) in {}", selector, kind, path.display()),
            None => unused.push(selector.to_string()),
        }
    }
    Ok(AuditReport {
        unused,
        total_selectors: selectors.len(),
        checked_files: sources.len(),
    })
}

/// Inputs of one audit run.
#[derive(Clone, Debug)]
pub struct AuditOptions {
    pub css: PathBuf,
    pub src: PathBuf,
    pub extensions: Vec<String>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            css: PathBuf::from(DEFAULT_CSS),
            src: PathBuf::from(DEFAULT_SRC),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Reads the stylesheet (the only fatal failure) and audits it.
pub fn run(options: &AuditOptions) -> Result<AuditReport> {
    let css = fs::read_to_string(&options.css)
        .with_context(|| format!("failed to read {}", options.css.display()))?;
    let sources = collect_sources(&options.src, &options.extensions);
    audit(&css, &sources)
}
