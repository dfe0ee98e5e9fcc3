use regex::{Captures, Regex};
use std::collections::HashMap;
use std::collections::HashSet;

const SPECIAL_CHAR: char = '¥';

lazy_static! {
    // ¥{identifier}, the identifier being anything up to the closing bracket
    static ref TOKEN: Regex = Regex::new(r"¥\{([^}]*)\}").expect("token pattern is valid");
}

pub enum ReplaceFailPolicy {
    #[allow(unused)]
    Ignore,
    Warn,
}

/// Replaces every `¥{identifier}` found in `text` with its value from `replacement`.
/// Tokens with no replacement stay as they are; under the Warn policy each missing
/// identifier is reported once.
pub fn replace(text: &str, replacement: &HashMap<String, String>, fail_policy: ReplaceFailPolicy) -> String {

    let mut warned_tokens: HashSet<String> = HashSet::new();

    let ret = TOKEN.replace_all(text, |caps: &Captures| {
        let ident = &caps[1];
        match replacement.get(ident) {
            Some(s) => s.clone(),
            None => {
                if let ReplaceFailPolicy::Warn = fail_policy {
                    if warned_tokens.insert(ident.to_string()) {
                        eprintln_with_time!("Warning: found replacement token \"{}\" in \"{}\", but could not find a suitable replacement.", ident, text);
                    }
                }
                format!("{}{{{}}}", SPECIAL_CHAR, ident)
            }
        }
    });
    ret.into_owned()
}
