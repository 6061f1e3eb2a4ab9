//! Template rewriting: ordered string-substitution passes over component
//! markup.
//!
//! 1. plain attributes become bindings: `title="标题"` → `:title="$t('标题')"`
//! 2. literals inside binding directives are wrapped
//! 3. text nodes are wrapped into interpolations
//! 4. literals inside existing interpolations are wrapped
//!
//! Every pass skips literals already passed to the lookup function, which
//! makes the whole pipeline idempotent.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::edit::wrap_quoted;
use super::{KeySet, Rewrite, RewriteOptions};

static PLAIN_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s)([A-Za-z_][\w-]*)=(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static BINDING_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s)((?:v-bind)?:[\w.-]+|v-text|v-html)="([^"]*)""#).unwrap()
});
static TEXT_NODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">([^<>]+)<").unwrap());
static INTERPOLATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap());
static EXPR_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'([^'\\\n]*)'|"([^"\\\n]*)"|`([^`$\\\n]*)`"#).unwrap()
});

pub fn rewrite_template(markup: &str, options: &RewriteOptions, keys: &dyn KeySet) -> Rewrite {
    let pass = TemplatePass {
        name: &options.lookup.name,
        callee_names: options.lookup.callee_names().collect(),
        keys,
    };

    let mut replacements = 0;
    let code = pass.bind_plain_attributes(markup, &mut replacements);
    let code = pass.wrap_binding_literals(&code, &mut replacements);
    let code = pass.wrap_text_nodes(&code, &mut replacements);
    let code = pass.wrap_interpolation_literals(&code, &mut replacements);

    Rewrite { code, replacements }
}

struct TemplatePass<'a> {
    name: &'a str,
    callee_names: Vec<&'a str>,
    keys: &'a dyn KeySet,
}

impl TemplatePass<'_> {
    fn bind_plain_attributes(&self, markup: &str, count: &mut usize) -> String {
        PLAIN_ATTR_REGEX
            .replace_all(markup, |caps: &Captures| {
                let (space, name) = (&caps[1], &caps[2]);
                let Some(value) = caps.get(3).or_else(|| caps.get(4)).map(|m| m.as_str()) else {
                    return caps[0].to_string();
                };
                // the binding is emitted double-quoted
                if name.starts_with("v-") || value.contains('"') || !self.keys.has_key(value) {
                    return caps[0].to_string();
                }
                *count += 1;
                format!("{space}:{name}=\"{}\"", self.call(value))
            })
            .into_owned()
    }

    fn wrap_binding_literals(&self, markup: &str, count: &mut usize) -> String {
        BINDING_ATTR_REGEX
            .replace_all(markup, |caps: &Captures| {
                let (expr, wrapped) = self.wrap_literals(&caps[3]);
                if wrapped == 0 {
                    return caps[0].to_string();
                }
                *count += wrapped;
                format!("{}{}=\"{expr}\"", &caps[1], &caps[2])
            })
            .into_owned()
    }

    fn wrap_text_nodes(&self, markup: &str, count: &mut usize) -> String {
        TEXT_NODE_REGEX
            .replace_all(markup, |caps: &Captures| {
                let text = &caps[1];
                let replaced = if INTERPOLATION_REGEX.is_match(text) {
                    self.wrap_static_runs(text, count)
                } else {
                    self.wrap_text(text, count)
                };
                format!(">{replaced}<")
            })
            .into_owned()
    }

    fn wrap_interpolation_literals(&self, markup: &str, count: &mut usize) -> String {
        INTERPOLATION_REGEX
            .replace_all(markup, |caps: &Captures| {
                let (expr, wrapped) = self.wrap_literals(&caps[1]);
                if wrapped == 0 {
                    return caps[0].to_string();
                }
                *count += wrapped;
                format!("{{{{{expr}}}}}")
            })
            .into_owned()
    }

    /// Wrap a whole text run, keeping its surrounding whitespace.
    fn wrap_text(&self, text: &str, count: &mut usize) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() || !self.keys.has_key(trimmed) {
            return text.to_string();
        }
        *count += 1;
        let lead = &text[..text.len() - text.trim_start().len()];
        let trail = &text[text.trim_end().len()..];
        format!("{lead}{{{{ {} }}}}{trail}", self.call(trimmed))
    }

    /// Wrap the static runs between interpolations of a text node.
    fn wrap_static_runs(&self, text: &str, count: &mut usize) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in INTERPOLATION_REGEX.find_iter(text) {
            out.push_str(&self.wrap_text(&text[last..m.start()], count));
            out.push_str(m.as_str());
            last = m.end();
        }
        out.push_str(&self.wrap_text(&text[last..], count));
        out
    }

    /// Wrap quoted key literals of a template expression. Literals already
    /// passed to the lookup function and equality operands are kept.
    fn wrap_literals(&self, expr: &str) -> (String, usize) {
        let mut out = String::with_capacity(expr.len());
        let mut last = 0;
        let mut wrapped = 0;

        for caps in EXPR_LITERAL_REGEX.captures_iter(expr) {
            let value = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3));
            let (Some(whole), Some(value)) = (caps.get(0), value) else {
                continue;
            };
            let before = &expr[..whole.start()];
            let after = &expr[whole.end()..];
            if !self.keys.has_key(value.as_str())
                || self.is_lookup_argument(before)
                || is_equality_operand(before, after)
            {
                continue;
            }
            out.push_str(&expr[last..whole.start()]);
            out.push_str(&self.call(value.as_str()));
            last = whole.end();
            wrapped += 1;
        }

        out.push_str(&expr[last..]);
        (out, wrapped)
    }

    fn is_lookup_argument(&self, before: &str) -> bool {
        let Some(callee) = before.trim_end().strip_suffix('(') else {
            return false;
        };
        let callee = callee.trim_end();
        self.callee_names.iter().any(|name| {
            callee.strip_suffix(name).is_some_and(|rest| {
                rest.chars()
                    .next_back()
                    .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '$'))
            })
        })
    }

    fn call(&self, value: &str) -> String {
        format!("{}({})", self.name, wrap_quoted(value, '\''))
    }
}

fn is_equality_operand(before: &str, after: &str) -> bool {
    let before = before.trim_end();
    let after = after.trim_start();
    before.ends_with("==")
        || before.ends_with("!=")
        || after.starts_with("==")
        || after.starts_with("!=")
}
