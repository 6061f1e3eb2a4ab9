//! Script rewriting: literal sites that are table keys become lookup calls.

use std::sync::LazyLock;

use regex::Regex;

use super::edit::{Edit, apply_edits, quote_literal};
use super::{KeySet, Rewrite, RewriteError, RewriteOptions, SemicolonStyle};
use crate::core::extract::{ImportRecord, LiteralSite, SiteCollector, SiteContext, SiteKind};
use crate::core::parsers::{SourceKind, parse_script};
use crate::core::text::{collapse_lines, segment_runs};

static IMPORT_SOURCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\bfrom\s*|^\s*import\s*)['"]([^'"]+)['"]"#).unwrap()
});

/// Where the import statement goes when one is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportAnchor {
    /// A standalone file: top of file, after a shebang line.
    File,
    /// A component `<script>` body: after its leading newline.
    Block,
}

pub fn rewrite_script(
    source: &str,
    kind: SourceKind,
    options: &RewriteOptions,
    keys: &dyn KeySet,
    anchor: ImportAnchor,
) -> Result<Rewrite, RewriteError> {
    let parsed = parse_script(source, kind)?;
    let collection = SiteCollector::new(source, &parsed, &options.lookup).collect();

    let mut site_rewriter = SiteRewriter {
        source,
        options,
        keys,
        edits: Vec::new(),
        local_used: false,
    };
    for site in collection
        .sites
        .iter()
        .filter(|site| site.context.is_rewritable())
    {
        site_rewriter.rewrite_site(site);
    }

    let SiteRewriter {
        mut edits,
        local_used,
        ..
    } = site_rewriter;
    let replacements = edits.len();
    if replacements == 0 {
        return Ok(Rewrite::unchanged(source));
    }

    if local_used
        && let Some(statement) = options.import_statement.as_deref()
        && !has_import(&collection.imports, statement, &options.lookup.name)
    {
        let line = import_line(source, statement, &collection.imports, options.semicolon_style);
        edits.push(Edit::insert(import_offset(source, anchor), line));
    }

    Ok(Rewrite {
        code: apply_edits(source, edits)?,
        replacements,
    })
}

struct SiteRewriter<'a> {
    source: &'a str,
    options: &'a RewriteOptions,
    keys: &'a dyn KeySet,
    edits: Vec<Edit>,
    local_used: bool,
}

impl SiteRewriter<'_> {
    fn rewrite_site(&mut self, site: &LiteralSite) {
        match site.kind {
            SiteKind::StringLiteral | SiteKind::PlainTemplate => {
                if self.keys.has_key(&site.value) {
                    let raw = self.source.get(site.range.clone());
                    let call = self.call(site, &site.value, raw);
                    self.edits.push(Edit::replace(site.range.clone(), call));
                }
            }
            SiteKind::JsxAttribute => {
                if self.keys.has_key(&site.value) {
                    // JSX attribute strings take no escapes, so the raw text
                    // is only a valid JS literal without backslashes.
                    let raw = self
                        .source
                        .get(site.range.clone())
                        .filter(|raw| !raw.contains('\\'));
                    let call = self.call(site, &site.value, raw);
                    self.edits
                        .push(Edit::replace(site.range.clone(), format!("{{{call}}}")));
                }
            }
            SiteKind::JsxText => {
                let trimmed = site.value.trim();
                let key = collapse_lines(trimmed);
                if self.keys.has_key(&key) {
                    let lead = site.value.len() - site.value.trim_start().len();
                    let start = site.range.start + lead;
                    let call = self.call(site, &key, None);
                    self.edits.push(Edit::replace(
                        start..start + trimmed.len(),
                        format!("{{{call}}}"),
                    ));
                } else {
                    self.rewrite_segments(site, |call| format!("{{{call}}}"));
                }
            }
            SiteKind::TemplateQuasi => {
                self.rewrite_segments(site, |call| format!("${{{call}}}"));
            }
        }
    }

    /// Wrap each key segment of a raw text site.
    fn rewrite_segments(&mut self, site: &LiteralSite, wrap: impl Fn(&str) -> String) {
        for run in segment_runs(&site.value, self.options.script) {
            let segment = &site.value[run.clone()];
            // JSX renders line breaks inside text as single spaces
            let key = match site.kind {
                SiteKind::JsxText => collapse_lines(segment),
                _ => segment.to_string(),
            };
            if segment.contains('\\') || !self.keys.has_key(&key) {
                continue;
            }
            let call = self.call(site, &key, None);
            let start = site.range.start + run.start;
            self.edits
                .push(Edit::replace(start..start + segment.len(), wrap(&call)));
        }
    }

    fn call(&mut self, site: &LiteralSite, value: &str, raw: Option<&str>) -> String {
        let default_value = site.context == SiteContext::DefaultValue;
        let name = self.options.lookup.name_for(default_value);
        if name == self.options.lookup.name {
            self.local_used = true;
        }
        format!("{name}({})", quote_literal(value, self.options.quote_style, raw))
    }
}

/// Whether the lookup function is already imported: some import binds its
/// root name, or imports from the module named in `statement`.
fn has_import(imports: &[ImportRecord], statement: &str, name: &str) -> bool {
    let root = name.split('.').next().unwrap_or(name);
    let module = IMPORT_SOURCE_REGEX
        .captures(statement)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    imports.iter().any(|import| {
        import.locals.iter().any(|local| local == root) || Some(import.source.as_str()) == module
    })
}

fn import_line(
    source: &str,
    statement: &str,
    imports: &[ImportRecord],
    style: SemicolonStyle,
) -> String {
    let bare = statement.trim().trim_end_matches(';').trim_end();
    let semicolon = match style {
        SemicolonStyle::Always => true,
        SemicolonStyle::Never => false,
        SemicolonStyle::Preserve => match imports.first() {
            Some(first) => source
                .get(first.range.clone())
                .is_some_and(|text| text.trim_end().ends_with(';')),
            None => statement.trim_end().ends_with(';'),
        },
    };
    if semicolon {
        format!("{bare};\n")
    } else {
        format!("{bare}\n")
    }
}

fn import_offset(source: &str, anchor: ImportAnchor) -> usize {
    match anchor {
        ImportAnchor::File if source.starts_with("#!") => {
            source.find('\n').map_or(source.len(), |idx| idx + 1)
        }
        ImportAnchor::File => 0,
        ImportAnchor::Block if source.starts_with("\r\n") => 2,
        ImportAnchor::Block if source.starts_with('\n') => 1,
        ImportAnchor::Block => 0,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::lookup::LookupFunction;
    use crate::core::rewrite::QuoteStyle;

    fn keys(texts: &[&str]) -> BTreeSet<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn rewrite(code: &str, kind: SourceKind, options: &RewriteOptions, texts: &[&str]) -> String {
        rewrite_script(code, kind, options, &keys(texts), ImportAnchor::File)
            .unwrap()
            .code
    }

    #[test]
    fn test_string_literals() {
        let code = "const greeting = '你好，世界'; console.log('输出消息');";
        let out = rewrite(code, SourceKind::Js, &RewriteOptions::default(), &["你好，世界", "输出消息"]);
        insta::assert_snapshot!(out, @r#"const greeting = $t("你好，世界"); console.log($t("输出消息"));"#);
    }

    #[test]
    fn test_formatting_preserved() {
        let code = "const a  =   '你好' ;   // 注释\nfoo( '其他' )\n";
        let out = rewrite(code, SourceKind::Js, &RewriteOptions::default(), &["你好"]);
        assert_eq!(out, "const a  =   $t(\"你好\") ;   // 注释\nfoo( '其他' )\n");
    }

    #[test]
    fn test_skipped_contexts() {
        let code = r#"import x from './你好';
if (x !== '你好') {}
switch (x) { case '你好': break; }
const y = $t('你好');
const z = obj['你好'];
"#;
        let out = rewrite(code, SourceKind::Ts, &RewriteOptions::default(), &["你好"]);
        assert_eq!(out, code);
    }

    #[test]
    fn test_optional_lookup_call_not_wrapped_again() {
        let code = "const a = this.$t?.('已翻译'); const b = $t?.('已翻译');";
        let out = rewrite(code, SourceKind::Ts, &RewriteOptions::default(), &["已翻译", "比较"]);
        assert_eq!(out, code);
    }

    #[test]
    fn test_comparison_under_type_assertion_kept() {
        let code = "if (x === ('比较' as string) || y !== '比较'!) {}";
        let out = rewrite(code, SourceKind::Ts, &RewriteOptions::default(), &["比较"]);
        assert_eq!(out, code);
    }

    #[test]
    fn test_default_value_uses_global_name() {
        let options = RewriteOptions {
            lookup: LookupFunction::new("$t").with_global_name("i18n.global.t"),
            ..RewriteOptions::default()
        };
        let code = "function f(label = '默认') { return '正文'; }";
        let out = rewrite(code, SourceKind::Js, &options, &["默认", "正文"]);
        insta::assert_snapshot!(out, @r#"function f(label = i18n.global.t("默认")) { return $t("正文"); }"#);
    }

    #[test]
    fn test_template_literals() {
        let code = "const a = `纯文本`; const b = `共${n}条记录`;";
        let out = rewrite(code, SourceKind::Js, &RewriteOptions::default(), &["纯文本", "条记录"]);
        insta::assert_snapshot!(out, @r#"const a = $t("纯文本"); const b = `共${n}${$t("条记录")}`;"#);
    }

    #[test]
    fn test_jsx() {
        let code = "const el = <p title=\"标题\">\n  你好 {name}\n  登录 to continue\n</p>;";
        let out = rewrite(code, SourceKind::Jsx, &RewriteOptions::default(), &["标题", "你好", "登录"]);
        assert_eq!(
            out,
            "const el = <p title={$t(\"标题\")}>\n  {$t(\"你好\")} {name}\n  {$t(\"登录\")} to continue\n</p>;"
        );
    }

    #[test]
    fn test_multiline_jsx_text() {
        let code = "const el = <p>\n    欢迎\n    使用本系统\n</p>;\nconst b = <b>\n  共\n  条 items {n}\n</b>;";
        let out = rewrite(code, SourceKind::Jsx, &RewriteOptions::default(), &["欢迎 使用本系统", "共 条"]);
        assert_eq!(
            out,
            "const el = <p>\n    {$t(\"欢迎 使用本系统\")}\n</p>;\nconst b = <b>\n  {$t(\"共 条\")} items {n}\n</b>;"
        );
    }

    #[test]
    fn test_idempotent() {
        let options = RewriteOptions {
            import_statement: Some("import { $t } from '@/i18n'".to_string()),
            ..RewriteOptions::default()
        };
        let texts = ["你好", "条记录", "标题"];
        let code = "const a = '你好';\nconst b = `共${n}条记录`;\nconst el = <p title=\"标题\">你好</p>;\n";
        let once = rewrite(code, SourceKind::Tsx, &options, &texts);
        let twice = rewrite(&once, SourceKind::Tsx, &options, &texts);
        assert_eq!(once, twice);
        assert!(!once.contains("$t($t("));
    }

    #[test]
    fn test_import_inserted_once() {
        let options = RewriteOptions {
            import_statement: Some("import { $t } from '@/i18n';".to_string()),
            semicolon_style: SemicolonStyle::Never,
            ..RewriteOptions::default()
        };
        let out = rewrite("#!/usr/bin/env node\nconst a = '你好';\n", SourceKind::Js, &options, &["你好"]);
        assert_eq!(
            out,
            "#!/usr/bin/env node\nimport { $t } from '@/i18n'\nconst a = $t(\"你好\");\n"
        );

        let existing = "import { $t } from '@/i18n';\nconst a = '你好';\n";
        let out = rewrite(existing, SourceKind::Js, &options, &["你好"]);
        assert_eq!(out, "import { $t } from '@/i18n';\nconst a = $t(\"你好\");\n");
    }

    #[test]
    fn test_import_semicolon_follows_existing_imports() {
        let options = RewriteOptions {
            import_statement: Some("import { $t } from '@/i18n'".to_string()),
            ..RewriteOptions::default()
        };
        let code = "import a from 'a';\nconst b = '你好';\n";
        let out = rewrite(code, SourceKind::Js, &options, &["你好"]);
        assert!(out.starts_with("import { $t } from '@/i18n';\nimport a from 'a';"));
    }

    #[test]
    fn test_no_import_without_replacement() {
        let options = RewriteOptions {
            import_statement: Some("import { $t } from '@/i18n'".to_string()),
            ..RewriteOptions::default()
        };
        let code = "const a = 'hello';\n";
        assert_eq!(rewrite(code, SourceKind::Js, &options, &["你好"]), code);
    }

    #[test]
    fn test_quote_styles() {
        let code = "const a = '你好';";
        let single = RewriteOptions {
            quote_style: QuoteStyle::Single,
            ..RewriteOptions::default()
        };
        assert_eq!(rewrite(code, SourceKind::Js, &single, &["你好"]), "const a = $t('你好');");

        let preserve = RewriteOptions {
            quote_style: QuoteStyle::Preserve,
            ..RewriteOptions::default()
        };
        let code = "const a = \"你好\";";
        assert_eq!(rewrite(code, SourceKind::Js, &preserve, &["你好"]), "const a = $t(\"你好\");");
    }

    #[test]
    fn test_parse_error() {
        let result = rewrite_script(
            "const a = '你好;\n",
            SourceKind::Js,
            &RewriteOptions::default(),
            &keys(&["你好"]),
            ImportAnchor::File,
        );
        assert!(matches!(result, Err(RewriteError::Parse(_))));
    }

    #[test]
    fn test_block_anchor() {
        let options = RewriteOptions {
            import_statement: Some("import { $t } from '@/i18n'".to_string()),
            ..RewriteOptions::default()
        };
        let out = rewrite_script("\nconst a = '你好'\n", SourceKind::Ts, &options, &keys(&["你好"]), ImportAnchor::Block)
            .unwrap();
        assert_eq!(out.code, "\nimport { $t } from '@/i18n'\nconst a = $t(\"你好\")\n");
        assert_eq!(out.replacements, 1);
    }
}
