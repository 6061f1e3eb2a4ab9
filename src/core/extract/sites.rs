//! Literal sites: every place in a script AST where translatable text can live.
//!
//! A single walk records each string literal, template literal, JSX text and
//! JSX attribute string together with the syntactic position it sits in. The
//! extractor and the rewriter both work from this list and differ only in
//! which positions they act on.

use std::ops::Range;

use swc_common::Span;
use swc_ecma_ast::{
    AssignPat, AssignPatProp, BinExpr, BinaryOp, CallExpr, Callee, ComputedPropName, Expr,
    ImportDecl, ImportSpecifier, JSXAttr, JSXAttrValue, JSXElement, JSXElementName, JSXText,
    ExprOrSpread, KeyValueProp, Lit, MemberExpr, MemberProp, OptCall, PropName, Str, SwitchCase,
    TaggedTpl, Tpl, TsEnumMember,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::lookup::LookupFunction;
use crate::core::parsers::ParsedScript;

/// What kind of node holds the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteKind {
    /// `'text'` / `"text"`; `value` is the cooked string.
    StringLiteral,
    /// `` `text` `` without interpolations; `value` is the cooked string.
    PlainTemplate,
    /// A static run of `` `a${b}c` ``; `value` is the raw source text.
    TemplateQuasi,
    /// Text between JSX tags; `value` is the raw source text.
    JsxText,
    /// `attr="text"` in JSX; `value` is the attribute string.
    JsxAttribute,
}

/// The syntactic position of a site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiteContext {
    #[default]
    Free,
    /// Import/export source, dynamic `import()` or `require()` argument.
    ModuleSpecifier,
    /// First argument of a call to the lookup function.
    LookupArgument,
    /// Operand of an equality comparison or a `switch` case test.
    Comparison,
    /// Parameter/destructuring default, or a `default:` property value.
    DefaultValue,
    /// Must stay a literal: enum initializers, `as const` operands, computed
    /// keys and computed member access.
    Frozen,
}

impl SiteContext {
    /// Whether text here belongs in an extraction result.
    pub fn is_extractable(self) -> bool {
        !matches!(self, SiteContext::ModuleSpecifier | SiteContext::Frozen)
    }

    /// Whether the rewriter may replace text here with a lookup call.
    pub fn is_rewritable(self) -> bool {
        matches!(self, SiteContext::Free | SiteContext::DefaultValue)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSite {
    pub kind: SiteKind,
    pub context: SiteContext,
    /// Byte range in the source: the whole literal including quotes, or the
    /// raw text for quasis and JSX text.
    pub range: Range<usize>,
    pub value: String,
}

/// An import declaration: its module source and the local names it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub source: String,
    pub locals: Vec<String>,
    pub range: Range<usize>,
}

#[derive(Debug, Default)]
pub struct SiteCollection {
    pub sites: Vec<LiteralSite>,
    pub imports: Vec<ImportRecord>,
}

/// Collects literal sites from a parsed script in one traversal.
pub struct SiteCollector<'a> {
    source: &'a str,
    parsed: &'a ParsedScript,
    lookup: &'a LookupFunction,
    /// Context for the next expression visited; consumed by `visit_expr`.
    context: SiteContext,
    collection: SiteCollection,
}

impl<'a> SiteCollector<'a> {
    pub fn new(source: &'a str, parsed: &'a ParsedScript, lookup: &'a LookupFunction) -> Self {
        Self {
            source,
            parsed,
            lookup,
            context: SiteContext::Free,
            collection: SiteCollection::default(),
        }
    }

    pub fn collect(mut self) -> SiteCollection {
        self.parsed.module.visit_with(&mut self);
        self.collection.sites.sort_by_key(|site| site.range.start);
        self.collection
    }

    fn range(&self, span: Span) -> Range<usize> {
        self.parsed.offset(span.lo)..self.parsed.offset(span.hi)
    }

    /// Visit `expr` with `context` applied to the expression itself only.
    fn visit_in(&mut self, context: SiteContext, expr: &Expr) {
        self.context = context;
        expr.visit_with(self);
        self.context = SiteContext::Free;
    }

    fn push(&mut self, kind: SiteKind, context: SiteContext, range: Range<usize>, value: &str) {
        self.collection.sites.push(LiteralSite {
            kind,
            context,
            range,
            value: value.to_string(),
        });
    }

    fn push_str(&mut self, kind: SiteKind, context: SiteContext, s: &Str) {
        if let Some(value) = s.value.as_str() {
            let range = self.range(s.span);
            self.push(kind, context, range, value);
        }
    }

    fn record_template(&mut self, tpl: &Tpl, context: SiteContext) {
        if tpl.exprs.is_empty()
            && let [quasi] = tpl.quasis.as_slice()
        {
            if let Some(cooked) = quasi.cooked.as_ref().and_then(|c| c.as_str()) {
                let range = self.range(tpl.span);
                self.push(SiteKind::PlainTemplate, context, range, cooked);
            }
            return;
        }

        let outer = self.range(tpl.span);
        let mut cursor = outer.start;
        for quasi in &tpl.quasis {
            let raw = quasi.raw.as_str();
            if raw.is_empty() {
                continue;
            }
            let Some(range) = self.locate_raw(quasi.span, raw, cursor, outer.end) else {
                continue;
            };
            cursor = range.end;
            self.push(SiteKind::TemplateQuasi, context, range, raw);
        }
    }

    /// Byte range of a quasi's raw text. Falls back to searching the template
    /// body when the node span does not line up with the raw text.
    fn locate_raw(&self, span: Span, raw: &str, from: usize, to: usize) -> Option<Range<usize>> {
        let range = self.range(span);
        if self.source.get(range.clone()) == Some(raw) {
            return Some(range);
        }
        let haystack = self.source.get(from..to)?;
        let start = from + haystack.find(raw)?;
        Some(start..start + raw.len())
    }

    fn is_require(callee: &Expr) -> bool {
        matches!(callee, Expr::Ident(ident) if ident.sym.as_str() == "require")
    }

    /// Context of the first argument of a call to `callee`, if it is special.
    fn first_arg_context(&self, callee: &Expr) -> Option<SiteContext> {
        if Self::is_require(callee) {
            Some(SiteContext::ModuleSpecifier)
        } else if self.lookup.is_callee(callee) {
            Some(SiteContext::LookupArgument)
        } else {
            None
        }
    }

    fn visit_args(&mut self, args: &[ExprOrSpread], first_arg_context: Option<SiteContext>) {
        for (idx, arg) in args.iter().enumerate() {
            match first_arg_context {
                Some(context) if idx == 0 && arg.spread.is_none() => {
                    self.visit_in(context, &arg.expr)
                }
                _ => arg.expr.visit_with(self),
            }
        }
    }
}

impl Visit for SiteCollector<'_> {
    fn visit_expr(&mut self, node: &Expr) {
        let context = std::mem::take(&mut self.context);
        match node {
            Expr::Lit(Lit::Str(s)) => self.push_str(SiteKind::StringLiteral, context, s),
            Expr::Tpl(tpl) => {
                self.record_template(tpl, context);
                for expr in &tpl.exprs {
                    expr.visit_with(self);
                }
            }
            Expr::Paren(paren) => self.visit_in(context, &paren.expr),
            Expr::TsAs(cast) => self.visit_in(context, &cast.expr),
            Expr::TsNonNull(non_null) => self.visit_in(context, &non_null.expr),
            Expr::TsSatisfies(satisfies) => self.visit_in(context, &satisfies.expr),
            Expr::TsTypeAssertion(assertion) => self.visit_in(context, &assertion.expr),
            Expr::TsConstAssertion(assertion) => self.visit_in(SiteContext::Frozen, &assertion.expr),
            _ => node.visit_children_with(self),
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let first_arg_context = match &node.callee {
            Callee::Import(_) => Some(SiteContext::ModuleSpecifier),
            Callee::Expr(callee) => self.first_arg_context(callee),
            _ => None,
        };

        node.callee.visit_with(self);
        self.visit_args(&node.args, first_arg_context);
    }

    // `$t?.('…')` and `this.$t?.('…')`
    fn visit_opt_call(&mut self, node: &OptCall) {
        let first_arg_context = self.first_arg_context(&node.callee);
        node.callee.visit_with(self);
        self.visit_args(&node.args, first_arg_context);
    }

    fn visit_bin_expr(&mut self, node: &BinExpr) {
        if matches!(
            node.op,
            BinaryOp::EqEq | BinaryOp::NotEq | BinaryOp::EqEqEq | BinaryOp::NotEqEq
        ) {
            self.visit_in(SiteContext::Comparison, &node.left);
            self.visit_in(SiteContext::Comparison, &node.right);
        } else {
            node.visit_children_with(self);
        }
    }

    fn visit_switch_case(&mut self, node: &SwitchCase) {
        if let Some(test) = &node.test {
            self.visit_in(SiteContext::Comparison, test);
        }
        node.cons.visit_with(self);
    }

    fn visit_ts_enum_member(&mut self, node: &TsEnumMember) {
        if let Some(init) = &node.init {
            self.visit_in(SiteContext::Frozen, init);
        }
    }

    fn visit_computed_prop_name(&mut self, node: &ComputedPropName) {
        self.visit_in(SiteContext::Frozen, &node.expr);
    }

    fn visit_member_expr(&mut self, node: &MemberExpr) {
        node.obj.visit_with(self);
        if let MemberProp::Computed(computed) = &node.prop {
            self.visit_in(SiteContext::Frozen, &computed.expr);
        }
    }

    fn visit_assign_pat(&mut self, node: &AssignPat) {
        node.left.visit_with(self);
        self.visit_in(SiteContext::DefaultValue, &node.right);
    }

    fn visit_assign_pat_prop(&mut self, node: &AssignPatProp) {
        if let Some(value) = &node.value {
            self.visit_in(SiteContext::DefaultValue, value);
        }
    }

    fn visit_key_value_prop(&mut self, node: &KeyValueProp) {
        node.key.visit_with(self);
        let is_default = match &node.key {
            PropName::Ident(ident) => ident.sym.as_str() == "default",
            PropName::Str(s) => s.value.as_str() == Some("default"),
            _ => false,
        };
        if is_default {
            self.visit_in(SiteContext::DefaultValue, &node.value);
        } else {
            node.value.visit_with(self);
        }
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        node.tag.visit_with(self);
        for expr in &node.tpl.exprs {
            expr.visit_with(self);
        }
    }

    fn visit_import_decl(&mut self, node: &ImportDecl) {
        let locals = node
            .specifiers
            .iter()
            .map(|spec| match spec {
                ImportSpecifier::Named(named) => named.local.sym.to_string(),
                ImportSpecifier::Default(default) => default.local.sym.to_string(),
                ImportSpecifier::Namespace(ns) => ns.local.sym.to_string(),
            })
            .collect();
        let range = self.range(node.span);
        self.collection.imports.push(ImportRecord {
            source: node.src.value.as_str().unwrap_or_default().to_string(),
            locals,
            range,
        });
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        node.opening.visit_with(self);

        let is_raw_text = matches!(
            &node.opening.name,
            JSXElementName::Ident(ident) if matches!(ident.sym.as_str(), "style" | "script")
        );
        if is_raw_text {
            return;
        }

        for child in &node.children {
            child.visit_with(self);
        }
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        let range = self.range(node.span);
        let Some(raw) = self.source.get(range.clone()) else {
            return;
        };
        if raw.trim().is_empty() {
            return;
        }
        let raw = raw.to_string();
        self.push(SiteKind::JsxText, SiteContext::Free, range, &raw);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        match &node.value {
            Some(JSXAttrValue::Str(s)) => {
                self.push_str(SiteKind::JsxAttribute, SiteContext::Free, s)
            }
            Some(value) => value.visit_with(self),
            None => {}
        }
    }
}
