use swc_ecma_ast::{Expr, MemberProp, OptChainBase};

/// The runtime lookup function the rewriter emits and the extractors
/// recognize.
///
/// `name` is the local alias used in most positions (e.g. `$t`).
/// `global_name` is a fully qualified path (e.g. `i18n.global.t`) used where
/// the local alias may not be bound, such as default-value initializers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFunction {
    pub name: String,
    pub global_name: Option<String>,
}

impl Default for LookupFunction {
    fn default() -> Self {
        Self::new("$t")
    }
}

impl LookupFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global_name: None,
        }
    }

    pub fn with_global_name(mut self, global_name: impl Into<String>) -> Self {
        self.global_name = Some(global_name.into());
        self
    }

    /// Name to emit for a call site. Default-value positions prefer the
    /// global path when one is configured.
    pub fn name_for(&self, default_value: bool) -> &str {
        match (&self.global_name, default_value) {
            (Some(global), true) => global,
            _ => &self.name,
        }
    }

    /// Final path segments that identify a lookup call (`t` for `i18n.global.t`).
    pub fn callee_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.global_name.as_deref())
            .map(last_segment)
    }

    /// Whether `callee` is a bare (`$t(…)`) or member (`this.$t(…)`,
    /// `i18n.global.t(…)`) reference to the lookup function.
    pub fn is_callee(&self, callee: &Expr) -> bool {
        let name = match callee {
            Expr::Ident(ident) => ident.sym.as_str(),
            Expr::Member(member) => match &member.prop {
                MemberProp::Ident(prop) => prop.sym.as_str(),
                _ => return false,
            },
            Expr::OptChain(chain) => match &*chain.base {
                OptChainBase::Member(member) => match &member.prop {
                    MemberProp::Ident(prop) => prop.sym.as_str(),
                    _ => return false,
                },
                OptChainBase::Call(_) => return false,
            },
            Expr::Paren(paren) => return self.is_callee(&paren.expr),
            _ => return false,
        };
        self.callee_names().any(|candidate| candidate == name)
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
