use super::activation::{Activation, from_cel_value};
use super::environment::{BackendCapabilities, Declaration, build_declarations};
use super::expression::NamedExpression;
use crate::Result;
use crate::attributes::{self, AttributeValue};
use crate::user::UserDetailer;
use cel_interpreter::Program;
use cel_parser::ast::{EntryExpr, Expr, IdedEntryExpr, IdedExpr};
use chrono::{DateTime, Utc};
use ohno::app_err;
use std::collections::{BTreeSet, HashMap};

const LOG_TARGET: &str = "  resolver";

/// A named expression compiled against the backend's declared environment.
///
/// Owned exclusively by the resolver after initialization and never recompiled.
#[derive(Debug)]
struct CompiledAttribute {
    program: Program,

    /// The declared variables this program references, in declaration order.
    /// Only these are bound at evaluation time, so attributes an expression never
    /// touches are never computed.
    referenced: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolverState {
    Uninitialized,
    Ready,
    Failed,
}

/// Resolves built-in attributes and administrator-defined expression attributes.
///
/// Initialization compiles every configured expression exactly once; a failure of
/// any one leaves the resolver permanently unusable rather than partially
/// available. Once `Ready`, the program table is immutable and `resolve` may be
/// called concurrently without synchronization.
#[derive(Debug)]
pub struct ExpressionResolver {
    capabilities: BackendCapabilities,
    expressions: Vec<NamedExpression>,
    declarations: Vec<Declaration>,
    programs: HashMap<String, CompiledAttribute>,
    state: ResolverState,
}

impl ExpressionResolver {
    #[must_use]
    pub fn new(capabilities: BackendCapabilities, expressions: Vec<NamedExpression>) -> Self {
        Self {
            capabilities,
            expressions,
            declarations: Vec::new(),
            programs: HashMap::new(),
            state: ResolverState::Uninitialized,
        }
    }

    /// Build the environment and compile every configured expression.
    ///
    /// Idempotent: a second call on a ready resolver is a no-op and does not
    /// recompile anything. A resolver that failed to initialize stays failed.
    pub fn initialize(&mut self) -> Result<()> {
        match self.state {
            ResolverState::Ready => return Ok(()),
            ResolverState::Failed => {
                return Err(app_err!("the attribute resolver previously failed to initialize"));
            }
            ResolverState::Uninitialized => {}
        }

        match self.compile_all() {
            Ok(()) => {
                self.state = ResolverState::Ready;
                Ok(())
            }
            Err(e) => {
                self.state = ResolverState::Failed;
                Err(e)
            }
        }
    }

    fn compile_all(&mut self) -> Result<()> {
        let declarations = build_declarations(&self.capabilities)?;
        log::debug!(target: LOG_TARGET, "Environment declares {}",
            declarations
                .iter()
                .map(|d| format!("{} ({})", d.name, d.kind))
                .collect::<Vec<_>>()
                .join(", "));

        let mut programs = HashMap::with_capacity(self.expressions.len());

        for expr in &self.expressions {
            if attributes::lookup(expr.name()).is_some() {
                log::warn!(target: LOG_TARGET,
                    "Attribute definition '{}' has the name of a built-in attribute and will never be evaluated",
                    expr.name());
            }

            let program = Program::compile(expr.source()).map_err(|e| {
                app_err!(
                    "could not compile attribute expression '{}' with value '{}': {e}",
                    expr.name(),
                    expr.source()
                )
            })?;

            let ast = cel_parser::Parser::new().parse(expr.source()).map_err(|e| {
                app_err!(
                    "could not compile attribute expression '{}' with value '{}': {e}",
                    expr.name(),
                    expr.source()
                )
            })?;

            let mut free = BTreeSet::new();
            free_variables(&ast, &mut Vec::new(), &mut free);

            for variable in &free {
                if !declarations.iter().any(|d| &d.name == variable) {
                    return Err(app_err!(
                        "attribute expression '{}' with value '{}' references undeclared attribute '{variable}'",
                        expr.name(),
                        expr.source()
                    ));
                }
            }

            let referenced = declarations
                .iter()
                .filter(|d| free.contains(&d.name))
                .map(|d| d.name.clone())
                .collect();

            let compiled = CompiledAttribute { program, referenced };
            if programs.insert(expr.name().to_string(), compiled).is_some() {
                return Err(app_err!("duplicate attribute definition '{}'", expr.name()));
            }

            log::debug!(target: LOG_TARGET, "Compiled attribute expression '{}'", expr.name());
        }

        self.declarations = declarations;
        self.programs = programs;
        Ok(())
    }

    /// Resolve an attribute for one user.
    ///
    /// Built-in catalog names dispatch directly to the detailer; other names look
    /// up a compiled program and evaluate it. Evaluation errors degrade to `None`,
    /// indistinguishable from an unknown name. Returns `None` for everything when
    /// the resolver is not ready.
    #[must_use]
    pub fn resolve(&self, name: &str, detailer: &dyn UserDetailer, updated_at: DateTime<Utc>) -> Option<AttributeValue> {
        if self.state != ResolverState::Ready {
            return None;
        }

        let activation = Activation::new(detailer, updated_at);

        if let Some(def) = attributes::lookup(name) {
            return Some((def.extractor)(&activation));
        }

        let compiled = self.programs.get(name)?;
        let context = activation.cel_context(&compiled.referenced);

        match compiled.program.execute(&context) {
            Ok(value) => from_cel_value(value),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Evaluation of attribute '{name}' failed: {e}");
                None
            }
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == ResolverState::Ready
    }

    /// The variables declared to expressions, empty until initialization.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }
}

/// Collects the variables that occur free in a parsed expression.
///
/// Comprehension macros (`exists`, `all`, `filter`, `map`, ...) bind their loop
/// and accumulator identifiers within the comprehension body, so those are not
/// references to the declared environment. Identifiers introduced internally by
/// macro expansion start with `@` and are never free.
fn free_variables<'e>(expr: &'e IdedExpr, bound: &mut Vec<&'e str>, free: &mut BTreeSet<String>) {
    match &expr.expr {
        Expr::Ident(name) => {
            if !name.starts_with('@') && !bound.contains(&name.as_str()) {
                let _ = free.insert(name.clone());
            }
        }
        Expr::Comprehension(comp) => {
            // The range and the accumulator seed evaluate in the enclosing scope.
            free_variables(&comp.iter_range, bound, free);
            free_variables(&comp.accu_init, bound, free);

            let enclosing = bound.len();
            bound.push(comp.iter_var.as_str());
            if let Some(second) = &comp.iter_var2 {
                bound.push(second.as_str());
            }
            bound.push(comp.accu_var.as_str());
            free_variables(&comp.loop_cond, bound, free);
            free_variables(&comp.loop_step, bound, free);
            free_variables(&comp.result, bound, free);
            bound.truncate(enclosing);
        }
        Expr::Call(call) => {
            if let Some(target) = &call.target {
                free_variables(target, bound, free);
            }
            for arg in &call.args {
                free_variables(arg, bound, free);
            }
        }
        Expr::Select(select) => free_variables(&select.operand, bound, free),
        Expr::List(list) => {
            for element in &list.elements {
                free_variables(element, bound, free);
            }
        }
        Expr::Map(map) => free_entry_variables(&map.entries, bound, free),
        Expr::Struct(message) => free_entry_variables(&message.entries, bound, free),
        Expr::Literal(_) | Expr::Unspecified => {}
    }
}

fn free_entry_variables<'e>(entries: &'e [IdedEntryExpr], bound: &mut Vec<&'e str>, free: &mut BTreeSet<String>) {
    for entry in entries {
        match &entry.expr {
            EntryExpr::StructField(field) => free_variables(&field.value, bound, free),
            EntryExpr::MapEntry(pair) => {
                free_variables(&pair.key, bound, free);
                free_variables(&pair.value, bound, free);
            }
        }
    }
}

/// The no-expression variant: answers built-in attribute names only.
///
/// Used whenever zero attribute definitions are configured; never constructs an
/// evaluation environment or compiles anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

impl PassthroughResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn resolve(&self, name: &str, detailer: &dyn UserDetailer, updated_at: DateTime<Utc>) -> Option<AttributeValue> {
        let activation = Activation::new(detailer, updated_at);
        attributes::lookup(name).map(|def| (def.extractor)(&activation))
    }
}

/// The public resolver: one of two variants, selected once at construction based
/// on whether any attribute definitions are configured.
#[derive(Debug)]
pub enum UserAttributeResolver {
    Passthrough(PassthroughResolver),
    Expression(ExpressionResolver),
}

impl UserAttributeResolver {
    #[must_use]
    pub fn new(capabilities: BackendCapabilities, expressions: Vec<NamedExpression>) -> Self {
        if expressions.is_empty() {
            Self::Passthrough(PassthroughResolver::new())
        } else {
            Self::Expression(ExpressionResolver::new(capabilities, expressions))
        }
    }

    /// Prepare the resolver for use. Must complete before any `resolve` call.
    ///
    /// A true no-op for the passthrough variant.
    pub fn initialize(&mut self) -> Result<()> {
        match self {
            Self::Passthrough(_) => Ok(()),
            Self::Expression(resolver) => resolver.initialize(),
        }
    }

    /// Resolve an attribute for one user, preferring direct resolution over
    /// expression evaluation.
    #[must_use]
    pub fn resolve(&self, name: &str, detailer: &dyn UserDetailer, updated_at: DateTime<Utc>) -> Option<AttributeValue> {
        match self {
            Self::Passthrough(resolver) => resolver.resolve(name, detailer, updated_at),
            Self::Expression(resolver) => resolver.resolve(name, detailer, updated_at),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        match self {
            Self::Passthrough(_) => true,
            Self::Expression(resolver) => resolver.is_ready(),
        }
    }
}
