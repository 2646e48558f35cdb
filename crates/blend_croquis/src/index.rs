//! Owned declaration index built from one TypeScript source file.
//!
//! The oxc AST lives in an arena that is dropped at the end of parsing, so
//! every declaration the extractor cares about is copied out into plain owned
//! data: type declarations (interfaces and aliases) with their members and
//! same-file bases, and value declarations (functions, classes, variables)
//! with their JSDoc and destructured parameter defaults.

use std::path::Path;

use blend_carton::IndexMap;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, BindingPattern, Class, Declaration, ExportDefaultDeclarationKind, Expression,
    FormalParameters, Function, PropertyKey, Statement, TSInterfaceDeclaration, TSLiteral,
    TSSignature, TSType, TSTypeAliasDeclaration, VariableDeclaration,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};

use crate::error::{CroquisError, Result};
use crate::jsdoc::{doc_at, JsDoc};

/// Whether a type declaration came from `interface` or `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDeclarationKind {
    Interface,
    TypeAlias,
}

/// An interface or type alias.
#[derive(Debug, Clone)]
pub struct TypeDeclaration {
    pub name: String,
    pub kind: TypeDeclarationKind,
    pub doc: Option<JsDoc>,
    pub shape: TypeShape,
}

/// What a type declaration resolves to, as far as the extractor cares.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    /// Object-like: own members plus bases to inherit from.
    Object {
        members: Vec<Member>,
        bases: Vec<BaseRef>,
    },
    /// A union of literal types and type names, e.g. `'xl' | Size`.
    LiteralUnion(Vec<UnionPart>),
    /// Anything else, kept as source text.
    Other(String),
}

/// One member of a union that may expand to literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnionPart {
    /// A literal, `undefined` or `null`, as rendered.
    Literal(String),
    /// A bare type name, expanded later if it aliases a literal union.
    Alias(String),
}

/// A reference to a type an object shape inherits members from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseRef {
    Named(String),
    Omit { base: Box<BaseRef>, keys: Vec<String> },
    Pick { base: Box<BaseRef>, keys: Vec<String> },
    Partial(Box<BaseRef>),
    Required(Box<BaseRef>),
}

/// One property or method signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub ty: MemberType,
    pub optional: bool,
    pub doc: Option<JsDoc>,
}

/// The declared type of a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberType {
    /// Type text as written.
    pub text: String,
    /// Union members when the type is written as a union of literals and names.
    pub literals: Option<Vec<UnionPart>>,
    /// Referenced name when the type is a bare identifier, e.g. `ButtonSize`.
    pub reference: Option<String>,
}

impl MemberType {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            literals: None,
            reference: None,
        }
    }
}

/// Kind of a documentable value declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueKind {
    Function,
    Class,
    Variable,
}

/// A top-level function, class or variable.
#[derive(Debug, Clone)]
pub struct ValueDeclaration {
    pub name: String,
    pub kind: ValueKind,
    pub doc: Option<JsDoc>,
    /// Defaults from an object-destructured first parameter, as source text.
    pub param_defaults: IndexMap<String, String>,
}

/// All top-level declarations of one file.
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    types: IndexMap<String, TypeDeclaration>,
    values: IndexMap<String, ValueDeclaration>,
}

impl SourceIndex {
    /// Read and index `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source, path)
    }

    /// Index `source`; `path` selects TS or TSX parsing and labels errors.
    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        let source_type = if path.extension().map(|e| e == "tsx").unwrap_or(false) {
            SourceType::tsx()
        } else {
            SourceType::ts()
        };

        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, source_type).parse();

        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unrecoverable syntax error".to_string());
            return Err(CroquisError::Parse {
                path: path.to_path_buf(),
                message,
            });
        }

        let mut builder = IndexBuilder {
            source,
            index: SourceIndex::default(),
        };
        for stmt in ret.program.body.iter() {
            builder.statement(stmt);
        }
        Ok(builder.index)
    }

    pub fn type_declaration(&self, name: &str) -> Option<&TypeDeclaration> {
        self.types.get(name)
    }

    pub fn value_declaration(&self, name: &str) -> Option<&ValueDeclaration> {
        self.values.get(name)
    }

    pub fn type_declarations(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.types.values()
    }

    pub fn value_declarations(&self) -> impl Iterator<Item = &ValueDeclaration> {
        self.values.values()
    }
}

struct IndexBuilder<'s> {
    source: &'s str,
    index: SourceIndex,
}

impl<'s> IndexBuilder<'s> {
    fn text(&self, span: Span) -> &'s str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    fn statement(&mut self, stmt: &Statement<'_>) {
        // Doc comments attach to the outermost statement, before `export`
        let doc_pos = stmt.span().start;
        match stmt {
            Statement::TSInterfaceDeclaration(iface) => self.interface(iface, doc_pos),
            Statement::TSTypeAliasDeclaration(alias) => self.type_alias(alias, doc_pos),
            Statement::FunctionDeclaration(func) => self.function(func, doc_pos),
            Statement::ClassDeclaration(class) => self.class(class, doc_pos),
            Statement::VariableDeclaration(var_decl) => self.variables(var_decl, doc_pos),
            Statement::ExportNamedDeclaration(export) => {
                if let Some(decl) = &export.declaration {
                    self.declaration(decl, doc_pos);
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                    self.function(func, doc_pos)
                }
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    self.class(class, doc_pos)
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn declaration(&mut self, decl: &Declaration<'_>, doc_pos: u32) {
        match decl {
            Declaration::TSInterfaceDeclaration(iface) => self.interface(iface, doc_pos),
            Declaration::TSTypeAliasDeclaration(alias) => self.type_alias(alias, doc_pos),
            Declaration::FunctionDeclaration(func) => self.function(func, doc_pos),
            Declaration::ClassDeclaration(class) => self.class(class, doc_pos),
            Declaration::VariableDeclaration(var_decl) => self.variables(var_decl, doc_pos),
            _ => {}
        }
    }

    fn interface(&mut self, iface: &TSInterfaceDeclaration<'_>, doc_pos: u32) {
        let name = iface.id.name.to_string();
        // `interface X<T> extends A, Omit<B, 'k'> {`
        let heritage = self
            .source
            .get(iface.id.span.end as usize..iface.body.span.start as usize)
            .unwrap_or("");
        let bases = parse_extends_clause(heritage);
        let members = self.signatures(&iface.body.body);

        self.add_type(TypeDeclaration {
            name,
            kind: TypeDeclarationKind::Interface,
            doc: doc_at(self.source, doc_pos),
            shape: TypeShape::Object { members, bases },
        });
    }

    fn type_alias(&mut self, alias: &TSTypeAliasDeclaration<'_>, doc_pos: u32) {
        let shape = self.shape(&alias.type_annotation);
        self.add_type(TypeDeclaration {
            name: alias.id.name.to_string(),
            kind: TypeDeclarationKind::TypeAlias,
            doc: doc_at(self.source, doc_pos),
            shape,
        });
    }

    fn add_type(&mut self, decl: TypeDeclaration) {
        match self.index.types.get_mut(&decl.name) {
            // Interface merging: later declarations add members
            Some(TypeDeclaration {
                shape: TypeShape::Object { members, bases },
                doc,
                ..
            }) => {
                if let TypeShape::Object {
                    members: more,
                    bases: more_bases,
                } = decl.shape
                {
                    members.extend(more);
                    bases.extend(more_bases);
                }
                if doc.is_none() {
                    *doc = decl.doc;
                }
            }
            Some(_) => {}
            None => {
                self.index.types.insert(decl.name.clone(), decl);
            }
        }
    }

    fn shape(&self, ty: &TSType<'_>) -> TypeShape {
        match ty {
            TSType::TSTypeLiteral(lit) => TypeShape::Object {
                members: self.signatures(&lit.members),
                bases: Vec::new(),
            },
            TSType::TSIntersectionType(intersection) => {
                let mut members = Vec::new();
                let mut bases = Vec::new();
                for part in intersection.types.iter() {
                    if let TypeShape::Object {
                        members: m,
                        bases: b,
                    } = self.shape(part)
                    {
                        members.extend(m);
                        bases.extend(b);
                    }
                }
                TypeShape::Object { members, bases }
            }
            TSType::TSParenthesizedType(paren) => self.shape(&paren.type_annotation),
            TSType::TSTypeReference(reference) => match parse_base_ref(self.text(reference.span)) {
                Some(base) => TypeShape::Object {
                    members: Vec::new(),
                    bases: vec![base],
                },
                None => TypeShape::Other(self.text(reference.span).to_string()),
            },
            other => match self.literal_union(other) {
                Some(literals) => TypeShape::LiteralUnion(literals),
                None => TypeShape::Other(self.text(other.span()).to_string()),
            },
        }
    }

    fn signatures(&self, signatures: &[TSSignature<'_>]) -> Vec<Member> {
        signatures
            .iter()
            .filter_map(|sig| self.member(sig))
            .collect()
    }

    fn member(&self, sig: &TSSignature<'_>) -> Option<Member> {
        match sig {
            TSSignature::TSPropertySignature(prop) => {
                let name = property_key_name(&prop.key)?;
                let ty = match &prop.type_annotation {
                    Some(annotation) => self.member_type(&annotation.type_annotation),
                    None => MemberType::text("any"),
                };
                Some(Member {
                    name,
                    ty,
                    optional: prop.optional,
                    doc: doc_at(self.source, prop.span.start),
                })
            }
            TSSignature::TSMethodSignature(method) => {
                let name = property_key_name(&method.key)?;
                let after_key = self
                    .source
                    .get(method.key.span().end as usize..method.span.end as usize)
                    .unwrap_or("");
                let signature = after_key.trim_start().trim_start_matches('?');
                Some(Member {
                    name,
                    ty: MemberType::text(method_signature_to_arrow(signature)),
                    optional: method.optional,
                    doc: doc_at(self.source, method.span.start),
                })
            }
            _ => None,
        }
    }

    fn member_type(&self, ty: &TSType<'_>) -> MemberType {
        let reference = match ty {
            TSType::TSTypeReference(reference) => {
                let text = self.text(reference.span);
                is_identifier(text).then(|| text.to_string())
            }
            _ => None,
        };
        MemberType {
            text: self.text(ty.span()).to_string(),
            literals: self.literal_union(ty),
            reference,
        }
    }

    /// Flatten `ty` into union parts if it is a union of literals and bare
    /// type names.
    ///
    /// String literals are normalised to single quotes. `undefined` and
    /// `null` may appear alongside the other parts.
    fn literal_union(&self, ty: &TSType<'_>) -> Option<Vec<UnionPart>> {
        let mut out = Vec::new();
        if !self.collect_literals(ty, &mut out) {
            return None;
        }
        let has_value = out.iter().any(|part| match part {
            UnionPart::Literal(l) => l != "undefined" && l != "null",
            UnionPart::Alias(_) => true,
        });
        (has_value && out.len() > 1).then_some(out)
    }

    fn collect_literals(&self, ty: &TSType<'_>, out: &mut Vec<UnionPart>) -> bool {
        match ty {
            TSType::TSUnionType(union) => union
                .types
                .iter()
                .all(|member| self.collect_literals(member, out)),
            TSType::TSParenthesizedType(paren) => {
                self.collect_literals(&paren.type_annotation, out)
            }
            TSType::TSLiteralType(lit) => {
                let text = match &lit.literal {
                    TSLiteral::StringLiteral(s) => format!("'{}'", s.value),
                    _ => self.text(lit.span).to_string(),
                };
                out.push(UnionPart::Literal(text));
                true
            }
            TSType::TSUndefinedKeyword(_) => {
                out.push(UnionPart::Literal("undefined".to_string()));
                true
            }
            TSType::TSNullKeyword(_) => {
                out.push(UnionPart::Literal("null".to_string()));
                true
            }
            TSType::TSTypeReference(reference) => {
                let text = self.text(reference.span);
                if !is_identifier(text) {
                    return false;
                }
                out.push(UnionPart::Alias(text.to_string()));
                true
            }
            _ => false,
        }
    }

    fn function(&mut self, func: &Function<'_>, doc_pos: u32) {
        let Some(id) = &func.id else {
            return;
        };
        let decl = ValueDeclaration {
            name: id.name.to_string(),
            kind: ValueKind::Function,
            doc: doc_at(self.source, doc_pos),
            param_defaults: self.param_defaults(&func.params),
        };
        self.add_value(decl);
    }

    fn class(&mut self, class: &Class<'_>, doc_pos: u32) {
        let Some(id) = &class.id else {
            return;
        };
        let decl = ValueDeclaration {
            name: id.name.to_string(),
            kind: ValueKind::Class,
            doc: doc_at(self.source, doc_pos),
            param_defaults: IndexMap::new(),
        };
        self.add_value(decl);
    }

    fn variables(&mut self, var_decl: &VariableDeclaration<'_>, doc_pos: u32) {
        for declarator in var_decl.declarations.iter() {
            let BindingPattern::BindingIdentifier(id) = &declarator.id else {
                continue;
            };
            let param_defaults = declarator
                .init
                .as_ref()
                .and_then(|init| self.component_params(init))
                .map(|params| self.param_defaults(params))
                .unwrap_or_default();
            let decl = ValueDeclaration {
                name: id.name.to_string(),
                kind: ValueKind::Variable,
                doc: doc_at(self.source, doc_pos),
                param_defaults,
            };
            self.add_value(decl);
        }
    }

    fn add_value(&mut self, decl: ValueDeclaration) {
        // Overload signatures and re-declarations keep the first entry
        self.index.values.entry(decl.name.clone()).or_insert(decl);
    }

    /// Parameters of the function a component initializer evaluates to,
    /// looking through `forwardRef(...)`, `memo(...)` and type assertions.
    fn component_params<'a, 'e>(
        &self,
        expr: &'e Expression<'a>,
    ) -> Option<&'e FormalParameters<'a>> {
        match expr {
            Expression::ArrowFunctionExpression(arrow) => Some(&*arrow.params),
            Expression::FunctionExpression(func) => Some(&*func.params),
            Expression::CallExpression(call) => match call.arguments.first()? {
                Argument::ArrowFunctionExpression(arrow) => Some(&*arrow.params),
                Argument::FunctionExpression(func) => Some(&*func.params),
                Argument::CallExpression(inner) => match inner.arguments.first()? {
                    Argument::ArrowFunctionExpression(arrow) => Some(&*arrow.params),
                    Argument::FunctionExpression(func) => Some(&*func.params),
                    _ => None,
                },
                _ => None,
            },
            Expression::TSAsExpression(assertion) => self.component_params(&assertion.expression),
            Expression::TSSatisfiesExpression(satisfies) => {
                self.component_params(&satisfies.expression)
            }
            Expression::ParenthesizedExpression(paren) => self.component_params(&paren.expression),
            _ => None,
        }
    }

    fn param_defaults(&self, params: &FormalParameters<'_>) -> IndexMap<String, String> {
        let mut defaults = IndexMap::new();
        let Some(first) = params.items.first() else {
            return defaults;
        };
        let BindingPattern::ObjectPattern(obj) = &first.pattern else {
            return defaults;
        };
        for prop in obj.properties.iter() {
            let Some(name) = property_key_name(&prop.key) else {
                continue;
            };
            if let BindingPattern::AssignmentPattern(assign) = &prop.value {
                defaults.insert(name, self.text(assign.right.span()).to_string());
            }
        }
        defaults
    }
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        PropertyKey::StringLiteral(s) => Some(s.value.to_string()),
        PropertyKey::NumericLiteral(n) => Some(n.value.to_string()),
        _ => None,
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// `(e: Event): void` -> `(e: Event) => void`
fn method_signature_to_arrow(signature: &str) -> String {
    let Some(open) = signature.find('(') else {
        return signature.trim().to_string();
    };
    let mut depth = 0usize;
    let mut close = None;
    for (i, c) in signature.char_indices().skip_while(|(i, _)| *i < open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(close) = close else {
        return signature.trim().to_string();
    };
    let params = &signature[..=close];
    let ret = signature[close + 1..]
        .trim()
        .trim_start_matches(':')
        .trim()
        .trim_end_matches([';', ','])
        .trim();
    let ret = if ret.is_empty() { "void" } else { ret };
    format!("{} => {}", params.trim(), ret)
}

/// Split at top-level commas, ignoring commas nested in brackets.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = text[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

/// Bases of an interface from the text between its name and body.
fn parse_extends_clause(heritage: &str) -> Vec<BaseRef> {
    let mut text = heritage.trim();
    // Skip type parameters
    if text.starts_with('<') {
        let mut depth = 0i32;
        for (i, c) in text.char_indices() {
            match c {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        text = text[i + 1..].trim_start();
                        break;
                    }
                }
                _ => {}
            }
        }
    }
    let Some(list) = text.strip_prefix("extends") else {
        return Vec::new();
    };
    split_top_level(list)
        .into_iter()
        .filter_map(parse_base_ref)
        .collect()
}

/// Parse `Name`, `Name<T>`, `Omit<X, 'a' | 'b'>`, `Pick<..>`, `Partial<..>`.
pub fn parse_base_ref(text: &str) -> Option<BaseRef> {
    let text = text.trim();
    let (name, args) = match text.find('<') {
        Some(open) => {
            let inner = text[open + 1..].strip_suffix('>')?;
            (text[..open].trim(), split_top_level(inner))
        }
        None => (text, Vec::new()),
    };
    if name.is_empty() || !name.split('.').all(is_identifier) {
        return None;
    }

    let keys = |arg: Option<&&str>| -> Vec<String> {
        arg.map(|a| {
            a.split('|')
                .map(|k| k.trim().trim_matches(|c| c == '\'' || c == '"'))
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
    };

    let base = match (name, args.as_slice()) {
        ("Omit", [base, ..]) => BaseRef::Omit {
            base: Box::new(parse_base_ref(base)?),
            keys: keys(args.get(1)),
        },
        ("Pick", [base, ..]) => BaseRef::Pick {
            base: Box::new(parse_base_ref(base)?),
            keys: keys(args.get(1)),
        },
        ("Partial", [base]) => BaseRef::Partial(Box::new(parse_base_ref(base)?)),
        ("Required", [base]) => BaseRef::Required(Box::new(parse_base_ref(base)?)),
        _ => BaseRef::Named(name.to_string()),
    };
    Some(base)
}
