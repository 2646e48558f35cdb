//! Type introspection over same-file declarations.
//!
//! [`TypeIntrospector`] is the capability the prop extractor needs from a
//! type system: apparent members of a declaration, and literal-union
//! expansion through aliases. [`SourceIndex`] implements it syntactically,
//! following `extends`, intersections and the `Omit`/`Pick`/`Partial`/
//! `Required` utilities as long as every step stays inside the same file.

use blend_carton::{FxHashSet, IndexMap};

use crate::index::{BaseRef, Member, MemberType, SourceIndex, TypeShape, UnionPart};

pub trait TypeIntrospector {
    /// Apparent members of `declaration`, own members first.
    ///
    /// Returns `None` when no declaration with that name exists.
    fn resolve_members(&self, declaration: &str) -> Option<Vec<Member>>;

    /// Literal members of `ty`, expanding aliases of literal unions.
    fn resolve_literal_union(&self, ty: &MemberType) -> Option<Vec<String>>;
}

impl TypeIntrospector for SourceIndex {
    fn resolve_members(&self, declaration: &str) -> Option<Vec<Member>> {
        self.type_declaration(declaration)?;
        let mut visited = FxHashSet::default();
        let members = collect_members(self, declaration, &mut visited);
        Some(members.into_values().collect())
    }

    fn resolve_literal_union(&self, ty: &MemberType) -> Option<Vec<String>> {
        let mut visited = FxHashSet::default();
        match (&ty.literals, &ty.reference) {
            (Some(parts), _) => expand_union(self, parts, &mut visited),
            (None, Some(name)) => expand_alias(self, name, &mut visited),
            (None, None) => None,
        }
    }
}

/// Expand every part of a union, failing if any named part is not an alias
/// of literals. Duplicates keep their first position.
fn expand_union(
    index: &SourceIndex,
    parts: &[UnionPart],
    visited: &mut FxHashSet<String>,
) -> Option<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(parts.len());
    for part in parts {
        let expanded = match part {
            UnionPart::Literal(text) => vec![text.clone()],
            UnionPart::Alias(name) => expand_alias(index, name, visited)?,
        };
        for literal in expanded {
            if !out.contains(&literal) {
                out.push(literal);
            }
        }
    }
    Some(out)
}

/// Follow `type A = B` chains until a literal union shows up.
fn expand_alias(
    index: &SourceIndex,
    name: &str,
    visited: &mut FxHashSet<String>,
) -> Option<Vec<String>> {
    if !visited.insert(name.to_string()) {
        return None;
    }
    let decl = index.type_declaration(name)?;
    let literals = match &decl.shape {
        TypeShape::LiteralUnion(parts) => expand_union(index, parts, visited),
        TypeShape::Object { members, bases } if members.is_empty() => match bases.as_slice() {
            [BaseRef::Named(next)] => expand_alias(index, next, visited),
            _ => None,
        },
        _ => None,
    };
    visited.remove(name);
    literals
}

fn collect_members<'a>(
    index: &'a SourceIndex,
    name: &'a str,
    visited: &mut FxHashSet<&'a str>,
) -> IndexMap<String, Member> {
    let mut out = IndexMap::new();
    // Cyclic `extends` chains are invalid TypeScript; stop quietly
    if !visited.insert(name) {
        return out;
    }
    let Some(decl) = index.type_declaration(name) else {
        return out;
    };

    if let TypeShape::Object { members, bases } = &decl.shape {
        for member in members {
            out.insert(member.name.clone(), member.clone());
        }
        for base in bases {
            for (key, member) in collect_base(index, base, visited) {
                out.entry(key).or_insert(member);
            }
        }
    }

    visited.remove(name);
    out
}

fn collect_base<'a>(
    index: &'a SourceIndex,
    base: &'a BaseRef,
    visited: &mut FxHashSet<&'a str>,
) -> IndexMap<String, Member> {
    match base {
        BaseRef::Named(name) => {
            if index.type_declaration(name).is_none() {
                tracing::debug!("skipping non-local base type {}", name);
            }
            collect_members(index, name, visited)
        }
        BaseRef::Omit { base, keys } => {
            let mut members = collect_base(index, base, visited);
            members.retain(|name, _| !keys.contains(name));
            members
        }
        BaseRef::Pick { base, keys } => {
            let mut members = collect_base(index, base, visited);
            members.retain(|name, _| keys.contains(name));
            members
        }
        BaseRef::Partial(base) => {
            let mut members = collect_base(index, base, visited);
            for member in members.values_mut() {
                member.optional = true;
            }
            members
        }
        BaseRef::Required(base) => {
            let mut members = collect_base(index, base, visited);
            for member in members.values_mut() {
                member.optional = false;
            }
            members
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SOURCE: &str = r#"
type Size = 'sm' | 'md' | 'lg';
type ButtonSize = Size;

interface BaseProps {
  id: string;
  disabled?: boolean;
  style: object;
}

export interface ButtonProps extends Omit<BaseProps, 'style'>, React.HTMLAttributes<HTMLButtonElement> {
  size?: ButtonSize;
  id: number;
}

type LooseProps = Partial<Pick<BaseProps, 'id' | 'style'>>;

type TagProps = BaseProps & { label: string };

interface Loop extends Loop { a: string }
"#;

    fn index() -> SourceIndex {
        SourceIndex::parse(SOURCE, Path::new("types.ts")).unwrap()
    }

    fn names(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_inherited_members_exclude_non_local() {
        let index = index();
        let members = index.resolve_members("ButtonProps").unwrap();
        assert_eq!(names(&members), vec!["size", "id", "disabled"]);
        // Own declaration wins over the inherited one
        assert_eq!(members[1].ty.text, "number");
    }

    #[test]
    fn test_utility_types() {
        let index = index();
        let members = index.resolve_members("LooseProps").unwrap();
        assert_eq!(names(&members), vec!["id", "style"]);
        assert!(members.iter().all(|m| m.optional));
    }

    #[test]
    fn test_intersection() {
        let index = index();
        let members = index.resolve_members("TagProps").unwrap();
        assert_eq!(names(&members), vec!["label", "id", "disabled", "style"]);
    }

    #[test]
    fn test_cycle_and_missing() {
        let index = index();
        assert_eq!(names(&index.resolve_members("Loop").unwrap()), vec!["a"]);
        assert!(index.resolve_members("Missing").is_none());
    }

    #[test]
    fn test_literal_union_through_alias_chain() {
        let index = index();
        let members = index.resolve_members("ButtonProps").unwrap();
        assert_eq!(
            index.resolve_literal_union(&members[0].ty),
            Some(vec!["'sm'".to_string(), "'md'".to_string(), "'lg'".to_string()])
        );
        assert_eq!(index.resolve_literal_union(&members[1].ty), None);
    }

    #[test]
    fn test_literal_union_mixing_aliases() {
        let index = SourceIndex::parse(
            r#"
type Size = 'sm' | 'md';
type Extra = 'xl' | Size | 'sm';
type Ping = 'a' | Pong;
type Pong = 'b' | Ping;
interface Props {
  extra: Extra;
  maybe: Size | null;
  node: ReactNode | undefined;
  ping: Ping;
}
"#,
            Path::new("types.ts"),
        )
        .unwrap();
        let members = index.resolve_members("Props").unwrap();
        let expand = |i: usize| index.resolve_literal_union(&members[i].ty);

        assert_eq!(
            expand(0),
            Some(vec!["'xl'".to_string(), "'sm'".to_string(), "'md'".to_string()])
        );
        assert_eq!(
            expand(1),
            Some(vec!["'sm'".to_string(), "'md'".to_string(), "null".to_string()])
        );
        assert_eq!(expand(2), None);
        assert_eq!(expand(3), None);
    }
}
