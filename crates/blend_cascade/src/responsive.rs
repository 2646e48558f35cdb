//! Responsive values: a bare value or a breakpoint-keyed mapping.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Breakpoint;

/// Partial mapping from [`Breakpoint`] to a value.
///
/// An absent key inherits the nearest smaller breakpoint's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointMap<T> {
    pub mobile: Option<T>,
    pub tablet: Option<T>,
    pub desktop: Option<T>,
}

impl<T> Default for BreakpointMap<T> {
    fn default() -> Self {
        Self {
            mobile: None,
            tablet: None,
            desktop: None,
        }
    }
}

impl<T> BreakpointMap<T> {
    /// Value declared for exactly this breakpoint.
    #[inline]
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&T> {
        match breakpoint {
            Breakpoint::Mobile => self.mobile.as_ref(),
            Breakpoint::Tablet => self.tablet.as_ref(),
            Breakpoint::Desktop => self.desktop.as_ref(),
        }
    }

    pub fn set(&mut self, breakpoint: Breakpoint, value: T) {
        match breakpoint {
            Breakpoint::Mobile => self.mobile = Some(value),
            Breakpoint::Tablet => self.tablet = Some(value),
            Breakpoint::Desktop => self.desktop = Some(value),
        }
    }

    /// Declared entries, smallest breakpoint first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &T)> {
        Breakpoint::ALL
            .into_iter()
            .filter_map(move |bp| self.get(bp).map(|value| (bp, value)))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mobile.is_none() && self.tablet.is_none() && self.desktop.is_none()
    }
}

/// A style value that may vary by breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsiveValue<T> {
    /// Applies at every breakpoint.
    Bare(T),
    /// Breakpoint-keyed overrides, cascading upward.
    Responsive(BreakpointMap<T>),
}

impl<T> From<T> for ResponsiveValue<T> {
    fn from(value: T) -> Self {
        ResponsiveValue::Bare(value)
    }
}

impl<T> ResponsiveValue<T> {
    /// Build a responsive value from `(breakpoint, value)` pairs.
    pub fn responsive(entries: impl IntoIterator<Item = (Breakpoint, T)>) -> Self {
        let mut map = BreakpointMap::default();
        for (bp, value) in entries {
            map.set(bp, value);
        }
        ResponsiveValue::Responsive(map)
    }

    /// Value in effect at `breakpoint`.
    ///
    /// Bare values apply everywhere. Mappings use the closest declared
    /// breakpoint that is equal or smaller; `None` if nothing applies.
    pub fn value_for_breakpoint(&self, breakpoint: Breakpoint) -> Option<&T> {
        match self {
            ResponsiveValue::Bare(value) => Some(value),
            ResponsiveValue::Responsive(map) => {
                breakpoint.fallback_chain().find_map(|bp| map.get(bp))
            }
        }
    }

    #[inline]
    pub fn is_responsive(&self) -> bool {
        matches!(self, ResponsiveValue::Responsive(_))
    }
}

/// Whether a JSON value is a breakpoint-keyed mapping.
///
/// Only non-null, non-array objects with at least one of `mobile`, `tablet`
/// or `desktop` qualify.
pub fn is_breakpoint_map(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Object(map) => Breakpoint::ALL
            .iter()
            .any(|bp| map.contains_key(bp.key())),
        _ => false,
    }
}

impl ResponsiveValue<serde_json::Value> {
    /// Classify an untyped JSON value.
    ///
    /// `null` entries inside a mapping count as absent.
    pub fn from_json(value: serde_json::Value) -> Self {
        if !is_breakpoint_map(&value) {
            return ResponsiveValue::Bare(value);
        }

        let serde_json::Value::Object(mut object) = value else {
            unreachable!("is_breakpoint_map only accepts objects");
        };

        let mut map = BreakpointMap::default();
        for bp in Breakpoint::ALL {
            match object.remove(bp.key()) {
                Some(serde_json::Value::Null) | None => {}
                Some(v) => map.set(bp, v),
            }
        }
        ResponsiveValue::Responsive(map)
    }
}

impl<T: Serialize> Serialize for ResponsiveValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            ResponsiveValue::Bare(value) => value.serialize(serializer),
            ResponsiveValue::Responsive(map) => {
                let entries: Vec<_> = map.iter().collect();
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (bp, value) in entries {
                    out.serialize_entry(bp.key(), value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ResponsiveValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let convert = |v: serde_json::Value| {
            serde_json::from_value::<T>(v).map_err(<D::Error as serde::de::Error>::custom)
        };

        match ResponsiveValue::from_json(raw) {
            ResponsiveValue::Bare(v) => convert(v).map(ResponsiveValue::Bare),
            ResponsiveValue::Responsive(map) => Ok(ResponsiveValue::Responsive(BreakpointMap {
                mobile: map.mobile.map(convert).transpose()?,
                tablet: map.tablet.map(convert).transpose()?,
                desktop: map.desktop.map(convert).transpose()?,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_breakpoint_map() {
        assert!(is_breakpoint_map(&json!({ "mobile": "4px" })));
        assert!(is_breakpoint_map(&json!({ "desktop": 2, "other": 1 })));
        assert!(!is_breakpoint_map(&json!({ "top": "4px" })));
        assert!(!is_breakpoint_map(&json!(["mobile"])));
        assert!(!is_breakpoint_map(&json!("mobile")));
        assert!(!is_breakpoint_map(&json!(null)));
        assert!(!is_breakpoint_map(&json!(12)));
    }

    #[test]
    fn test_value_for_breakpoint_falls_back() {
        let value = ResponsiveValue::from_json(json!({ "mobile": "4px", "desktop": "8px" }));
        assert_eq!(
            value.value_for_breakpoint(Breakpoint::Tablet),
            Some(&json!("4px"))
        );
        assert_eq!(
            value.value_for_breakpoint(Breakpoint::Desktop),
            Some(&json!("8px"))
        );
    }

    #[test]
    fn test_value_for_breakpoint_prefers_exact() {
        let value = ResponsiveValue::from_json(json!({
            "mobile": "4px",
            "tablet": "6px",
            "desktop": "8px"
        }));
        assert_eq!(
            value.value_for_breakpoint(Breakpoint::Desktop),
            Some(&json!("8px"))
        );
        assert_eq!(
            value.value_for_breakpoint(Breakpoint::Tablet),
            Some(&json!("6px"))
        );
    }

    #[test]
    fn test_desktop_only_has_no_mobile_value() {
        let value = ResponsiveValue::from_json(json!({ "desktop": "24px" }));
        assert_eq!(value.value_for_breakpoint(Breakpoint::Mobile), None);
        assert_eq!(value.value_for_breakpoint(Breakpoint::Tablet), None);
    }

    #[test]
    fn test_bare_value_applies_everywhere() {
        let value: ResponsiveValue<&str> = "12px".into();
        for bp in Breakpoint::ALL {
            assert_eq!(value.value_for_breakpoint(bp), Some(&"12px"));
        }
    }

    #[test]
    fn test_null_entries_are_absent() {
        let value = ResponsiveValue::from_json(json!({ "mobile": null, "tablet": null }));
        match value {
            ResponsiveValue::Responsive(map) => assert!(map.is_empty()),
            ResponsiveValue::Bare(_) => panic!("expected a mapping"),
        }
    }

    #[test]
    fn test_deserialize_typed() {
        let value: ResponsiveValue<u32> =
            serde_json::from_value(json!({ "mobile": 1, "desktop": 3 })).unwrap();
        assert_eq!(value, ResponsiveValue::responsive([
            (Breakpoint::Mobile, 1),
            (Breakpoint::Desktop, 3),
        ]));

        let bare: ResponsiveValue<String> = serde_json::from_value(json!("auto")).unwrap();
        assert_eq!(bare, ResponsiveValue::Bare("auto".to_string()));
    }

    #[test]
    fn test_serialize_keeps_breakpoint_order() {
        let value = ResponsiveValue::responsive([
            (Breakpoint::Desktop, "8px"),
            (Breakpoint::Mobile, "4px"),
        ]);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"mobile":"4px","desktop":"8px"}"#
        );
    }
}
