//! Behavioural tests for responsive style resolution.

use blend_cascade::{
    resolve_json, resolve_multiple, resolve_property, value_for_breakpoint, Breakpoint,
    ResponsiveValue, RuleSelector,
};
use serde_json::json;

fn responsive(value: serde_json::Value) -> ResponsiveValue<serde_json::Value> {
    ResponsiveValue::from_json(value)
}

mod property {
    use super::*;

    #[test]
    fn bare_values_are_unconditional() {
        for bare in [json!("4px"), json!(12), json!({ "top": 1 }), json!([1, 2])] {
            let rules = resolve_property("p", &responsive(bare.clone()));
            let groups: Vec<_> = rules.groups().collect();
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].0, RuleSelector::Base);
            assert_eq!(groups[0].1.get("p"), Some(&bare));
        }
    }

    #[test]
    fn desktop_only_is_gated() {
        let value = responsive(json!({ "desktop": "24px" }));
        let rules = resolve_property("padding", &value);

        assert_eq!(rules.group_count(), 1);
        assert_eq!(
            rules.media(Breakpoint::Desktop).and_then(|g| g.get("padding")),
            Some(&json!("24px"))
        );
        assert_eq!(value_for_breakpoint(&value, Breakpoint::Mobile), None);
    }

    #[test]
    fn all_breakpoints_emit_in_order() {
        let value = responsive(json!({ "desktop": 3, "mobile": 1, "tablet": 2 }));
        let selectors: Vec<_> = resolve_property("gap", &value)
            .groups()
            .map(|(selector, _)| selector)
            .collect();
        assert_eq!(
            selectors,
            vec![
                RuleSelector::Base,
                RuleSelector::MinWidth(Breakpoint::Tablet),
                RuleSelector::MinWidth(Breakpoint::Desktop),
            ]
        );
    }
}

mod lookup {
    use super::*;

    #[test]
    fn tablet_falls_back_to_mobile() {
        let value = responsive(json!({ "mobile": "4px", "desktop": "8px" }));
        assert_eq!(
            value_for_breakpoint(&value, Breakpoint::Tablet),
            Some(&json!("4px"))
        );
    }

    #[test]
    fn desktop_prefers_its_own_value() {
        let value = responsive(json!({ "mobile": "4px", "tablet": "6px", "desktop": "8px" }));
        assert_eq!(
            value_for_breakpoint(&value, Breakpoint::Desktop),
            Some(&json!("8px"))
        );
    }
}

mod multiple {
    use super::*;

    #[test]
    fn merges_unconditional_and_gated_groups() {
        let a = responsive(json!({ "mobile": 1, "desktop": 2 }));
        let b = responsive(json!(5));
        let rules = resolve_multiple([("a", Some(&a)), ("b", Some(&b))]);

        assert_eq!(serde_json::to_value(rules.base()).unwrap(), json!({ "a": 1, "b": 5 }));
        assert_eq!(
            serde_json::to_value(rules.media(Breakpoint::Desktop).unwrap()).unwrap(),
            json!({ "a": 2 })
        );
        assert!(rules.media(Breakpoint::Tablet).is_none());
    }

    #[test]
    fn json_map_keeps_declaration_order() {
        let props = json!({
            "zIndex": 2,
            "margin": { "tablet": "8px" },
            "alignItems": "center",
            "padding": { "mobile": "2px", "tablet": "4px" }
        });
        let rules = resolve_json(props.as_object().unwrap());

        let base: Vec<_> = rules.base().keys().cloned().collect();
        assert_eq!(base, vec!["zIndex", "alignItems", "padding"]);
        let tablet: Vec<_> = rules
            .media(Breakpoint::Tablet)
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(tablet, vec!["margin", "padding"]);
    }
}
