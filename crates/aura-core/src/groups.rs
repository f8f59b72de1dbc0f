//! Property groups: how the inspector panel clusters document fields.
//!
//! Each group lists the dotted property paths it owns (`padding.top`,
//! `opacity`). Panels use this to build accordions and to locate the
//! section a property lives in.

use serde::Serialize;

/// A named cluster of related document properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertyGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub properties: &'static [&'static str],
}

impl PropertyGroup {
    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains(&property)
    }
}

/// All groups, in display order.
pub static GROUPS: [PropertyGroup; 8] = [
    PropertyGroup {
        id: "content",
        label: "Content",
        description: "Element content and linking",
        icon: "type",
        properties: &["elementTag", "textContent", "link"],
    },
    PropertyGroup {
        id: "sizing",
        label: "Sizing",
        description: "Dimensions and constraints",
        icon: "square",
        properties: &["size.width", "size.height", "size.maxWidth", "size.maxHeight"],
    },
    PropertyGroup {
        id: "spacing",
        label: "Spacing",
        description: "Padding and margin",
        icon: "spacing",
        properties: &[
            "padding.top",
            "padding.right",
            "padding.bottom",
            "padding.left",
            "margin.top",
            "margin.right",
            "margin.bottom",
            "margin.left",
        ],
    },
    PropertyGroup {
        id: "typography",
        label: "Typography",
        description: "Font and text styling",
        icon: "type",
        properties: &[
            "typography.fontFamily",
            "typography.fontSize",
            "typography.fontWeight",
            "typography.textAlign",
            "typography.lineHeight",
            "typography.letterSpacing",
        ],
    },
    PropertyGroup {
        id: "appearance",
        label: "Appearance",
        description: "Background, border, and colors",
        icon: "palette",
        properties: &[
            "background.type",
            "background.color",
            "background.gradient",
            "border.color",
            "border.width",
            "border.radius",
        ],
    },
    PropertyGroup {
        id: "transforms2d",
        label: "2D Transforms",
        description: "Two-dimensional transformations",
        icon: "move",
        properties: &[
            "transforms.translateX",
            "transforms.translateY",
            "transforms.rotate",
            "transforms.scale",
            "transforms.skewX",
            "transforms.skewY",
        ],
    },
    PropertyGroup {
        id: "transforms3d",
        label: "3D Transforms",
        description: "Three-dimensional transformations",
        icon: "cube",
        properties: &[
            "transforms3d.rotateX",
            "transforms3d.rotateY",
            "transforms3d.rotateZ",
            "transforms3d.perspective",
        ],
    },
    PropertyGroup {
        id: "effects",
        label: "Effects",
        description: "Opacity and blur effects",
        icon: "sparkles",
        properties: &["opacity", "blur", "backdropBlur"],
    },
];

/// Groups expanded when the panel first opens.
pub static DEFAULT_EXPANDED: [&str; 3] = ["content", "sizing", "spacing"];

/// Lookup helpers over [`GROUPS`].
pub struct PropertyGroups;

impl PropertyGroups {
    pub fn get(id: &str) -> Option<&'static PropertyGroup> {
        GROUPS.iter().find(|g| g.id == id)
    }

    pub fn in_order() -> &'static [PropertyGroup] {
        &GROUPS
    }

    pub fn properties(id: &str) -> &'static [&'static str] {
        Self::get(id).map(|g| g.properties).unwrap_or(&[])
    }

    pub fn is_property_in_group(id: &str, property: &str) -> bool {
        Self::get(id).is_some_and(|g| g.contains(property))
    }

    /// The group owning a dotted property path, if any.
    pub fn find_for_property(property: &str) -> Option<&'static PropertyGroup> {
        GROUPS.iter().find(|g| g.contains(property))
    }

    pub fn default_expanded() -> &'static [&'static str] {
        &DEFAULT_EXPANDED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        assert_eq!(PropertyGroups::get("effects").unwrap().label, "Effects");
        assert!(PropertyGroups::get("layout").is_none());
        assert!(PropertyGroups::properties("layout").is_empty());
    }

    #[test]
    fn display_order() {
        let ids: Vec<_> = PropertyGroups::in_order().iter().map(|g| g.id).collect();
        assert_eq!(
            ids,
            [
                "content",
                "sizing",
                "spacing",
                "typography",
                "appearance",
                "transforms2d",
                "transforms3d",
                "effects"
            ]
        );
    }

    #[test]
    fn property_membership() {
        assert!(PropertyGroups::is_property_in_group("spacing", "margin.left"));
        assert!(!PropertyGroups::is_property_in_group("spacing", "opacity"));
        assert_eq!(
            PropertyGroups::find_for_property("transforms3d.perspective").map(|g| g.id),
            Some("transforms3d")
        );
        assert_eq!(PropertyGroups::find_for_property("shadow"), None);
    }

    #[test]
    fn every_property_has_exactly_one_group() {
        for group in &GROUPS {
            for prop in group.properties {
                let owners = GROUPS.iter().filter(|g| g.contains(prop)).count();
                assert_eq!(owners, 1, "{prop} owned by {owners} groups");
            }
        }
    }
}
