use std::fmt;

/// Name of a capability type attached to a scene node (e.g. `Button`).
///
/// Tags are compared by name. Every tag is assignable to itself and to the
/// universal [`TypeTag::COMPONENT`] base, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(String);

impl TypeTag {
    /// Name of the base type every capability derives from.
    pub const COMPONENT: &'static str = "Component";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The universal base tag.
    pub fn component() -> Self {
        Self::new(Self::COMPONENT)
    }

    /// Tag for a statically known capability type.
    pub fn of<C: Capability>() -> Self {
        Self::new(C::TYPE_NAME)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_component(&self) -> bool {
        self.0 == Self::COMPONENT
    }

    /// Whether a capability tagged `self` satisfies a request for `target`.
    pub fn is_assignable_to(&self, target: &TypeTag) -> bool {
        self == target || target.is_component()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A capability type known at compile time.
pub trait Capability {
    /// Display name used as the type tag and in generated code.
    const TYPE_NAME: &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Button;

    impl Capability for Button {
        const TYPE_NAME: &'static str = "Button";
    }

    #[test]
    fn test_assignable_to_self_and_component() {
        let button = TypeTag::new("Button");
        assert!(button.is_assignable_to(&TypeTag::new("Button")));
        assert!(button.is_assignable_to(&TypeTag::component()));
        assert!(!button.is_assignable_to(&TypeTag::new("Image")));
    }

    #[test]
    fn test_component_not_assignable_to_specific() {
        assert!(!TypeTag::component().is_assignable_to(&TypeTag::new("Button")));
    }

    #[test]
    fn test_tag_of_capability() {
        assert_eq!(TypeTag::of::<Button>(), TypeTag::from("Button"));
        assert_eq!(TypeTag::of::<Button>().to_string(), "Button");
    }
}
