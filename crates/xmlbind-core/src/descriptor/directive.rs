//! Declarative binding directives attached to classes, fields and parameters.

use serde::{Deserialize, Serialize};

use crate::QualifiedName;

/// Policy for fields that carry no binding directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Undirected fields are bound implicitly (scalars as property elements,
    /// everything else as elements).
    CommonCase,
    /// Only explicitly directived fields are bound.
    #[default]
    DirectivesOnly,
}

/// Class-level binding directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDirective {
    /// XML element name override for the class.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether directive-bearing ancestors contribute fields.
    #[serde(default = "default_inherit")]
    pub inherit: bool,
    /// Scan mode override; `None` uses the resolver default.
    #[serde(default)]
    pub scan_mode: Option<ScanMode>,
}

fn default_inherit() -> bool {
    true
}

impl Default for XmlDirective {
    fn default() -> Self {
        Self {
            name: None,
            inherit: true,
            scan_mode: None,
        }
    }
}

impl XmlDirective {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn without_inheritance(mut self) -> Self {
        self.inherit = false;
        self
    }

    pub fn with_scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = Some(mode);
        self
    }
}

/// `@Attribute`-style directive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeDirective {
    pub name: Option<String>,
    pub required: bool,
    pub converter: Option<QualifiedName>,
}

/// `@PropertyElement`-style directive: a child element holding scalar text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyElementDirective {
    pub name: Option<String>,
    pub required: bool,
    pub write_as_cdata: bool,
    pub converter: Option<QualifiedName>,
}

/// Explicit polymorphic mapping on an element directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatcherDirective {
    /// XML element name selecting the type.
    pub name: String,
    /// Concrete type instantiated for that element.
    #[serde(rename = "type")]
    pub ty: QualifiedName,
}

impl MatcherDirective {
    pub fn new(name: impl Into<String>, ty: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// `@Element`-style directive: a nested object or list of objects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementDirective {
    pub name: Option<String>,
    pub required: bool,
    pub matchers: Vec<MatcherDirective>,
}

/// `@TextContent`-style directive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContentDirective {
    pub write_as_cdata: bool,
}

/// A single per-field (or per-constructor-parameter) directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    Attribute(AttributeDirective),
    PropertyElement(PropertyElementDirective),
    Element(ElementDirective),
    TextContent(TextContentDirective),
    /// Slash-separated container path, validated by the path segmenter.
    Path(String),
    /// Exclude the field from binding.
    Ignore,
}

impl Directive {
    /// Short label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Directive::Attribute(_) => "attribute",
            Directive::PropertyElement(_) => "property-element",
            Directive::Element(_) => "element",
            Directive::TextContent(_) => "text-content",
            Directive::Path(_) => "path",
            Directive::Ignore => "ignore",
        }
    }

    /// Whether this directive is one of the mutually exclusive binding kinds.
    pub fn is_binding(&self) -> bool {
        matches!(
            self,
            Directive::Attribute(_)
                | Directive::PropertyElement(_)
                | Directive::Element(_)
                | Directive::TextContent(_)
        )
    }

    pub fn attribute() -> Self {
        Directive::Attribute(AttributeDirective::default())
    }

    pub fn attribute_named(name: impl Into<String>) -> Self {
        Directive::Attribute(AttributeDirective {
            name: Some(name.into()),
            ..AttributeDirective::default()
        })
    }

    pub fn property_element() -> Self {
        Directive::PropertyElement(PropertyElementDirective::default())
    }

    pub fn element() -> Self {
        Directive::Element(ElementDirective::default())
    }

    pub fn element_with_matchers(matchers: Vec<MatcherDirective>) -> Self {
        Directive::Element(ElementDirective {
            matchers,
            ..ElementDirective::default()
        })
    }

    pub fn text_content() -> Self {
        Directive::TextContent(TextContentDirective::default())
    }

    pub fn path(path: impl Into<String>) -> Self {
        Directive::Path(path.into())
    }
}

/// Directive lookups over a directive list.
pub trait DirectiveSet {
    fn directives(&self) -> &[Directive];

    /// The binding directives present, in declaration order.
    fn binding_directives(&self) -> Vec<&Directive> {
        self.directives().iter().filter(|d| d.is_binding()).collect()
    }

    /// The path directive's raw string, if any.
    fn path_directive(&self) -> Option<&str> {
        self.directives().iter().find_map(|d| match d {
            Directive::Path(p) => Some(p.as_str()),
            _ => None,
        })
    }

    fn is_ignored(&self) -> bool {
        self.directives().iter().any(|d| matches!(d, Directive::Ignore))
    }

    /// Whether any binding directive is present.
    fn has_binding_directive(&self) -> bool {
        self.directives().iter().any(Directive::is_binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_classification() {
        assert!(Directive::attribute().is_binding());
        assert!(Directive::text_content().is_binding());
        assert!(!Directive::path("a").is_binding());
        assert!(!Directive::Ignore.is_binding());
    }

    #[test]
    fn xml_directive_defaults() {
        let xml: XmlDirective = serde_json::from_str("{}").unwrap();
        assert!(xml.inherit);
        assert_eq!(xml.name, None);
        assert_eq!(xml.scan_mode, None);
    }

    #[test]
    fn directive_json_shape() {
        let d: Directive =
            serde_json::from_str(r#"{"attribute":{"name":"id","required":true}}"#).unwrap();
        assert_eq!(
            d,
            Directive::Attribute(AttributeDirective {
                name: Some("id".into()),
                required: true,
                converter: None,
            })
        );

        let d: Directive = serde_json::from_str(
            r#"{"element":{"matchers":[{"name":"circle","type":"shapes.Circle"}]}}"#,
        )
        .unwrap();
        let Directive::Element(e) = d else {
            panic!("expected element directive");
        };
        assert_eq!(e.matchers, vec![MatcherDirective::new("circle", "shapes.Circle")]);

        let d: Directive = serde_json::from_str(r#""ignore""#).unwrap();
        assert_eq!(d, Directive::Ignore);
    }
}
