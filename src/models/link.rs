use serde::{Deserialize, Serialize};

/// Relative slide links.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#RelativeSlideLink
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelativeSlideLink {
    #[default]
    RelativeSlideLinkUnspecified,
    NextSlide,
    PreviousSlide,
    FirstSlide,
    LastSlide,
}

/// The destination of a link. The JSON key selects the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
    Url(String),
    RelativeLink(RelativeSlideLink),
    PageObjectId(String),
    SlideIndex(i32),
}

/// A hypertext link.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(flatten)]
    pub destination: LinkKind,
}

impl Link {
    /// A link to an external page.
    pub fn url(url: impl Into<String>) -> Self {
        Link {
            destination: LinkKind::Url(url.into()),
        }
    }

    /// Markdown links like `[next](#next)` have no page id to point at; map the
    /// relative names the Slides editor offers and leave the rest as URLs.
    pub fn from_href(href: &str) -> Self {
        let relative = match href {
            "#next" => Some(RelativeSlideLink::NextSlide),
            "#previous" | "#prev" => Some(RelativeSlideLink::PreviousSlide),
            "#first" => Some(RelativeSlideLink::FirstSlide),
            "#last" => Some(RelativeSlideLink::LastSlide),
            _ => None,
        };
        match relative {
            Some(kind) => Link {
                destination: LinkKind::RelativeLink(kind),
            },
            None => Link::url(href),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_serializes_by_key() {
        let json = serde_json::to_value(Link::url("https://example.com")).unwrap();
        assert_eq!(json, serde_json::json!({"url": "https://example.com"}));

        let json = serde_json::to_value(Link::from_href("#next")).unwrap();
        assert_eq!(json, serde_json::json!({"relativeLink": "NEXT_SLIDE"}));
    }
}
