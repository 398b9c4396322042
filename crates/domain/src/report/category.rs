//! Endpoint categories and the ordered rules that assign them

use std::fmt;

use serde::{Deserialize, Serialize};

/// Functional area an endpoint belongs to.
///
/// Variant order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Sign-in and token refresh
    Authentication,
    /// Chat completion and model listing
    #[serde(rename = "Chat & AI")]
    ChatAndAi,
    /// Conversations
    Conversations,
    /// Messages
    Messages,
    /// Uploads and file retrieval
    Files,
    /// Search
    Search,
    /// Usage battery
    Battery,
    /// User profile and tier
    User,
    /// Stripe billing
    Billing,
    /// Configuration and documentation
    Public,
    /// Anything no rule matched
    Other,
}

impl Category {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Authentication => "Authentication",
            Self::ChatAndAi => "Chat & AI",
            Self::Conversations => "Conversations",
            Self::Messages => "Messages",
            Self::Files => "Files",
            Self::Search => "Search",
            Self::Battery => "Battery",
            Self::User => "User",
            Self::Billing => "Billing",
            Self::Public => "Public",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps endpoint names containing any of `fragments` to `category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    /// Substrings matched against the endpoint name.
    pub fragments: &'static [&'static str],
    /// Category assigned on a match.
    pub category: Category,
}

impl CategoryRule {
    /// Returns true if the name contains one of the rule's fragments.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.fragments.iter().any(|f| name.contains(f))
    }
}

/// Classification rules, evaluated in order; the first match wins.
///
/// Order matters: `/api/conversations/{id}/messages` must land in
/// Conversations and `/api/v1/auth/...` in Authentication.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        fragments: &["/auth"],
        category: Category::Authentication,
    },
    CategoryRule {
        fragments: &["/chat", "/models"],
        category: Category::ChatAndAi,
    },
    CategoryRule {
        fragments: &["/conversations"],
        category: Category::Conversations,
    },
    CategoryRule {
        fragments: &["/messages"],
        category: Category::Messages,
    },
    CategoryRule {
        fragments: &["/upload", "/files"],
        category: Category::Files,
    },
    CategoryRule {
        fragments: &["/search"],
        category: Category::Search,
    },
    CategoryRule {
        fragments: &["/battery"],
        category: Category::Battery,
    },
    CategoryRule {
        fragments: &["/user"],
        category: Category::User,
    },
    CategoryRule {
        fragments: &["/stripe"],
        category: Category::Billing,
    },
    CategoryRule {
        fragments: &["/config", "/openapi", "/docs"],
        category: Category::Public,
    },
];

/// Classifies an endpoint name using `rules`, falling back to [`Category::Other`].
#[must_use]
pub fn classify_with(rules: &[CategoryRule], name: &str) -> Category {
    rules
        .iter()
        .find(|rule| rule.matches(name))
        .map_or(Category::Other, |rule| rule.category)
}

/// Classifies an endpoint name with [`CATEGORY_RULES`].
#[must_use]
pub fn classify(name: &str) -> Category {
    classify_with(CATEGORY_RULES, name)
}
